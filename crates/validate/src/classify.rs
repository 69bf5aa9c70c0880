//! Turning raw validator output into normalized warnings

use crate::spec::{Rule, ValidatorSpec};
use bitcheck_errors::{Error, ValidatorError};
use bitcheck_types::{MediaType, Warning, WarningKind};
use regex::Regex;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct CompiledRule {
    regex: Regex,
    kind: WarningKind,
    template: String,
}

impl CompiledRule {
    fn compile(rule: &Rule) -> Result<Self, Error> {
        let regex = Regex::new(&rule.pattern).map_err(|e| ValidatorError::InvalidRule {
            pattern: rule.pattern.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            regex,
            kind: rule.kind,
            template: rule.template.clone(),
        })
    }

    fn apply(&self, line: &str) -> Option<Warning> {
        let caps = self.regex.captures(line)?;
        let mut message = String::new();
        caps.expand(&self.template, &mut message);
        Some(Warning::new(self.kind, message.trim()))
    }
}

/// Per-media-type rule tables, compiled once
#[derive(Debug, Clone, Default)]
pub struct OutputClassifier {
    tables: HashMap<MediaType, Vec<CompiledRule>>,
}

impl OutputClassifier {
    /// Compile the rule tables of `specs`
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::InvalidRule` if a pattern does not compile.
    pub fn compile(specs: &[ValidatorSpec]) -> Result<Self, Error> {
        let mut tables = HashMap::new();
        for spec in specs {
            let rules = spec
                .rules
                .iter()
                .map(CompiledRule::compile)
                .collect::<Result<Vec<_>, _>>()?;
            tables.insert(spec.media_type, rules);
        }
        Ok(Self { tables })
    }

    /// Classify `raw` validator output for a file of `media_type`
    ///
    /// Each line yields at most one warning (the first rule that matches).
    /// Lines no rule recognizes are dropped. Output order follows line order
    /// and repeated lines produce repeated warnings.
    #[must_use]
    pub fn classify(&self, media_type: MediaType, raw: &str) -> Vec<Warning> {
        let Some(rules) = self.tables.get(&media_type) else {
            return Vec::new();
        };

        raw.lines()
            .filter_map(|line| rules.iter().find_map(|rule| rule.apply(line)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn classifier() -> OutputClassifier {
        OutputClassifier::compile(&builtin::builtin_specs()).unwrap()
    }

    #[test]
    fn test_mp3val_truncation() {
        let raw = "INFO: \"/m/t.mp3\": 15 MPEG frames (MPEG 1 Layer III), +ID3v1\n\
                   WARNING: \"/m/t.mp3\" (offset 0x1b2c): It seems that file is truncated or there is garbage at the end of the file\n\
                   Done!\n";
        let warnings = classifier().classify(MediaType::Mp3, raw);
        assert_eq!(
            warnings,
            vec![Warning::new(
                WarningKind::Truncated,
                "It seems that file is truncated or there is garbage at the end of the file"
            )]
        );
    }

    #[test]
    fn test_mp3val_rule_order() {
        let raw = "WARNING: \"/a.mp3\" (offset 0x10): MPEG stream error, resynchronized successfully\n\
                   WARNING: \"/a.mp3\" (offset 0x20): Wrong CRC in frame\n\
                   WARNING: \"/a.mp3\": Garbage at the beginning of the file\n";
        let kinds: Vec<_> = classifier()
            .classify(MediaType::Mp3, raw)
            .into_iter()
            .map(|w| w.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                WarningKind::StreamError,
                WarningKind::Corrupt,
                WarningKind::Other
            ]
        );
    }

    #[test]
    fn test_flac_decode_error() {
        let raw = "truncated.flac: *** Got error code 0:FLAC__STREAM_DECODER_ERROR_STATUS_LOST_SYNC\n\
                   \n\
                   truncated.flac: ERROR while decoding data\n\
                   \x20              state = FLAC__STREAM_DECODER_END_OF_STREAM\n";
        let warnings = classifier().classify(MediaType::Flac, raw);
        assert_eq!(
            warnings,
            vec![
                Warning::new(WarningKind::Corrupt, "decoder error LOST_SYNC"),
                Warning::new(WarningKind::DecodeError, "while decoding data"),
            ]
        );
    }

    #[test]
    fn test_ogg_missing_eos() {
        let raw = "/m/x.ogg: Error:\nserialno 1038587646 missing *** eos\n";
        let warnings = classifier().classify(MediaType::Ogg, raw);
        assert_eq!(
            warnings,
            vec![Warning::new(
                WarningKind::StreamError,
                "serialno 1038587646 missing *** eos"
            )]
        );
    }

    #[test]
    fn test_repeated_lines_are_not_merged() {
        let line = "serialno 1 missing *** bos\n";
        let warnings = classifier().classify(MediaType::Ogg, &line.repeat(3));
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_unmapped_media_type_yields_nothing() {
        let warnings = classifier().classify(MediaType::Unknown, "WARNING: \"x\": bad\n");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let spec = ValidatorSpec::new(MediaType::Mp3, "x", &["{path}"]).rule(
            "(unclosed",
            WarningKind::Other,
            "",
        );
        let err = OutputClassifier::compile(&[spec]).unwrap_err();
        assert!(matches!(
            err,
            Error::Validator(ValidatorError::InvalidRule { .. })
        ));
    }
}
