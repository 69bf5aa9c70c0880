//! Dispatch from media type to validator

use crate::builtin;
use crate::classify::OutputClassifier;
use crate::search_path::SearchPath;
use crate::spec::ValidatorSpec;
use bitcheck_errors::{Error, ValidatorError};
use bitcheck_types::{MediaType, Warning};
use std::collections::BTreeMap;

/// Fixed table of validators, at most one per media type
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    specs: BTreeMap<MediaType, ValidatorSpec>,
    classifier: OutputClassifier,
}

impl ToolRegistry {
    /// Build a registry, compiling every rule table
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::DuplicateSpec` if two specs share a media
    /// type, or `ValidatorError::InvalidRule` for a pattern that does not
    /// compile.
    pub fn new(specs: Vec<ValidatorSpec>) -> Result<Self, Error> {
        let classifier = OutputClassifier::compile(&specs)?;

        let mut table = BTreeMap::new();
        for spec in specs {
            let media_type = spec.media_type;
            if table.insert(media_type, spec).is_some() {
                return Err(ValidatorError::DuplicateSpec {
                    media_type: media_type.to_string(),
                }
                .into());
            }
        }

        Ok(Self {
            specs: table,
            classifier,
        })
    }

    /// Registry of the built-in validators
    ///
    /// # Errors
    ///
    /// Fails only if a built-in rule table is malformed.
    pub fn builtin() -> Result<Self, Error> {
        Self::new(builtin::builtin_specs())
    }

    /// Validator responsible for `media_type`
    #[must_use]
    pub fn lookup(&self, media_type: MediaType) -> Option<&ValidatorSpec> {
        self.specs.get(&media_type)
    }

    /// Every registered validator, ordered by media type
    pub fn specs(&self) -> impl Iterator<Item = &ValidatorSpec> {
        self.specs.values()
    }

    /// Whether the executable of `spec` resolves on `search_path`
    #[must_use]
    pub fn is_available(&self, spec: &ValidatorSpec, search_path: &SearchPath) -> bool {
        search_path.resolve(&spec.tool).is_some()
    }

    /// Classify output produced by the validator for `media_type`
    #[must_use]
    pub fn classify(&self, media_type: MediaType, raw: &str) -> Vec<Warning> {
        self.classifier.classify(media_type, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let registry = ToolRegistry::builtin().unwrap();
        assert_eq!(registry.lookup(MediaType::Mp3).unwrap().tool, "mp3val");
        assert_eq!(registry.lookup(MediaType::Flac).unwrap().tool, "flac");
        assert_eq!(
            registry.lookup(MediaType::Ogg).unwrap().tool,
            "oggz-validate"
        );
        assert!(registry.lookup(MediaType::Unknown).is_none());
        assert_eq!(registry.specs().count(), 3);
    }

    #[test]
    fn test_duplicate_media_type_rejected() {
        let err = ToolRegistry::new(vec![builtin::mp3val(), builtin::mp3val()]).unwrap_err();
        assert!(matches!(
            err,
            Error::Validator(ValidatorError::DuplicateSpec { .. })
        ));
    }
}
