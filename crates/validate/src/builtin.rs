//! Validators known out of the box

use crate::spec::ValidatorSpec;
use bitcheck_types::{MediaType, WarningKind};

// `WARNING: "<file>" (offset 0x1f2e): <message>`
const MP3VAL_PREFIX: &str = r#"^WARNING: "[^"]*"(?: \(offset 0x[0-9A-Fa-f]+\))?: "#;

/// mp3val, which reports one `WARNING:` line per problem
#[must_use]
pub fn mp3val() -> ValidatorSpec {
    let rule = |tail: &str| format!("{MP3VAL_PREFIX}{tail}");
    ValidatorSpec::new(MediaType::Mp3, "mp3val", &["{path}"])
        .rule(
            &rule(r"(?P<msg>.*(?:truncated|garbage at the end).*)$"),
            WarningKind::Truncated,
            "${msg}",
        )
        .rule(
            &rule(r"(?P<msg>MPEG stream error.*)$"),
            WarningKind::StreamError,
            "${msg}",
        )
        .rule(
            &rule(r"(?P<msg>.*(?:CRC|[Ii]nvalid|[Ww]rong).*)$"),
            WarningKind::Corrupt,
            "${msg}",
        )
        .rule(&rule(r"(?P<msg>.+)$"), WarningKind::Other, "${msg}")
}

/// The reference FLAC decoder in test mode
#[must_use]
pub fn flac() -> ValidatorSpec {
    ValidatorSpec::new(MediaType::Flac, "flac", &["--test", "--silent", "{path}"])
        .rule(
            r"^.*: ERROR while decoding (?P<what>data|metadata)$",
            WarningKind::DecodeError,
            "while decoding ${what}",
        )
        .rule(
            r"^.*: \*\*\* Got error code \d+:FLAC__STREAM_DECODER_ERROR_STATUS_(?P<status>LOST_SYNC|BAD_HEADER|FRAME_CRC_MISMATCH)$",
            WarningKind::Corrupt,
            "decoder error ${status}",
        )
        .rule(
            r"^.*: \*\*\* Got error code \d+:FLAC__STREAM_DECODER_ERROR_STATUS_UNPARSEABLE_STREAM$",
            WarningKind::StreamError,
            "unparseable stream",
        )
        .rule(
            r"^.*: ERROR, MD5 signature mismatch$",
            WarningKind::Corrupt,
            "MD5 signature mismatch",
        )
}

/// oggz-validate, for Vorbis/Opus in Ogg containers
#[must_use]
pub fn oggz_validate() -> ValidatorSpec {
    ValidatorSpec::new(MediaType::Ogg, "oggz-validate", &["{path}"])
        .rule(
            r"^(?P<msg>serialno \d+ missing \*\*\* (?:eos|bos))$",
            WarningKind::StreamError,
            "${msg}",
        )
        .rule(r"^(?P<msg>.*[Tt]runcated.*)$", WarningKind::Truncated, "${msg}")
        .rule(
            r"^(?P<msg>.*(?:granulepos|out of order|packetno|[Pp]age ).*)$",
            WarningKind::Corrupt,
            "${msg}",
        )
}

/// Every built-in validator, one per media type
#[must_use]
pub fn builtin_specs() -> Vec<ValidatorSpec> {
    vec![mp3val(), flac(), oggz_validate()]
}
