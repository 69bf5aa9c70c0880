//! Integration tests for validator execution and classification

use bitcheck_types::{MediaType, Warning, WarningKind};
use bitcheck_validate::{builtin, SearchPath, ToolRegistry, ToolRunner, ValidatorRunner};
use proptest::prelude::*;

#[cfg(unix)]
mod process {
    use super::*;
    use bitcheck_errors::{Error, ValidatorError};
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::time::Duration;

    fn write_tool(dir: &Path, name: &str, body: &str) {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[tokio::test]
    async fn test_runner_captures_stdout_then_stderr() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(
            dir.path(),
            "mp3val",
            r#"echo "INFO: \"$1\": 3 MPEG frames"
echo "WARNING: \"$1\" (offset 0x10): It seems that file is truncated or there is garbage at the end of the file"
echo "Done!" >&2
exit 0"#,
        );

        let runner = ValidatorRunner::new(SearchPath::from_dirs([dir.path()]).unwrap());
        let spec = builtin::mp3val();
        let raw = runner.run(&spec, Path::new("/m/song.mp3")).await.unwrap();

        assert!(raw.success());
        let lines: Vec<_> = raw.output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "INFO: \"/m/song.mp3\": 3 MPEG frames");
        assert_eq!(lines[2], "Done!");

        let registry = ToolRegistry::builtin().unwrap();
        let warnings = registry.classify(MediaType::Mp3, &raw.output);
        assert_eq!(
            warnings,
            vec![Warning::new(
                WarningKind::Truncated,
                "It seems that file is truncated or there is garbage at the end of the file"
            )]
        );
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(
            dir.path(),
            "flac",
            r#"echo "$3: ERROR while decoding data" >&2
exit 1"#,
        );

        let runner = ValidatorRunner::new(SearchPath::from_dirs([dir.path()]).unwrap());
        let raw = runner
            .run(&builtin::flac(), Path::new("/m/t.flac"))
            .await
            .unwrap();
        assert_eq!(raw.status, Some(1));

        let registry = ToolRegistry::builtin().unwrap();
        let warnings = registry.classify(MediaType::Flac, &raw.output);
        assert_eq!(
            warnings,
            vec![Warning::new(WarningKind::DecodeError, "while decoding data")]
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_validator() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), "oggz-validate", "sleep 5");

        let runner = ValidatorRunner::new(SearchPath::from_dirs([dir.path()]).unwrap())
            .with_timeout(Some(Duration::from_millis(200)));
        let err = runner
            .run(&builtin::oggz_validate(), Path::new("/m/x.ogg"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validator(ValidatorError::TimedOut { .. })
        ));
    }

    #[tokio::test]
    async fn test_availability_follows_search_path() {
        let dir = tempfile::tempdir().unwrap();
        write_tool(dir.path(), "mp3val", "exit 0");

        let registry = ToolRegistry::builtin().unwrap();
        let search = SearchPath::from_dirs([dir.path()]).unwrap();
        let mp3 = registry.lookup(MediaType::Mp3).unwrap();
        let ogg = registry.lookup(MediaType::Ogg).unwrap();
        assert!(registry.is_available(mp3, &search));
        assert!(!registry.is_available(ogg, &search));
    }
}

const OGG_LINES: &[&str] = &[
    "serialno 1038587646 missing *** eos",
    "serialno 7 missing *** bos",
    "/m/x.ogg: Error:",
    "serialno 00000001: granulepos decreasing within packet",
    "noise that no rule knows",
    "",
];

proptest! {
    #[test]
    fn classify_is_line_wise_and_order_preserving(
        picks in proptest::collection::vec(0..OGG_LINES.len(), 0..40)
    ) {
        let registry = ToolRegistry::builtin().unwrap();
        let lines: Vec<&str> = picks.iter().map(|&i| OGG_LINES[i]).collect();
        let raw = lines.join("\n");

        let whole = registry.classify(MediaType::Ogg, &raw);
        let piecewise: Vec<Warning> = lines
            .iter()
            .flat_map(|line| registry.classify(MediaType::Ogg, line))
            .collect();

        prop_assert_eq!(&whole, &piecewise);
        prop_assert_eq!(whole, registry.classify(MediaType::Ogg, &raw));
    }
}
