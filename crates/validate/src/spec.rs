//! Declarative validator definitions

use bitcheck_types::{MediaType, WarningKind};
use std::ffi::OsString;
use std::path::Path;

/// Placeholder replaced by the file path in argument templates
pub const PATH_PLACEHOLDER: &str = "{path}";

/// One line-classification rule
///
/// `pattern` is matched against a single output line. `template` builds the
/// warning message and may reference named captures as `${name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub pattern: String,
    pub kind: WarningKind,
    pub template: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, kind: WarningKind, template: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind,
            template: template.into(),
        }
    }
}

/// External structural validator for one media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorSpec {
    pub media_type: MediaType,
    /// Executable name, resolved on the search path
    pub tool: String,
    /// Argument template; `{path}` is substituted per file
    pub args: Vec<String>,
    /// Ordered rules, first match wins per line
    pub rules: Vec<Rule>,
}

impl ValidatorSpec {
    pub fn new(media_type: MediaType, tool: impl Into<String>, args: &[&str]) -> Self {
        Self {
            media_type,
            tool: tool.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
            rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn rule(mut self, pattern: &str, kind: WarningKind, template: &str) -> Self {
        self.rules.push(Rule::new(pattern, kind, template));
        self
    }

    /// Arguments for checking `path`
    #[must_use]
    pub fn expand_args(&self, path: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| {
                if arg == PATH_PLACEHOLDER {
                    path.as_os_str().to_os_string()
                } else if arg.contains(PATH_PLACEHOLDER) {
                    OsString::from(arg.replace(PATH_PLACEHOLDER, &path.to_string_lossy()))
                } else {
                    OsString::from(arg)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_args_substitutes_path() {
        let spec = ValidatorSpec::new(MediaType::Flac, "flac", &["--test", "{path}"]);
        let args = spec.expand_args(Path::new("/m/a b.flac"));
        assert_eq!(args, vec![OsString::from("--test"), OsString::from("/m/a b.flac")]);
    }

    #[test]
    fn test_expand_args_inside_argument() {
        let spec = ValidatorSpec::new(MediaType::Mp3, "tool", &["--file={path}"]);
        let args = spec.expand_args(Path::new("/x.mp3"));
        assert_eq!(args, vec![OsString::from("--file=/x.mp3")]);
    }
}
