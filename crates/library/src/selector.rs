//! Query terms narrowing which items a command operates on

use bitcheck_errors::{Error, LibraryError};
use bitcheck_types::{Item, MediaType};

const TYPE_PREFIX: &str = "type:";

/// Conjunction of query terms
///
/// `type:<media>` restricts the media type, any other term must occur in the
/// item path (case-sensitive). The empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    media_type: Option<MediaType>,
    fragments: Vec<String>,
}

impl Selector {
    /// Selector matching every item
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse CLI query terms
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::InvalidSelector` for an unknown media type or
    /// two conflicting `type:` terms.
    pub fn parse<S: AsRef<str>>(terms: &[S]) -> Result<Self, Error> {
        let mut selector = Self::default();
        for term in terms {
            let term = term.as_ref();
            if let Some(name) = term.strip_prefix(TYPE_PREFIX) {
                let media = MediaType::parse(name).ok_or_else(|| LibraryError::InvalidSelector {
                    term: term.to_string(),
                    reason: format!("unknown media type '{name}'"),
                })?;
                if selector.media_type.is_some_and(|m| m != media) {
                    return Err(LibraryError::InvalidSelector {
                        term: term.to_string(),
                        reason: "conflicting type terms".to_string(),
                    }
                    .into());
                }
                selector.media_type = Some(media);
            } else if !term.is_empty() {
                selector.fragments.push(term.to_string());
            }
        }
        Ok(selector)
    }

    #[must_use]
    pub fn media_type(&self) -> Option<MediaType> {
        self.media_type
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if self.media_type.is_some_and(|m| m != item.media_type) {
            return false;
        }
        let path = item.path.to_string_lossy();
        self.fragments.iter().all(|f| path.contains(f.as_str()))
    }
}
