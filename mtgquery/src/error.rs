//! Node-level query error values.
//!
//! These never unwind: a leaf that detects one of these conditions stores the
//! rendered message on its own AST node and contributes an all-zero buffer to
//! its parent (see `engine::eval`). The exact wording is part of the public
//! contract — hosts match on it to drive the query-debugger UI.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryErrorKind {
    #[error("unknown field \"{0}\"")]
    UnknownField(String),

    #[error("unknown format \"{0}\"")]
    UnknownFormat(String),

    #[error("unknown keyword \"{0}\"")]
    UnknownKeyword(String),

    #[error("unsupported keyword \"{0}\"")]
    UnsupportedKeyword(String),

    #[error("invalid regex")]
    InvalidRegex,

    #[error("printing data not loaded")]
    PrintingNotLoaded,

    #[error("a card cannot be both colored and colorless")]
    ColorColorlessContradiction,

    #[error("unknown set \"{0}\"")]
    UnknownSet(String),

    #[error("unknown rarity \"{0}\"")]
    UnknownRarity(String),

    #[error("invalid price \"{0}\"")]
    InvalidPrice(String),

    #[error("unknown frame \"{0}\"")]
    UnknownFrame(String),

    #[error("invalid year \"{0}\"")]
    InvalidYear(String),

    #[error("invalid date \"{0}\" (expected YYYY-MM-DD, \"now\", or a set code)")]
    InvalidDate(String),

    #[error("unknown printing field \"{0}\"")]
    UnknownPrintingField(String),
}

impl QueryErrorKind {
    /// Render using the exact message catalog text (`Display` already does this;
    /// this helper avoids an explicit `.to_string()` at every call site).
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_catalog() {
        assert_eq!(
            QueryErrorKind::UnknownField("pow".into()).message(),
            "unknown field \"pow\""
        );
        assert_eq!(
            QueryErrorKind::ColorColorlessContradiction.message(),
            "a card cannot be both colored and colorless"
        );
        assert_eq!(
            QueryErrorKind::InvalidDate("2020-99-99".into()).message(),
            "invalid date \"2020-99-99\" (expected YYYY-MM-DD, \"now\", or a set code)"
        );
        assert_eq!(QueryErrorKind::InvalidRegex.message(), "invalid regex");
        assert_eq!(
            QueryErrorKind::PrintingNotLoaded.message(),
            "printing data not loaded"
        );
    }
}
