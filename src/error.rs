//! Errors surfaced by the public entry points.
//!
//! Only discovery-level conditions (and a parser failure at the crate
//! boundary) abort an analysis. Everything structural is silent.

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_MISSING_DEFINITION: &str = "DOCGEN-ERR-MISSING-DEFINITION";
pub const ERR_AMBIGUOUS_EXPORT: &str = "DOCGEN-ERR-AMBIGUOUS-EXPORT";
pub const ERR_PARSE: &str = "DOCGEN-ERR-PARSE";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocgenError {
    #[error("No suitable component definition found.")]
    MissingDefinition,

    #[error("Multiple exported component definitions found.")]
    AmbiguousExport { count: usize },

    #[error("Failed to parse module: {message}")]
    Parse { message: String },
}

impl DocgenError {
    pub fn code(&self) -> &'static str {
        match self {
            DocgenError::MissingDefinition => ERR_MISSING_DEFINITION,
            DocgenError::AmbiguousExport { .. } => ERR_AMBIGUOUS_EXPORT,
            DocgenError::Parse { .. } => ERR_PARSE,
        }
    }
}

pub type Result<T, E = DocgenError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_contract() {
        assert_eq!(
            DocgenError::MissingDefinition.to_string(),
            "No suitable component definition found."
        );
        assert_eq!(
            DocgenError::AmbiguousExport { count: 2 }.to_string(),
            "Multiple exported component definitions found."
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(DocgenError::MissingDefinition.code(), ERR_MISSING_DEFINITION);
        assert_eq!(
            DocgenError::Parse {
                message: "x".into()
            }
            .code(),
            ERR_PARSE
        );
    }
}
