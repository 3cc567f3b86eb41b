use std::path::Path;

use thiserror::Error;

/// Reasons a single match descriptor is skipped. These never abort a show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid match descriptor {descriptor:?}: {reason}")]
    Parse { descriptor: String, reason: String },

    #[error("wrestler {name:?} from {descriptor:?} is not on the roster")]
    UnknownPlayer { descriptor: String, name: String },
}

impl MatchError {
    pub fn parse(descriptor: &str, reason: impl Into<String>) -> Self {
        MatchError::Parse {
            descriptor: descriptor.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown_player(descriptor: &str, name: &str) -> Self {
        MatchError::UnknownPlayer {
            descriptor: descriptor.to_string(),
            name: name.to_string(),
        }
    }
}

/// Add context to document read errors
pub fn read_context(path: &Path) -> String {
    format!("Failed to read {}", path.display())
}

/// Add context to document parse errors
pub fn parse_context(path: &Path) -> String {
    format!("Failed to parse JSON from {}", path.display())
}

/// Add context to document write errors
pub fn write_context(path: &Path) -> String {
    format!("Failed to write {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_player_message_names_the_wrestler() {
        let err = MatchError::unknown_player("Singles: Ghost vs Narky", "Ghost");
        assert!(err.to_string().contains("\"Ghost\""));
        assert!(err.to_string().contains("Singles: Ghost vs Narky"));
    }
}
