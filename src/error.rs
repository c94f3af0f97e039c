//! Error types for the fika-rota crate.

/// Error type for all fallible operations in the fika-rota crate.
#[derive(Debug, thiserror::Error)]
pub enum RotaError {
    /// Malformed constraint or calendar input.
    #[error("configuration error: {message}")]
    Configuration {
        /// What was wrong with the input.
        message: String,
    },

    /// A participant was not present in the active roster.
    ///
    /// Non-fatal: callers log it and carry on.
    #[error("{id} is not in the list of participants")]
    ParticipantNotFound {
        /// The missing identifier.
        id: String,
    },

    /// The matcher rejected too many consecutive draws.
    #[error("no valid pairing found after {attempts} attempts with {remaining} participants left")]
    MatchingExhausted {
        /// Number of draws tried for the current pair.
        attempts: usize,
        /// Working-set size when the cap was hit.
        remaining: usize,
    },

    /// A record file line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// An identifier is empty, contains whitespace, or collides with a record token.
    #[error("invalid participant identifier {id:?}")]
    InvalidIdentifier {
        /// The rejected identifier.
        id: String,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RotaError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RotaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_configuration() {
        let e = RotaError::config("pair must have exactly 2 members, got 3");
        assert_eq!(
            e.to_string(),
            "configuration error: pair must have exactly 2 members, got 3"
        );
    }

    #[test]
    fn error_participant_not_found() {
        let e = RotaError::ParticipantNotFound { id: "Ann".into() };
        assert_eq!(e.to_string(), "Ann is not in the list of participants");
    }

    #[test]
    fn error_matching_exhausted() {
        let e = RotaError::MatchingExhausted {
            attempts: 10,
            remaining: 4,
        };
        assert_eq!(
            e.to_string(),
            "no valid pairing found after 10 attempts with 4 participants left"
        );
    }

    #[test]
    fn error_parse() {
        let e = RotaError::parse(3, "expected 4 fields, got 2");
        assert_eq!(e.to_string(), "line 3: expected 4 fields, got 2");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<RotaError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<RotaError>();
    }
}
