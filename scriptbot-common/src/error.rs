// ================================================================
// File: scriptbot-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not found error: {0}")]
    NotFound(String),

    #[error("Duplicate script name: {0}")]
    DuplicateName(String),

    #[error("Invalid script code: {0}")]
    InvalidCode(String),

    #[error("Invalid script name: {0}")]
    InvalidName(String),

    /// The data file could not be written. The in-memory store is left untouched.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A tracked menu message could not be fetched or edited.
    #[error("Menu unreachable: {0}")]
    MenuUnreachable(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// Something failed after the interaction was already answered, so no
    /// error reply can be sent for it.
    #[error("Interaction already answered: {0}")]
    Answered(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Short text shown (ephemerally) to whoever invoked the failing command.
    pub fn user_message(&self) -> String {
        match self {
            Error::DuplicateName(name) => format!("A script named `{name}` already exists."),
            Error::InvalidCode(_) => "Script code must start with `loadstring`.".to_string(),
            Error::InvalidName(_) => "Script name cannot be empty.".to_string(),
            Error::NotFound(name) => format!("Script `{name}` not found."),
            Error::Auth(_) => "You need administrator permission to do that.".to_string(),
            Error::Persistence(_) | Error::Io(_) | Error::Json(_) => {
                "Could not save scripts, nothing was changed.".to_string()
            }
            other => format!("Something went wrong: {other}"),
        }
    }

    /// False when the invoker has already been answered and a second reply
    /// would be rejected.
    pub fn needs_reply(&self) -> bool {
        !matches!(self, Error::Answered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_names_the_script() {
        let msg = Error::DuplicateName("hello".into()).user_message();
        assert!(msg.contains("`hello`"));

        let msg = Error::NotFound("gone".into()).user_message();
        assert!(msg.contains("`gone`"));
    }

    #[test]
    fn persistence_failures_say_nothing_changed() {
        let msg = Error::Persistence("disk full".into()).user_message();
        assert!(msg.contains("nothing was changed"));
    }

    #[test]
    fn answered_interactions_get_no_second_reply() {
        assert!(!Error::Answered("menu read-back failed".into()).needs_reply());
        assert!(Error::Platform("boom".into()).needs_reply());
        assert!(Error::NotFound("x".into()).needs_reply());
    }
}
