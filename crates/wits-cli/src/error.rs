//! CLI-specific error types and mappings.

use thiserror::Error;
use wits_core::SettingsError;
use wits_openai::OpenAiError;
use wits_runtime::SessionError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument or session configuration error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (audio directory, terminal).
    #[error("IO error: {0}")]
    Io(String),

    /// Invalid application settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors talking to, or configuring, the OpenAI API.
    #[error(transparent)]
    OpenAi(#[from] OpenAiError),

    /// The debate session could not run.
    #[error("Session error: {0}")]
    Session(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::OpenAi(OpenAiError::MissingApiKey | OpenAiError::InvalidApiKey) => 78, // EX_CONFIG
            Self::OpenAi(OpenAiError::Authentication { .. }) => 77, // EX_NOPERM
            Self::OpenAi(_) => 69,                                  // EX_UNAVAILABLE
            Self::Session(_) => 1,
        }
    }

    /// Short user-facing summary printed above the detailed message.
    pub const fn headline(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi(err) => Some(err.user_message()),
            _ => None,
        }
    }

    /// Hints printed under the error message.
    pub const fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAi(err) => err.suggestions(),
            Self::Arguments(_) => &["Run `wits run --help` to see valid values"],
            Self::Config(_) => &["Check the DEFAULT_CHAT_MODEL, DEFAULT_TTS_MODEL and DEFAULT_TTS_VOICE variables"],
            Self::Io(_) | Self::Session(_) => &[],
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Config(config) => Self::Arguments(config.to_string()),
            SessionError::Generator(generator) => Self::Session(generator.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use wits_core::ConfigError;
    use wits_runtime::GeneratorError;

    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Io("x".into()).exit_code(), 74);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(CliError::OpenAi(OpenAiError::MissingApiKey).exit_code(), 78);
        assert_eq!(
            CliError::OpenAi(OpenAiError::from_status(401, "nope")).exit_code(),
            77
        );
        assert_eq!(
            CliError::OpenAi(OpenAiError::Connection("refused".into())).exit_code(),
            69
        );
        assert_eq!(CliError::Session("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_session_error_mapping() {
        let err: CliError = SessionError::Config(ConfigError::InvalidTurnsPerSide(2)).into();
        assert!(matches!(err, CliError::Arguments(_)));
        assert_eq!(err.exit_code(), 2);

        let err: CliError = SessionError::Generator(GeneratorError::NoRuntime).into();
        assert!(matches!(err, CliError::Session(_)));
    }

    #[test]
    fn test_openai_message_is_transparent() {
        let err = CliError::from(OpenAiError::InvalidApiKey);
        assert_eq!(err.to_string(), "Invalid OpenAI API key format");
        assert!(err.suggestions().iter().any(|s| s.contains("sk-")));
    }

    #[test]
    fn test_headline_only_for_openai_errors() {
        let err = CliError::from(OpenAiError::from_status(429, "quota"));
        assert_eq!(err.headline(), Some("OpenAI API usage limit reached"));
        assert!(err.to_string().contains("quota"));

        assert_eq!(CliError::Io("disk full".into()).headline(), None);
    }
}
