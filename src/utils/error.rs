use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuddyError {
    #[error("Missing argument: {message}")]
    MissingArgument { message: String },

    #[error("Cannot read file '{path}': {source}")]
    UnreadableFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate candidate name: {name}")]
    DuplicateCandidate { name: String },

    #[error("Candidate list needs at least two names, found {count}")]
    RosterTooSmall { count: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No confirmed pairing after {attempts} attempt(s)")]
    AlgorithmExhausted { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Algorithm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BuddyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuddyError::MissingArgument { .. }
            | BuddyError::UnreadableFile { .. }
            | BuddyError::DuplicateCandidate { .. }
            | BuddyError::RosterTooSmall { .. } => ErrorCategory::Input,
            BuddyError::ConfigError { .. } | BuddyError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            BuddyError::IoError(_) | BuddyError::SerializationError(_) => ErrorCategory::Storage,
            BuddyError::AlgorithmExhausted { .. } => ErrorCategory::Algorithm,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BuddyError::AlgorithmExhausted { .. } => ErrorSeverity::Medium,
            BuddyError::IoError(_) | BuddyError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BuddyError::MissingArgument { .. } => {
                "Pass the path to the candidate list, e.g. `lunch-buddies candidates.txt`".to_string()
            }
            BuddyError::UnreadableFile { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            BuddyError::DuplicateCandidate { name } => {
                format!("Remove the repeated '{}' line from the candidate list", name)
            }
            BuddyError::RosterTooSmall { .. } => {
                "Add at least two names to the candidate list".to_string()
            }
            BuddyError::IoError(_) => "Check file permissions and free disk space".to_string(),
            BuddyError::SerializationError(_) => {
                "Check that the history file is a valid JSON array of rounds".to_string()
            }
            BuddyError::ConfigError { .. } | BuddyError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line options".to_string()
            }
            BuddyError::AlgorithmExhausted { .. } => {
                "Run again, raise --max-attempts, or review the roster: someone may have already been paired with everyone".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BuddyError::MissingArgument { .. } => {
                "Please provide a filename for the list of candidates".to_string()
            }
            BuddyError::UnreadableFile { path, .. } => {
                format!("Could not read '{}'", path)
            }
            BuddyError::AlgorithmExhausted { attempts } => format!(
                "Gave up after {} attempt(s) without a confirmed pairing",
                attempts
            ),
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuddyError>;
