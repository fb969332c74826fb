use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Transport request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Widget error: {message}")]
    WidgetError { message: String },

    #[error("Widgets already initialized")]
    AlreadyInitialized,

    #[error("Notification queue is closed")]
    NotificationClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Ui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::Http { .. } | DashError::Transport(_) => ErrorCategory::Network,
            DashError::IoError(_) | DashError::SerializationError(_) => ErrorCategory::Data,
            DashError::TomlError(_)
            | DashError::UrlError(_)
            | DashError::ConfigError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::ValidationError { .. } => ErrorCategory::Configuration,
            DashError::WidgetError { .. }
            | DashError::AlreadyInitialized
            | DashError::NotificationClosed => ErrorCategory::Ui,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DashError::AlreadyInitialized => ErrorSeverity::Low,
            DashError::Http { status } if *status < 500 => ErrorSeverity::High,
            DashError::Http { .. } | DashError::Transport(_) => ErrorSeverity::Medium,
            DashError::SerializationError(_)
            | DashError::ValidationError { .. }
            | DashError::NotificationClosed => ErrorSeverity::High,
            DashError::IoError(_)
            | DashError::TomlError(_)
            | DashError::UrlError(_)
            | DashError::ConfigError { .. }
            | DashError::InvalidConfigValueError { .. }
            | DashError::WidgetError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Status code carried by an HTTP failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            DashError::Http { status } => Some(*status),
            DashError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashError::Http { status } => format!("The server answered with status {}", status),
            DashError::Transport(_) => "Could not reach the dashboard server".to_string(),
            DashError::IoError(e) => format!("File access failed: {}", e),
            DashError::SerializationError(_) => "The server response was not valid JSON".to_string(),
            DashError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            DashError::UrlError(e) => format!("The URL could not be parsed: {}", e),
            DashError::ConfigError { message } => format!("Configuration problem: {}", message),
            DashError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            DashError::ValidationError { message } => format!("Invalid input: {}", message),
            DashError::WidgetError { message } => format!("UI widgets could not be created: {}", message),
            DashError::AlreadyInitialized => "Widgets were already initialized".to_string(),
            DashError::NotificationClosed => "Notifications are no longer being delivered".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => match self.status() {
                Some(404) => "Check that the resource path exists on the server",
                Some(s) if s >= 500 => "The server failed; try again later or check its logs",
                _ => "Check the base URL and that the server is running",
            },
            ErrorCategory::Data => "Check the input file or the server response format",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags",
            ErrorCategory::Ui => "Make sure the widget toolkit is loaded before the document is ready",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
