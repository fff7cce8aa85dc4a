use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricerError {
    /// 送出前的表單檢查失敗 (例如尚未選擇機型)
    #[error("{message}")]
    ValidationError { message: String },

    /// 後端回應失敗，或回應內容表示計算失敗
    #[error("{message}")]
    RequestError { message: String },

    #[error("Price calculation timed out after {after:?}. Please try again.")]
    Timeout { after: Duration },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Request,
    Configuration,
    System,
}

impl PricerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::RequestError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::RequestError { .. }
            | Self::Timeout { .. }
            | Self::Http(_)
            | Self::SerializationError(_) => ErrorCategory::Request,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// 給終端使用者看的訊息，會寫進錯誤區塊
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Http(_) | Self::SerializationError(_) => {
                "Failed to calculate price. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Pick a device model from the list before submitting",
            ErrorCategory::Request => "Check that the calculator endpoint is reachable and resubmit",
            ErrorCategory::Configuration => "Review the configuration file and CLI arguments",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, PricerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_displays_server_message_verbatim() {
        let err = PricerError::request("Model not supported");
        assert_eq!(err.to_string(), "Model not supported");
        assert_eq!(err.user_friendly_message(), "Model not supported");
        assert_eq!(err.category(), ErrorCategory::Request);
    }

    #[test]
    fn test_timeout_is_request_category() {
        let err = PricerError::Timeout {
            after: Duration::from_secs(5),
        };
        assert_eq!(err.category(), ErrorCategory::Request);
        assert!(err.to_string().contains("after 5s."));

        let err = PricerError::Timeout {
            after: Duration::from_millis(50),
        };
        assert!(err.to_string().contains("after 50ms."));
    }

    #[test]
    fn test_serialization_error_hides_details_from_user() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PricerError::from(parse_err);
        assert_eq!(
            err.user_friendly_message(),
            "Failed to calculate price. Please try again."
        );
    }
}
