use serde::Deserialize;
use thiserror::Error;

pub const GENERIC_FAILURE: &str = "Something went wrong, please try again";
pub const CONNECTION_FAILURE: &str = "Could not reach the server";

// App Errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
  #[error("Validation error: {0}")]
  Validation(String),
  #[error("Connection error: {0}")]
  Connection(String),
  #[error("Server error ({status}): {}", detail.as_deref().unwrap_or("no details"))]
  Server { status: u16, detail: Option<String> },
  #[error("Deserialize error: {0}")]
  Deserialize(String),
}

impl AppError {
  /// Message shown to the user in a notification.
  /// Validation and server-provided details pass through verbatim.
  pub fn user_message(&self) -> String {
    match self {
      AppError::Validation(msg) => msg.clone(),
      AppError::Server { detail: Some(detail), .. } => detail.clone(),
      AppError::Connection(_) => CONNECTION_FAILURE.to_string(),
      AppError::Server { detail: None, .. } | AppError::Deserialize(_) => GENERIC_FAILURE.to_string(),
    }
  }

  pub fn is_transport(&self) -> bool {
    matches!(self, AppError::Connection(_))
  }
}

/// Error payload returned by the backend on rejected requests.
/// `detail` is either a plain string or a list of `{msg, ..}` objects.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
  pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
  pub fn message(&self) -> Option<String> {
    match self.detail.as_ref()? {
      serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
      serde_json::Value::Array(items) => items
        .iter()
        .find_map(|item| item.get("msg").and_then(|m| m.as_str()))
        .map(str::to_string),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn server_detail_is_passed_through_verbatim() {
    let err = AppError::Server { status: 400, detail: Some("Category type mismatch".to_string()) };

    assert_eq!(err.user_message(), "Category type mismatch");
  }

  #[test]
  fn missing_detail_falls_back_to_generic_message() {
    let err = AppError::Server { status: 500, detail: None };

    assert_eq!(err.user_message(), GENERIC_FAILURE);
    assert_eq!(AppError::Connection("refused".into()).user_message(), CONNECTION_FAILURE);
  }

  #[test]
  fn reads_string_detail() {
    let body: ErrorBody = serde_json::from_str(r#"{"detail": "Category 7 not found"}"#).unwrap();

    assert_eq!(body.message().as_deref(), Some("Category 7 not found"));
  }

  #[test]
  fn reads_first_message_of_validation_detail() {
    let body: ErrorBody = serde_json::from_str(
      r#"{"detail": [{"loc": ["body", "amount"], "msg": "Input should be greater than 0", "type": "greater_than"}]}"#,
    )
    .unwrap();

    assert_eq!(body.message().as_deref(), Some("Input should be greater than 0"));
  }

  #[test]
  fn blank_or_absent_detail_has_no_message() {
    let blank: ErrorBody = serde_json::from_str(r#"{"detail": "  "}"#).unwrap();
    let absent: ErrorBody = serde_json::from_str(r#"{}"#).unwrap();

    assert_eq!(blank.message(), None);
    assert_eq!(absent.message(), None);
  }
}
