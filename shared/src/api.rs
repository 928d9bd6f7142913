use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub use crate::models::{Inquiry as InquiryResponse, Product};

// ============================================================================
// Auth API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please enter both username and password."))]
    pub username: String,

    #[validate(length(min = 1, message = "Please enter both username and password."))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(
        email(message = "Email should be valid"),
        length(max = 100, message = "Email cannot exceed 100 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, max = 100, message = "Password must be between 8 and 100 characters"))]
    pub password: String,
}

/// Body returned by `POST /auth/login`.
///
/// The token is optional on the wire so that a 2xx response without one can
/// be reported as a failed login rather than a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
}

// ============================================================================
// Product API Types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: Option<String>,
}

impl ProductQuery {
    pub fn search(term: impl Into<String>) -> Self {
        let term = term.into();
        Self {
            search: (!term.trim().is_empty()).then(|| term.trim().to_string()),
        }
    }

    /// Query pairs to append to the request; `search` is omitted when empty.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.search
            .iter()
            .map(|term| ("search".to_string(), term.clone()))
            .collect()
    }
}

// ============================================================================
// Inquiry API Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    pub product_id: i64,

    #[validate(length(min = 3, max = 200, message = "Subject must be between 3 and 200 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Please fill in both Subject and Message fields."))]
    pub message: String,
}

// ============================================================================
// Contact API Types
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Please fill in all required fields."),
        email(message = "Email should be valid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub subject: String,

    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub message: String,
}

// ============================================================================
// Error Types
// ============================================================================

/// Error body produced by the gateway's services.
///
/// Every field is optional: proxies and the gateway itself may answer with a
/// partial body, or none at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Best human-readable line: `message`, then `details`, then `error`.
    pub fn display_message(&self) -> Option<&str> {
        [&self.message, &self.details, &self.error]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}

/// Flatten validator output into one line, one message per distinct failure.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let mut messages: Vec<String> = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }
    messages.join(" ")
}
