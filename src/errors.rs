use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, input checks) or downstream layers (DB, XLSX).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Validation(_) => 422,
            ServerError::DbError(_)
            | ServerError::XlsxError(_)
            | ServerError::Config(_)
            | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show to a visitor. Storage details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound => "Not Found".to_string(),
            ServerError::BadRequest(msg) | ServerError::Unauthorized(msg) => msg.clone(),
            ServerError::Validation(errs) => validation_summary(errs),
            _ => "Internal Server Error".to_string(),
        }
    }
}

/// Flatten field errors into `field: code` pairs, sorted so output is stable.
pub fn validation_summary(errs: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = errs
        .field_errors()
        .iter()
        .map(|(field, list)| {
            let reason = list
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .or_else(|| list.first().map(|e| e.code.to_string()))
                .unwrap_or_else(|| "invalid".to_string());
            format!("{field}: {reason}")
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(ServerError::NotFound.status(), 404);
        assert_eq!(ServerError::BadRequest("x".into()).status(), 400);
        assert_eq!(ServerError::Unauthorized("x".into()).status(), 401);
        assert_eq!(ServerError::DbError("x".into()).status(), 500);
    }

    #[test]
    fn db_errors_do_not_leak_details() {
        let err = ServerError::DbError("no such table: cars".into());
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(err.to_string().contains("no such table"));
    }
}
