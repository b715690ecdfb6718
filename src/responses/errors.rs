use crate::errors::ServerError;
use crate::i18n::Locale;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};

/// Convert a ServerError into an HTML page in the visitor's locale, or
/// `{"error": ..}` for API callers.
pub fn error_response(err: &ServerError, as_json: bool, locale: Locale) -> Response {
    let status = err.status();
    let message = err.public_message();

    let (content_type, body) = if as_json {
        (
            mime::APPLICATION_JSON.as_ref(),
            serde_json::json!({ "error": message }).to_string(),
        )
    } else {
        (
            mime::TEXT_HTML_UTF_8.as_ref(),
            error_page(locale, status, &message).into_string(),
        )
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
