// responses/files.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn attachment(content_type: &str, buffer: Vec<u8>, filename: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}

/// Return XLSX file as HTTP response
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    attachment(XLSX_MIME, buffer, filename)
}

pub fn csv_response(csv: String, filename: &str) -> ResultResp {
    attachment(mime::TEXT_CSV_UTF_8.as_ref(), csv.into_bytes(), filename)
}

fn inline(content_type: &str, body: String, cache: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", cache)
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

pub fn css_response(css: &str) -> ResultResp {
    inline(mime::TEXT_CSS_UTF_8.as_ref(), css.to_string(), "public, max-age=3600")
}

pub fn xml_response(xml: String) -> ResultResp {
    inline(mime::TEXT_XML.as_ref(), xml, "public, max-age=600")
}
