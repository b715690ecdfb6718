pub mod errors;
pub mod files;
pub mod html;
pub mod json;
pub mod redirect;

pub use crate::errors::ResultResp;
pub use errors::error_response;
pub use files::{css_response, csv_response, xlsx_response, xml_response};
pub use html::html_response;
pub use json::json_response;
pub use redirect::{redirect, redirect_with_cookie};
