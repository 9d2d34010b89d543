pub mod errors;
pub mod html;
pub mod json;

pub use errors::{error_to_response, ResultResp};
pub use html::{asset_response, html_response, with_header};
pub use json::json_response;
