use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}

/// Static file body, compiled in or loaded at startup.
pub fn asset_response(content_type: &str, content: impl Into<Body>) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", "public, max-age=3600")
        .body(content.into())
        .map_err(|_| ServerError::InternalError)
}

pub fn with_header(mut resp: Response, name: &'static str, value: &str) -> ResultResp {
    let value = value.parse().map_err(|_| ServerError::InternalError)?;
    resp.headers_mut().append(name, value);
    Ok(resp)
}
