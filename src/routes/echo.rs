//! JSON echo endpoint.
//!
//! The body is parsed leniently: only requests that declare a JSON content
//! type are parsed, any JSON value (including scalars) is accepted, and a
//! missing body echoes back as an empty JSON response.
//!
//! Bodies are validated as a `RawValue`, which walks nesting without
//! recursion, so deeply nested documents echo back like shallow ones and
//! object keys keep their order.

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{
        header::{CONTENT_ENCODING, CONTENT_TYPE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use serde_json::value::RawValue;

use crate::config::CONTENT_TYPE_JSON;
use crate::error::AppError;

/// Optional JSON request body.
///
/// `None` when the body is empty or the request does not declare a JSON
/// content type. Invalid JSON is rejected with 400 before the handler runs.
#[derive(Debug)]
pub struct JsonBody(pub Option<Box<RawValue>>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(JsonBody(None));
        }
        check_charset(req.headers())?;
        // gzip and deflate were already inflated (and the header removed)
        check_content_encoding(req.headers())?;

        // Honours the DefaultBodyLimit layer (413 when exceeded)
        let bytes = Bytes::from_request(req, state).await?;
        if bytes.is_empty() {
            return Ok(JsonBody(None));
        }

        let value = serde_json::from_slice(&bytes)?;
        Ok(JsonBody(Some(value)))
    }
}

/// Echo handler.
///
/// Returns the parsed body unchanged, or an empty `application/json`
/// response when there was nothing to parse.
pub async fn echo(JsonBody(body): JsonBody) -> Response {
    let body = match body {
        Some(value) => Body::from(compact(value.get())),
        None => Body::empty(),
    };

    (
        StatusCode::OK,
        [(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON))],
        body,
    )
        .into_response()
}

/// Strip insignificant whitespace from already validated JSON text.
fn compact(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        } else if c == '"' {
            in_string = true;
        }
        out.push(c);
    }

    out
}

/// Media type without parameters, lowercased.
fn media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let essence = value.split(';').next()?.trim();
    Some(essence.to_ascii_lowercase())
}

/// `application/json` or any `application/*+json` type.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    match media_type(headers) {
        Some(mime) => {
            mime == CONTENT_TYPE_JSON
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        }
        None => false,
    }
}

/// JSON bodies must be UTF-8; an explicit other charset (including
/// `utf-16` and `utf-32`) is refused.
fn check_charset(headers: &HeaderMap) -> Result<(), AppError> {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return Ok(());
    };

    for param in value.split(';').skip(1) {
        let Some((name, charset)) = param.split_once('=') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case("charset") {
            continue;
        }
        let charset = charset.trim().trim_matches('"').to_ascii_lowercase();
        if charset != "utf-8" && charset != "utf8" {
            return Err(AppError::UnsupportedCharset(charset));
        }
    }

    Ok(())
}

/// Encodings left after request decompression are not supported.
fn check_content_encoding(headers: &HeaderMap) -> Result<(), AppError> {
    match headers.get(CONTENT_ENCODING) {
        None => Ok(()),
        Some(value) if value.as_bytes().eq_ignore_ascii_case(b"identity") => Ok(()),
        Some(value) => Err(AppError::UnsupportedEncoding(
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(is_json_content_type(&headers_with("application/json")));
        assert!(is_json_content_type(&headers_with("Application/JSON")));
        assert!(is_json_content_type(&headers_with("application/json; charset=utf-8")));
        assert!(is_json_content_type(&headers_with("application/merge-patch+json")));
    }

    #[test]
    fn test_non_json_content_types() {
        assert!(!is_json_content_type(&HeaderMap::new()));
        assert!(!is_json_content_type(&headers_with("text/plain")));
        assert!(!is_json_content_type(&headers_with("text/json")));
        assert!(!is_json_content_type(&headers_with("application/x-www-form-urlencoded")));
    }

    #[test]
    fn test_charset_utf8_accepted() {
        assert!(check_charset(&headers_with("application/json")).is_ok());
        assert!(check_charset(&headers_with("application/json; charset=UTF-8")).is_ok());
        assert!(check_charset(&headers_with("application/json; charset=\"utf8\"")).is_ok());
    }

    #[test]
    fn test_compact_strips_whitespace_outside_strings() {
        assert_eq!(
            compact("{ \"a b\" : [ 1 ,\n\t2 ] ,\r\n \"c\":\" x \" }"),
            r#"{"a b":[1,2],"c":" x "}"#
        );
    }

    #[test]
    fn test_compact_handles_escaped_quotes() {
        assert_eq!(compact(r#"[ "a\" b" , "\\" , "c" ]"#), r#"["a\" b","\\","c"]"#);
    }

    #[test]
    fn test_content_encoding() {
        assert!(check_content_encoding(&HeaderMap::new()).is_ok());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("identity"));
        assert!(check_content_encoding(&headers).is_ok());

        headers.insert(CONTENT_ENCODING, HeaderValue::from_static("br"));
        let err = check_content_encoding(&headers).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedEncoding(ref e) if e == "br"));
    }

    #[test]
    fn test_charset_other_rejected() {
        let err = check_charset(&headers_with("application/json; charset=latin1")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedCharset(ref c) if c == "latin1"));

        // Only UTF-8 is decoded; other UTF encodings are refused too
        let err = check_charset(&headers_with("application/json; charset=utf-16")).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedCharset(ref c) if c == "utf-16"));
    }
}
