use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors raised while turning a request into a handler input.
///
/// All variants are client errors; none of them affect other requests.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    #[error("Unsupported content encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Failed to read request body: {0}")]
    Body(#[from] BytesRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedCharset(_) | AppError::UnsupportedEncoding(_) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = status.as_u16(), error = %self, "Rejected request");

        (status, self.to_string()).into_response()
    }
}
