use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};

use crate::http::error::BadRequestError;
use crate::http::security::FailInfo;

/// HTTP-facing rendering of a non-success authentication outcome.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// The request carried no usable credential.
    #[display("{_0}")]
    BadRequest(BadRequestError),

    /// The credential was rejected.
    #[display("{message}")]
    Unauthorized { message: String },

    /// The verify callback failed. Details stay in the server log.
    #[display("authentication failed")]
    Internal,
}

impl From<FailInfo> for AuthError {
    fn from(info: FailInfo) -> Self {
        match info {
            FailInfo::BadRequest(err) => AuthError::BadRequest(err),
            FailInfo::Rejected(info) => AuthError::Unauthorized {
                message: info
                    .as_ref()
                    .and_then(|v| v.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("unauthorized")
                    .to_string(),
            },
        }
    }
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        }))
    }
}
