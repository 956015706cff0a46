use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = status_for(code);

        // Log the error before it gets converted into a status response.
        if status.is_server_error() || code == ErrorCode::StoreUnavailable {
            tracing::error!(error = %self, code = code.as_str(), "Request failed");
        } else {
            tracing::warn!(error = %self, code = code.as_str(), "Request rejected");
        }

        match self {
            AppError::InvalidInput(msg) => error_resp(status, code, Some(msg)),
            _ => error_resp(status, code, None),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::MissingCredentials
        | ErrorCode::InvalidCredentials
        | ErrorCode::MalformedToken
        | ErrorCode::ExpiredToken
        | ErrorCode::InvalidSignature
        | ErrorCode::RevokedToken
        | ErrorCode::StoreUnavailable => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    let body = match message {
        Some(msg) => serde_json::json!({ "code": code.as_str(), "message": msg }),
        None => serde_json::json!({ "code": code.as_str() }),
    };
    (status, Json(body)).into_response()
}
