use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Not authorized to view this page")]
    NotAuthenticated,
    #[error("Username and password required")]
    MissingCredentials,
    #[error("User already exists")]
    UserExists,
    #[error("Complaint text and location are required")]
    MissingComplaintFields,
    #[error("Spam or meaningless complaints are not allowed")]
    SpamComplaint,
    #[error("Forbidden")]
    Forbidden,
    #[error("Generic error {0}")]
    AnyhowError(#[from] anyhow::Error),
    #[error("Stored value unreadable {0}")]
    ParseValue(#[from] soapbox_api_types::ParseValueError),
}

impl WebError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            WebError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            WebError::MissingCredentials
            | WebError::UserExists
            | WebError::MissingComplaintFields
            | WebError::SpamComplaint => StatusCode::BAD_REQUEST,
            WebError::Forbidden => StatusCode::FORBIDDEN,
            WebError::AnyhowError(_) | WebError::ParseValue(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Error returned {self:?}");
        // Pages behind a login bounce back to the login form instead of
        // showing a bare 401.
        if let WebError::NotAuthenticated = self {
            return Redirect::to("/").into_response();
        }
        (self.as_status_code(), format!("{self}")).into_response()
    }
}
