use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common_utils::errors::ErrorSwitch;
use domain_types::errors::{ApplicationErrorResponse, DonationError};
use serde::Serialize;

use crate::logger;

#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    message: String,
    code: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: ErrorDetail {
                message: self.message.clone(),
                code: format!("{}", self.status.as_u16()),
            },
        });
        (self.status, body).into_response()
    }
}

impl From<ApplicationErrorResponse> for HttpError {
    fn from(error: ApplicationErrorResponse) -> Self {
        let status = match error {
            ApplicationErrorResponse::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApplicationErrorResponse::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationErrorResponse::Conflict(_) => StatusCode::CONFLICT,
            ApplicationErrorResponse::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApplicationErrorResponse::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status,
            message: error.api_error().error_message.clone(),
        }
    }
}

impl From<error_stack::Report<DonationError>> for HttpError {
    fn from(report: error_stack::Report<DonationError>) -> Self {
        let response: ApplicationErrorResponse = report.current_context().switch();
        if response.api_error().error_identifier >= 500 {
            logger::error!(error = ?report, "request failed");
        } else {
            logger::warn!(error = %report.current_context(), "request rejected");
        }
        Self::from(response)
    }
}

#[cfg(test)]
mod tests {
    use error_stack::report;

    use super::*;

    #[test]
    fn server_errors_hide_the_cause() {
        let error = HttpError::from(report!(DonationError::MissingConfiguration {
            key: "payu.merchant_salt"
        }));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "Something went wrong");
    }

    #[test]
    fn validation_errors_name_the_field() {
        let error = HttpError::from(report!(DonationError::MissingRequiredField {
            field_name: "email"
        }));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "Missing required field: email");
    }
}
