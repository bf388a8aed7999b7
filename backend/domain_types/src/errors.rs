use common_utils::errors::ErrorSwitch;

use crate::donation::DonationStatus;

/// Errors raised while handling donation orders and gateway callbacks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DonationError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Invalid value for field: {field_name}")]
    InvalidDataFormat { field_name: &'static str },
    #[error("Server configuration is missing {key}")]
    MissingConfiguration { key: &'static str },
    #[error("Callback source verification failed")]
    SourceVerificationFailed,
    #[error("Donation {txnid} was not found")]
    DonationNotFound { txnid: String },
    #[error("Cannot move donation from {from} to {to}")]
    InvalidStatusTransition {
        from: DonationStatus,
        to: DonationStatus,
    },
    #[error("Donation store operation failed")]
    StoreFailure,
    #[error("Receipt email could not be delivered")]
    ReceiptDeliveryFailed,
}

/// Errors of a [`DonationStore`](../interfaces/store/trait.DonationStore.html) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Donation {txnid} was not found")]
    NotFound { txnid: String },
    #[error("Cannot move donation from {from} to {to}")]
    InvalidStatusTransition {
        from: DonationStatus,
        to: DonationStatus,
    },
    #[error("Donation store is unavailable")]
    Unavailable,
}

/// Errors of a receipt mailer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    #[error("Failed to construct the email client")]
    ClientConstructionFailed,
    #[error("Failed to encode the email request")]
    RequestEncodingFailed,
    #[error("Email request was not sent: {0}")]
    RequestNotSent(String),
    #[error("Email request timed out")]
    RequestTimeoutReceived,
    #[error("Email provider rejected the request with status {status_code}")]
    UnexpectedResponse { status_code: u16 },
}

impl ErrorSwitch<DonationError> for StoreError {
    fn switch(&self) -> DonationError {
        match self {
            Self::NotFound { txnid } => DonationError::DonationNotFound {
                txnid: txnid.clone(),
            },
            Self::InvalidStatusTransition { from, to } => DonationError::InvalidStatusTransition {
                from: *from,
                to: *to,
            },
            Self::Unavailable => DonationError::StoreFailure,
        }
    }
}

impl ErrorSwitch<DonationError> for MailerError {
    fn switch(&self) -> DonationError {
        DonationError::ReceiptDeliveryFailed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ApiError {
    pub sub_code: String,
    pub error_identifier: u16,
    pub error_message: String,
}

impl ApiError {
    fn new(sub_code: &str, error_identifier: u16, error_message: impl Into<String>) -> Self {
        Self {
            sub_code: sub_code.to_string(),
            error_identifier,
            error_message: error_message.into(),
        }
    }
}

/// Errors as they are exposed to API callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationErrorResponse {
    #[error("{}", .0.error_message)]
    BadRequest(ApiError),
    #[error("{}", .0.error_message)]
    NotFound(ApiError),
    #[error("{}", .0.error_message)]
    Conflict(ApiError),
    #[error("{}", .0.error_message)]
    BadGateway(ApiError),
    #[error("{}", .0.error_message)]
    InternalServerError(ApiError),
}

impl ApplicationErrorResponse {
    pub fn api_error(&self) -> &ApiError {
        match self {
            Self::BadRequest(api_error)
            | Self::NotFound(api_error)
            | Self::Conflict(api_error)
            | Self::BadGateway(api_error)
            | Self::InternalServerError(api_error) => api_error,
        }
    }
}

/// Message returned for every server side failure; the cause is only logged.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Something went wrong";

impl ErrorSwitch<ApplicationErrorResponse> for DonationError {
    fn switch(&self) -> ApplicationErrorResponse {
        match self {
            Self::MissingRequiredField { .. } | Self::InvalidDataFormat { .. } => {
                ApplicationErrorResponse::BadRequest(ApiError::new(
                    "BAD_REQUEST",
                    400,
                    self.to_string(),
                ))
            }
            Self::SourceVerificationFailed => ApplicationErrorResponse::BadRequest(ApiError::new(
                "INVALID_CALLBACK_SIGNATURE",
                400,
                self.to_string(),
            )),
            Self::DonationNotFound { .. } => {
                ApplicationErrorResponse::NotFound(ApiError::new("NOT_FOUND", 404, self.to_string()))
            }
            Self::InvalidStatusTransition { .. } => ApplicationErrorResponse::Conflict(
                ApiError::new("INVALID_STATUS_TRANSITION", 409, self.to_string()),
            ),
            Self::ReceiptDeliveryFailed => ApplicationErrorResponse::BadGateway(ApiError::new(
                "RECEIPT_DELIVERY_FAILED",
                502,
                self.to_string(),
            )),
            Self::MissingConfiguration { .. } | Self::StoreFailure => {
                ApplicationErrorResponse::InternalServerError(ApiError::new(
                    "INTERNAL_SERVER_ERROR",
                    500,
                    INTERNAL_SERVER_ERROR_MESSAGE,
                ))
            }
        }
    }
}
