//! Request bodies accepted by the HTTP surface and their validated forms.
//!
//! Every field is optional on the wire so that a missing value surfaces as a
//! [`DonationError::MissingRequiredField`] naming the field, instead of a
//! generic deserialization failure.

use common_utils::{errors::CustomResult, id_type::TransactionId, types::MinorUnit};
use error_stack::{report, ResultExt};

use crate::{donation::DonationStatus, errors::DonationError};

/// Amounts arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Number(serde_json::Number),
    Text(String),
}

impl AmountValue {
    fn to_minor_unit(&self) -> CustomResult<MinorUnit, DonationError> {
        let raw = match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        };
        let amount = MinorUnit::from_major_unit_str(&raw).change_context(
            DonationError::InvalidDataFormat {
                field_name: "amount",
            },
        )?;
        if !amount.is_greater_than(0) {
            return Err(report!(DonationError::InvalidDataFormat {
                field_name: "amount",
            }));
        }
        Ok(amount)
    }
}

fn required(value: Option<String>, field_name: &'static str) -> CustomResult<String, DonationError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| report!(DonationError::MissingRequiredField { field_name }))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required_email(value: Option<String>) -> CustomResult<String, DonationError> {
    let email = required(value, "email")?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(report!(DonationError::InvalidDataFormat {
            field_name: "email"
        })),
    }
}

fn required_amount(value: Option<AmountValue>) -> CustomResult<MinorUnit, DonationError> {
    value
        .ok_or_else(|| {
            report!(DonationError::MissingRequiredField {
                field_name: "amount"
            })
        })?
        .to_minor_unit()
}

/// Body of an order creation request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DonationOrderRequest {
    pub amount: Option<AmountValue>,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub amount: MinorUnit,
    pub firstname: String,
    pub email: String,
    pub phone: Option<String>,
}

impl DonationOrderRequest {
    pub fn validate(self) -> CustomResult<ValidatedOrder, DonationError> {
        Ok(ValidatedOrder {
            amount: required_amount(self.amount)?,
            firstname: required(self.firstname, "firstname")?,
            email: required_email(self.email)?,
            phone: optional(self.phone),
        })
    }
}

/// Body of an explicit donation log request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CreateDonationRequest {
    pub txnid: Option<String>,
    pub amount: Option<AmountValue>,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDonation {
    pub txnid: TransactionId,
    pub order: ValidatedOrder,
}

impl CreateDonationRequest {
    pub fn validate(self) -> CustomResult<ValidatedDonation, DonationError> {
        Ok(ValidatedDonation {
            txnid: TransactionId::new_unchecked(required(self.txnid, "txnid")?),
            order: ValidatedOrder {
                amount: required_amount(self.amount)?,
                firstname: required(self.firstname, "firstname")?,
                email: required_email(self.email)?,
                phone: optional(self.phone),
            },
        })
    }
}

/// Body of a status update request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub txnid: Option<String>,
    pub status: Option<String>,
    pub payu_money_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStatusUpdate {
    pub txnid: TransactionId,
    pub status: DonationStatus,
    pub payu_money_id: Option<String>,
}

impl StatusUpdateRequest {
    pub fn validate(self) -> CustomResult<ValidatedStatusUpdate, DonationError> {
        let txnid = TransactionId::new_unchecked(required(self.txnid, "txnid")?);
        let status = required(self.status, "status")?
            .to_lowercase()
            .parse::<DonationStatus>()
            .change_context(DonationError::InvalidDataFormat {
                field_name: "status",
            })?;
        Ok(ValidatedStatusUpdate {
            txnid,
            status,
            payu_money_id: optional(self.payu_money_id),
        })
    }
}

/// Body of a receipt trigger request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub amount: Option<AmountValue>,
    pub txnid: Option<String>,
    pub payu_money_id: Option<String>,
}

/// Everything a receipt email shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptDetails {
    pub email: String,
    pub firstname: String,
    pub amount: MinorUnit,
    pub txnid: TransactionId,
    pub payu_money_id: String,
}

impl ReceiptRequest {
    pub fn validate(self) -> CustomResult<ReceiptDetails, DonationError> {
        Ok(ReceiptDetails {
            email: required_email(self.email)?,
            firstname: required(self.firstname, "firstname")?,
            amount: required_amount(self.amount)?,
            txnid: TransactionId::new_unchecked(required(self.txnid, "txnid")?),
            payu_money_id: required(self.payu_money_id, "payuMoneyId")?,
        })
    }
}
