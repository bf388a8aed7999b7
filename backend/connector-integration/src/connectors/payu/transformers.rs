use common_utils::{
    crypto::{self, VerifySignature},
    id_type::TransactionId,
    types::StringMajorUnit,
    CustomResult,
};
use domain_types::{api::ValidatedOrder, donation::DonationStatus, errors::DonationError};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{PeekInterface, Secret};

use super::constants;

#[derive(Debug, Clone)]
pub struct PayuAuthType {
    pub(super) key: Secret<String>,
    pub(super) salt: Secret<String>,
}

impl PayuAuthType {
    /// Builds the merchant credentials, treating blank values as absent.
    pub fn new(
        key: Option<Secret<String>>,
        salt: Option<Secret<String>>,
    ) -> CustomResult<Self, DonationError> {
        let key = key
            .filter(|key| !key.peek().trim().is_empty())
            .ok_or_else(|| {
                report!(DonationError::MissingConfiguration {
                    key: "payu.merchant_key"
                })
            })?;
        let salt = salt
            .filter(|salt| !salt.peek().trim().is_empty())
            .ok_or_else(|| {
                report!(DonationError::MissingConfiguration {
                    key: "payu.merchant_salt"
                })
            })?;
        Ok(Self { key, salt })
    }
}

/// Which PayU deployment orders are sent to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PayuEnvironment {
    #[default]
    Test,
    Production,
}

impl PayuEnvironment {
    pub fn payment_url(self) -> &'static str {
        match self {
            Self::Test => constants::TEST_PAYMENT_URL,
            Self::Production => constants::PRODUCTION_PAYMENT_URL,
        }
    }
}

/// SHA-512 over the fields joined with `|`, lower-case hex
pub fn generate_hash(fields: &[&str]) -> String {
    crypto::sha512_hex(&fields.join(constants::HASH_DELIMITER))
}

/// Fields of the request hash, in the order PayU signs them:
/// `key|txnid|amount|productinfo|firstname|email|udf1|..|udf5||||||salt`
#[derive(Debug, Clone, Copy)]
pub struct PayuHashInput<'a> {
    pub key: &'a str,
    pub txnid: &'a str,
    pub amount: &'a str,
    pub productinfo: &'a str,
    pub firstname: &'a str,
    pub email: &'a str,
    pub udf: [&'a str; constants::UDF_FIELD_COUNT],
    pub salt: &'a str,
}

impl<'a> PayuHashInput<'a> {
    pub fn hash_sequence(&self) -> Vec<&'a str> {
        let mut fields = vec![
            self.key,
            self.txnid,
            self.amount,
            self.productinfo,
            self.firstname,
            self.email,
        ];
        fields.extend(self.udf);
        fields.extend([""; constants::RESERVED_FIELD_COUNT]);
        fields.push(self.salt);
        fields
    }

    pub fn generate_hash(&self) -> String {
        generate_hash(&self.hash_sequence())
    }
}

/// Fields of the response hash. PayU mirrors the request order and puts the
/// salt and status in front:
/// `[additionalCharges|]salt|status||||||udf5|..|udf1|email|firstname|productinfo|amount|txnid|key`
#[derive(Debug, Clone, Copy)]
pub struct PayuVerifyInput<'a> {
    pub additional_charges: Option<&'a str>,
    pub status: &'a str,
    pub key: &'a str,
    pub txnid: &'a str,
    pub amount: &'a str,
    pub productinfo: &'a str,
    pub firstname: &'a str,
    pub email: &'a str,
    pub udf: [&'a str; constants::UDF_FIELD_COUNT],
    pub salt: &'a str,
}

impl<'a> PayuVerifyInput<'a> {
    pub fn hash_sequence(&self) -> Vec<&'a str> {
        let mut fields = Vec::new();
        fields.extend(self.additional_charges);
        fields.extend([self.salt, self.status]);
        fields.extend([""; constants::RESERVED_FIELD_COUNT]);
        fields.extend(self.udf.iter().rev().copied());
        fields.extend([
            self.email,
            self.firstname,
            self.productinfo,
            self.amount,
            self.txnid,
            self.key,
        ]);
        fields
    }

    pub fn generate_hash(&self) -> String {
        generate_hash(&self.hash_sequence())
    }
}

/// Request hash for an order without user defined fields.
pub fn sign(
    key: &str,
    txnid: &str,
    amount: &str,
    product_info: &str,
    firstname: &str,
    email: &str,
    salt: &str,
) -> String {
    PayuHashInput {
        key,
        txnid,
        amount,
        productinfo: product_info,
        firstname,
        email,
        udf: [""; constants::UDF_FIELD_COUNT],
        salt,
    }
    .generate_hash()
}

/// Checks a response hash supplied by PayU. Any empty input fails.
#[allow(clippy::too_many_arguments)]
pub fn verify(
    status: &str,
    key: &str,
    txnid: &str,
    amount: &str,
    product_info: &str,
    firstname: &str,
    email: &str,
    salt: &str,
    supplied_hash: &str,
) -> bool {
    let inputs = [
        status,
        key,
        txnid,
        amount,
        product_info,
        firstname,
        email,
        salt,
        supplied_hash,
    ];
    if inputs.iter().any(|input| input.trim().is_empty()) {
        return false;
    }
    let message = PayuVerifyInput {
        additional_charges: None,
        status,
        key,
        txnid,
        amount,
        productinfo: product_info,
        firstname,
        email,
        udf: [""; constants::UDF_FIELD_COUNT],
        salt,
    }
    .hash_sequence()
    .join(constants::HASH_DELIMITER);

    crypto::Sha512
        .verify_signature(salt.as_bytes(), supplied_hash.trim().as_bytes(), message.as_bytes())
        .unwrap_or(false)
}

/// Absolute return URLs PayU redirects the donor to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayuRedirectUrls {
    pub surl: String,
    pub furl: String,
}

impl PayuRedirectUrls {
    pub fn new(
        base_url: &url::Url,
        success_path: &str,
        failure_path: &str,
    ) -> CustomResult<Self, DonationError> {
        let join = |path: &str| {
            base_url
                .join(path)
                .map(String::from)
                .change_context(DonationError::MissingConfiguration {
                    key: "application.base_url",
                })
                .attach_printable_lazy(|| format!("cannot join {path} onto {base_url}"))
        };
        Ok(Self {
            surl: join(success_path)?,
            furl: join(failure_path)?,
        })
    }
}

pub struct PayuOrderRouterData<'a> {
    pub auth: &'a PayuAuthType,
    pub txnid: &'a TransactionId,
    pub order: &'a ValidatedOrder,
    pub product_info: &'a str,
    pub redirect_urls: &'a PayuRedirectUrls,
}

/// Form fields the browser posts to PayU's `_payment` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PayuOrderPayload {
    pub key: String,
    pub txnid: TransactionId,
    pub amount: StringMajorUnit,
    pub productinfo: String,
    pub firstname: String,
    pub email: String,
    pub phone: String,
    pub surl: String,
    pub furl: String,
    pub hash: String,
}

impl From<PayuOrderRouterData<'_>> for PayuOrderPayload {
    fn from(item: PayuOrderRouterData<'_>) -> Self {
        // The payload amount and the hashed amount come from the same string
        let amount = item.order.amount.to_major_unit_as_string();
        let hash = sign(
            item.auth.key.peek(),
            item.txnid.get_string_repr(),
            amount.get_amount_as_string(),
            item.product_info,
            &item.order.firstname,
            &item.order.email,
            item.auth.salt.peek(),
        );

        Self {
            key: item.auth.key.peek().clone(),
            txnid: item.txnid.clone(),
            amount,
            productinfo: item.product_info.to_string(),
            firstname: item.order.firstname.clone(),
            email: item.order.email.clone(),
            phone: item.order.phone.clone().unwrap_or_default(),
            surl: item.redirect_urls.surl.clone(),
            furl: item.redirect_urls.furl.clone(),
            hash,
        }
    }
}

/// Fields PayU posts back to `surl`/`furl`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PayuCallbackForm {
    pub status: Option<String>,
    pub key: Option<String>,
    pub txnid: Option<String>,
    pub amount: Option<String>,
    pub productinfo: Option<String>,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub hash: Option<String>,
    pub udf1: Option<String>,
    pub udf2: Option<String>,
    pub udf3: Option<String>,
    pub udf4: Option<String>,
    pub udf5: Option<String>,
    #[serde(rename = "additionalCharges")]
    pub additional_charges: Option<String>,
    #[serde(rename = "payuMoneyId")]
    pub payu_money_id: Option<String>,
    pub mihpayid: Option<String>,
    #[serde(rename = "error_Message")]
    pub error_message: Option<String>,
    pub mode: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Value as posted, `None` when absent or blank. Hash inputs keep the exact
/// bytes PayU signed.
fn raw_non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|value| !value.trim().is_empty())
}

/// A field the callback hash depends on, untrimmed. Absent or blank fails
/// verification.
pub(super) fn required_field<'a>(
    value: &'a Option<String>,
    field_name: &'static str,
) -> CustomResult<&'a str, DonationError> {
    raw_non_blank(value).ok_or_else(|| {
        report!(DonationError::SourceVerificationFailed)
            .attach_printable(format!("callback is missing {field_name}"))
    })
}

impl PayuCallbackForm {
    pub(super) fn udf_fields(&self) -> [&str; constants::UDF_FIELD_COUNT] {
        [&self.udf1, &self.udf2, &self.udf3, &self.udf4, &self.udf5]
            .map(|udf| udf.as_deref().unwrap_or_default())
    }

    pub(super) fn additional_charges(&self) -> Option<&str> {
        raw_non_blank(&self.additional_charges)
    }

    /// Gateway reference for the payment. `payuMoneyId` is preferred,
    /// `mihpayid` is what the PayU Biz flow sends.
    pub fn payu_reference(&self) -> Option<String> {
        non_empty(&self.payu_money_id)
            .or_else(|| non_empty(&self.mihpayid))
            .map(str::to_string)
    }
}

/// Payment status reported by PayU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayuPaymentStatus {
    Success,
    Pending,
    Failure(String),
}

impl From<&str> for PayuPaymentStatus {
    fn from(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            constants::STATUS_SUCCESS => Self::Success,
            constants::STATUS_PENDING => Self::Pending,
            other => Self::Failure(other.to_string()),
        }
    }
}

impl PayuPaymentStatus {
    /// Status the donation moves to. A pending payment leaves it untouched.
    pub fn donation_status(&self) -> Option<DonationStatus> {
        match self {
            Self::Success => Some(DonationStatus::Completed),
            Self::Pending => None,
            Self::Failure(_) => Some(DonationStatus::Failed),
        }
    }
}

/// A callback whose hash has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCallback {
    pub txnid: TransactionId,
    pub status: PayuPaymentStatus,
    pub amount: String,
    pub firstname: String,
    pub email: String,
    pub phone: Option<String>,
    pub payu_reference: Option<String>,
    pub error_message: Option<String>,
}

impl TryFrom<&PayuCallbackForm> for VerifiedCallback {
    type Error = error_stack::Report<DonationError>;

    fn try_from(form: &PayuCallbackForm) -> Result<Self, Self::Error> {
        Ok(Self {
            txnid: TransactionId::new_unchecked(required_field(&form.txnid, "txnid")?.trim()),
            status: PayuPaymentStatus::from(required_field(&form.status, "status")?),
            amount: required_field(&form.amount, "amount")?.trim().to_string(),
            firstname: required_field(&form.firstname, "firstname")?.trim().to_string(),
            email: required_field(&form.email, "email")?.trim().to_string(),
            phone: non_empty(&form.phone).map(str::to_string),
            payu_reference: form.payu_reference(),
            error_message: non_empty(&form.error_message).map(str::to_string),
        })
    }
}
