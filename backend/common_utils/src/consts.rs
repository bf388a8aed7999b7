/// Prefix for environment variables that override configuration values
pub const ENV_PREFIX: &str = "DONATION";

/// Environment variable selecting the configuration file
pub const RUN_ENV: &str = "DONATION_ENV";

/// Header carrying the request id across services
pub const X_REQUEST_ID: &str = "x-request-id";

/// Prefix of every generated transaction id
pub const TRANSACTION_ID_PREFIX: &str = "DN";

/// Number of random characters appended after the timestamp
pub const TRANSACTION_ID_RANDOM_LENGTH: usize = 10;

/// Maximum txnid length accepted by PayU
pub const MAX_TRANSACTION_ID_LENGTH: usize = 25;

/// Characters to use for the random part of generated ids
pub(crate) const ALPHABETS: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Runtime environment the service is deployed in.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Env {
    #[default]
    Development,
    Sandbox,
    Production,
}

impl Env {
    /// Environment picked from `DONATION_ENV`, development when unset or unknown
    pub fn current_env() -> Self {
        std::env::var(RUN_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    pub fn config_path(&self) -> &'static str {
        match self {
            Self::Development => "development.toml",
            Self::Sandbox => "sandbox.toml",
            Self::Production => "production.toml",
        }
    }
}
