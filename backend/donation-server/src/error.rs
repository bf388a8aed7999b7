use domain_types::errors::MailerError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid host for socket: {0}")]
    AddressError(#[from] std::net::AddrParseError),
    #[error("Failed to set up the receipt mailer: {0}")]
    MailerSetupFailed(MailerError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
