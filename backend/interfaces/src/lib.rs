pub mod mailer;
pub mod store;
pub mod verification;
