pub mod api;
pub mod donation;
pub mod errors;
