pub mod email;
pub mod service;
pub mod store;

pub use service::*;
