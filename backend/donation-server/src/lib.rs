pub mod app;
pub mod configs;
pub mod error;
pub mod http;
pub mod logger;
pub mod server;
pub mod utils;

#[macro_export]
macro_rules! service_name {
    () => {
        env!("CARGO_CRATE_NAME")
    };
}
