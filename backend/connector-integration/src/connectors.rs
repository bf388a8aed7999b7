pub mod payu;
pub use self::payu::Payu;
