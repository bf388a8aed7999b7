// Payu hosted checkout endpoints
pub const TEST_PAYMENT_URL: &str = "https://test.payu.in/_payment";
pub const PRODUCTION_PAYMENT_URL: &str = "https://secure.payu.in/_payment";

// Default product info shown on the PayU checkout page
pub const PRODUCT_INFO: &str = "Dog Adoption Donation";

// Hash layout
pub const HASH_DELIMITER: &str = "|";
pub const UDF_FIELD_COUNT: usize = 5;
// Slots PayU reserves between udf5 and the salt
pub const RESERVED_FIELD_COUNT: usize = 5;

// Payu callback statuses
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_PENDING: &str = "pending";
