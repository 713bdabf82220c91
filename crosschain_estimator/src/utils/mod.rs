pub mod json;
pub mod number_conversion;
pub mod uint;
