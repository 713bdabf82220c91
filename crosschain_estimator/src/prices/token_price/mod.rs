pub mod pricing;
pub mod responses;

// GET {base_url}/tokens/price/{network}/{address}
// 404 means the provider does not know the token on that network.
pub const TOKEN_PRICE_PATH: [&str; 2] = ["tokens", "price"];

pub const API_KEY_HEADER: &str = "X-API-Key";
