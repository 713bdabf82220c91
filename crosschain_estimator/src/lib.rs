pub mod error;
pub mod gas;
pub mod networks;
pub mod prices;
#[cfg(test)]
pub mod tests;
pub mod utils;
