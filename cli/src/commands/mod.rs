pub mod message;
pub mod nested;
pub mod networks;
pub mod transaction;
