pub mod accounts;
pub mod fill;
