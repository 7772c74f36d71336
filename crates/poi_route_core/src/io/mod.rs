pub mod degrees;
pub mod options;
