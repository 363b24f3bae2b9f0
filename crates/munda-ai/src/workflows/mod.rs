pub mod agronomy;
pub mod credit;
