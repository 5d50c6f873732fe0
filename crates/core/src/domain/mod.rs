pub mod compensation;
pub mod units;
pub mod validation;
