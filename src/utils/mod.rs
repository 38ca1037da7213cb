pub mod seed;
pub mod validation;
