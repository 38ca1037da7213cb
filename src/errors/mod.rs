pub mod common;

pub use common::ProvisionError;
