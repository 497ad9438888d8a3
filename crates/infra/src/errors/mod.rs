//! Conversions from infrastructure errors into domain errors

mod conversions;

pub use conversions::InfraError;
