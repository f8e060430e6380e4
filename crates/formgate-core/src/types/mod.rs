//! Field value types

pub mod failure;
pub mod snapshot;
pub mod value;

pub use failure::ValidationFailure;
pub use snapshot::FieldSnapshot;
pub use value::FieldValue;
