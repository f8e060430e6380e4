//! FormValidator - Main API for validating forms
//!
//! The module is organized into:
//! - `engine`: Loaded rules plus the stateless validation entry points
//! - `session`: Per-form evaluation state driven by field changes

mod engine;
mod session;

pub use engine::FormValidator;
pub use session::ValidationSession;
