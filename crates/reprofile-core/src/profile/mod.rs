//! Execution profile types and rules

mod error;
pub mod reconcile;
mod types;
pub mod validate;

pub use error::{ProfileError, ProfileResult};
pub use reconcile::reconcile;
pub use types::{name_key, ExecutionProfile};
pub use validate::{validate_name, InvalidNameReason};
