pub mod catalog;
pub mod circulation;
mod dependencies;
pub mod fees;
pub mod reporting;

pub use dependencies::{DEFAULT_COLLABORATOR_TIMEOUT, ServiceDependencies};
