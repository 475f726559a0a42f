//! GitHub API service implementations.

mod actions;
mod artifact_metadata;
mod billing;
mod codespaces;
mod organizations;
mod repositories;
mod scim;
mod users;

pub use actions::*;
pub use artifact_metadata::*;
pub use billing::*;
pub use codespaces::*;
pub use organizations::*;
pub use repositories::*;
pub use scim::*;
pub use users::*;
