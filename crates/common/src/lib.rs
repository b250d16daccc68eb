//! Common constants and token identifiers for artmint

pub mod constants;
pub mod token;

pub use constants::*;
pub use token::{invocation_of, project_of, token_id_for, ProjectId};
