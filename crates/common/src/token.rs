//! Helpers for the `project * 1_000_000 + invocation` token id convention.

use crate::constants::ONE_MILLION;
use alloy_primitives::U256;

/// Integer identifier of a project.
pub type ProjectId = u64;

/// Builds the token id of the given invocation of a project.
pub fn token_id_for(project_id: ProjectId, invocation: u64) -> U256 {
    U256::from(project_id) * U256::from(ONE_MILLION) + U256::from(invocation)
}

/// Returns the project a token id belongs to, or `None` if it does not fit a
/// [`ProjectId`].
pub fn project_of(token_id: U256) -> Option<ProjectId> {
    let project = token_id / U256::from(ONE_MILLION);
    (project <= U256::from(u64::MAX)).then(|| project.to::<u64>())
}

/// Returns the zero-based invocation index of a token within its project.
pub fn invocation_of(token_id: U256) -> u64 {
    // always < ONE_MILLION
    (token_id % U256::from(ONE_MILLION)).to::<u64>()
}
