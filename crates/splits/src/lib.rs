//! Sale proceeds distribution.
//!
//! A mint payment is split into an optional refund to the payer, the platform
//! share, an optional secondary payee share and the creator share. The
//! computation here is pure; executing the resulting transfers is up to the
//! caller.

pub mod apply;
pub mod compute;
pub mod types;

pub use apply::*;
pub use compute::*;
pub use types::*;
