//! Protocol-wide constants.

use alloy_primitives::Address;

/// Number of token ids reserved per project.
///
/// Token ids encode the project in the high digits and the invocation index in
/// the low six digits: `token_id = project_id * ONE_MILLION + invocation`.
pub const ONE_MILLION: u64 = 1_000_000;

/// Denominator for every percentage used in funds distribution.
pub const PERCENTAGE_DENOMINATOR: u64 = 100;

/// Default object size limit in bytes (24KB per EIP-170).
pub const DEFAULT_CONTRACT_SIZE_LIMIT: usize = 24 * 1024;

/// Symbol reported for prices denominated in the native value unit.
pub const NATIVE_CURRENCY_SYMBOL: &str = "ETH";

/// Currency handle reported for the native value unit.
pub const NATIVE_CURRENCY_ADDRESS: Address = Address::ZERO;
