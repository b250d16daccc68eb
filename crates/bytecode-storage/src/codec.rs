//! Encoding and decoding of payload objects.

use crate::{
    error::ReadError,
    layout::{CREATION_PREAMBLE, CREATOR_OFFSET, GATED_CLEANUP_LOGIC, HEADER_LEN},
};
use alloy_primitives::{Address, Bytes};

/// Stored object for `payload` written by `creator`.
pub fn runtime_code(creator: Address, payload: &[u8]) -> Bytes {
    let mut code = Vec::with_capacity(HEADER_LEN + payload.len());
    code.extend_from_slice(&GATED_CLEANUP_LOGIC);
    code.extend_from_slice(creator.as_slice());
    code.extend_from_slice(payload);
    code.into()
}

/// Full deployable sequence for `payload`: the preamble followed by the runtime code.
pub fn creation_code(creator: Address, payload: &[u8]) -> Bytes {
    let mut code = Vec::with_capacity(CREATION_PREAMBLE.len() + HEADER_LEN + payload.len());
    code.extend_from_slice(&CREATION_PREAMBLE);
    code.extend_from_slice(&runtime_code(creator, payload));
    code.into()
}

/// Runtime part of creation code produced by [`creation_code`], or `None` if
/// `code` does not start with the preamble.
pub fn strip_preamble(code: &[u8]) -> Option<&[u8]> {
    code.strip_prefix(CREATION_PREAMBLE.as_slice())
}

/// Payload bytes of a stored object.
///
/// The header is skipped without being inspected.
pub fn decode_payload(code: &[u8]) -> Result<&[u8], ReadError> {
    code.get(HEADER_LEN..).ok_or(ReadError::TooSmall { size: code.len() })
}

/// Creator recorded in the header of a stored object.
pub fn decode_creator(code: &[u8]) -> Result<Address, ReadError> {
    code.get(CREATOR_OFFSET..HEADER_LEN)
        .map(Address::from_slice)
        .ok_or(ReadError::TooSmall { size: code.len() })
}

/// Returns true if `code` starts with the gated cleanup logic.
pub fn has_cleanup_logic(code: &[u8]) -> bool {
    code.starts_with(&GATED_CLEANUP_LOGIC)
}
