use crate::layout::HEADER_LEN;
use alloy_primitives::Address;
use thiserror::Error;

/// A payload object could not be allocated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriteError {
    /// The stored object would exceed the configured size limit.
    #[error("object of {size} bytes exceeds the {limit} byte limit")]
    ObjectTooLarge {
        /// Size of the object including the header.
        size: usize,
        /// Configured limit.
        limit: usize,
    },
    /// The derived handle already holds an object.
    #[error("handle {handle} is already allocated")]
    HandleCollision {
        /// Derived handle.
        handle: Address,
    },
    /// The writer has used every nonce.
    #[error("writer {writer} has no nonce left")]
    NonceExhausted {
        /// Writer whose nonce overflowed.
        writer: Address,
    },
}

/// A payload could not be read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// Nothing is stored at the handle.
    #[error("no object at {0}")]
    NotFound(Address),
    /// The code is shorter than the header and holds no payload.
    #[error("code of {size} bytes is shorter than the {header} byte header", header = HEADER_LEN)]
    TooSmall {
        /// Size of the code.
        size: usize,
    },
}

/// A purge was aborted. The object is left untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PurgeError {
    /// Nothing is stored at the handle.
    #[error("no object at {0}")]
    NotFound(Address),
    /// Only the writer recorded in the header may purge.
    #[error("{caller} is not the creator {creator} of {handle}")]
    NotCreator {
        /// Target object.
        handle: Address,
        /// Rejected caller.
        caller: Address,
        /// Creator recorded in the header.
        creator: Address,
    },
    /// The signal must be exactly one byte.
    #[error("purge signal must be 1 byte, got {len}")]
    InvalidSignalLength {
        /// Length of the rejected signal.
        len: usize,
    },
    /// The stored object has no readable header.
    #[error(transparent)]
    Read(#[from] ReadError),
    /// The signal byte must be `0xFF`.
    #[error("invalid purge signal {byte:#04x}")]
    InvalidSignal {
        /// Rejected signal byte.
        byte: u8,
    },
}
