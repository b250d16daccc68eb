//! Byte layout of stored payload objects.
//!
//! A payload object is deployed with creation code
//!
//! ```text
//! | preamble (11) | cleanup logic (42) | creator (20) | payload (n) |
//! |<- creation ->|<------------------ runtime / stored ------------>|
//! ```
//!
//! The preamble copies everything after itself into memory and returns it, so
//! the stored object is the runtime part only and its size is
//! `HEADER_LEN + n`.
//!
//! Preamble:
//! ```assembly
//! 0x00  PUSH1 0x0B      // runtime starts after the preamble
//! 0x02  MSIZE           // 0
//! 0x03  DUP2
//! 0x04  CODESIZE
//! 0x05  SUB             // runtime size
//! 0x06  DUP1
//! 0x07  SWAP3
//! 0x08  MSIZE
//! 0x09  CODECOPY        // mem[0..size] = code[0x0B..]
//! 0x0A  RETURN
//! ```
//!
//! Cleanup logic, executed when the object is called:
//! ```assembly
//! 0x00  PUSH1 0x14      // 20 bytes
//! 0x02  PUSH1 0x2A      // creator offset
//! 0x04  PUSH1 0x0C
//! 0x06  CODECOPY        // mem[12..32] = creator
//! 0x07  PUSH1 0x00
//! 0x09  MLOAD
//! 0x0A  CALLER
//! 0x0B  EQ
//! 0x0C  PUSH1 0x10
//! 0x0E  JUMPI
//! 0x0F  INVALID         // caller is not the creator
//! 0x10  JUMPDEST
//! 0x11  CALLDATASIZE
//! 0x12  PUSH1 0x01
//! 0x14  EQ
//! 0x15  PUSH1 0x19
//! 0x17  JUMPI
//! 0x18  INVALID         // signal is not exactly one byte
//! 0x19  JUMPDEST
//! 0x1A  PUSH1 0x00
//! 0x1C  CALLDATALOAD
//! 0x1D  PUSH1 0xF8
//! 0x1F  SHR
//! 0x20  PUSH1 0xFF
//! 0x22  EQ
//! 0x23  PUSH1 0x27
//! 0x25  JUMPI
//! 0x26  INVALID         // signal byte is not 0xFF
//! 0x27  JUMPDEST
//! 0x28  CALLER
//! 0x29  SELFDESTRUCT
//! ```

/// Creation preamble returning the runtime part of the code.
pub const CREATION_PREAMBLE: [u8; 11] =
    [0x60, 0x0B, 0x59, 0x81, 0x38, 0x03, 0x80, 0x92, 0x59, 0x39, 0xF3];

/// Creator-gated self-destruct logic at the start of every stored object.
pub const GATED_CLEANUP_LOGIC: [u8; 42] = [
    0x60, 0x14, 0x60, 0x2A, 0x60, 0x0C, 0x39, 0x60, 0x00, 0x51, 0x33, 0x14, 0x60, 0x10, 0x57, 0xFE,
    0x5B, 0x36, 0x60, 0x01, 0x14, 0x60, 0x19, 0x57, 0xFE, 0x5B, 0x60, 0x00, 0x35, 0x60, 0xF8, 0x1C,
    0x60, 0xFF, 0x14, 0x60, 0x27, 0x57, 0xFE, 0x5B, 0x33, 0xFF,
];

/// Offset of the creator address within a stored object.
pub const CREATOR_OFFSET: usize = GATED_CLEANUP_LOGIC.len();

/// Length of an address.
pub const ADDRESS_LEN: usize = 20;

/// Offset of the payload within a stored object.
pub const HEADER_LEN: usize = CREATOR_OFFSET + ADDRESS_LEN;

/// The only signal accepted by the cleanup logic.
pub const PURGE_SIGNAL: u8 = 0xFF;

// The logic reads the creator from a hardcoded offset; keep both in lockstep.
const _: () = assert!(GATED_CLEANUP_LOGIC[3] as usize == CREATOR_OFFSET);
const _: () = assert!(GATED_CLEANUP_LOGIC[1] as usize == ADDRESS_LEN);
const _: () = assert!(CREATION_PREAMBLE[1] as usize == CREATION_PREAMBLE.len());
const _: () = assert!(HEADER_LEN == 62);
