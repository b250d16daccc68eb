//! # Bytecode Storage
//!
//! Stores arbitrary byte payloads, typically generative-art scripts, as
//! immutable code objects. Every object starts with a fixed header of
//! creator-gated cleanup logic and the creator address, followed by the
//! payload verbatim. See [`layout`] for the exact byte layout.
//!
//! Objects are written once, read any number of times and purged at most
//! once, by their creator only, with the single-byte signal `0xFF`. There is
//! no update: write a new object and purge the old one.
//!
//! ```ignore
//! use artmint_bytecode_storage::{PayloadStore, StoreConfig};
//!
//! let store = PayloadStore::new(StoreConfig::default());
//! let handle = store.write(writer, script.as_bytes())?;
//! assert_eq!(store.read(handle)?, script.as_bytes());
//! store.purge(writer, handle)?;
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod store;

pub use codec::{creation_code, decode_creator, decode_payload, runtime_code};
pub use config::{ConfigError, StoreConfig};
pub use error::{PurgeError, ReadError, WriteError};
pub use layout::{HEADER_LEN, PURGE_SIGNAL};
pub use store::PayloadStore;
