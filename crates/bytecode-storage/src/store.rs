//! In-memory object store with creator-gated purge.

use crate::{
    codec::{decode_creator, decode_payload, runtime_code},
    config::StoreConfig,
    error::{PurgeError, ReadError, WriteError},
    layout::PURGE_SIGNAL,
};
use alloy_primitives::{Address, Bytes};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct StoreState {
    /// Stored runtime code by handle.
    objects: HashMap<Address, Bytes>,
    /// Next nonce of each writer.
    nonces: HashMap<Address, u64>,
}

/// Store of immutable payload objects.
///
/// Handles are derived from the writer and its nonce the same way contract
/// creation addresses are, and a writer's nonce only ever grows, so a handle
/// is never handed out twice even after its object is purged.
#[derive(Debug, Default)]
pub struct PayloadStore {
    config: StoreConfig,
    state: RwLock<StoreState>,
}

impl PayloadStore {
    /// Creates an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self { config, state: RwLock::new(StoreState::default()) }
    }

    /// Limits this store applies.
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Stores `payload` as a new object created by `writer` and returns its handle.
    pub fn write(&self, writer: Address, payload: &[u8]) -> Result<Address, WriteError> {
        let code = runtime_code(writer, payload);
        if code.len() > self.config.max_object_size {
            return Err(WriteError::ObjectTooLarge {
                size: code.len(),
                limit: self.config.max_object_size,
            });
        }

        let mut state = self.state.write();
        let nonce = state.nonces.entry(writer).or_default();
        let handle = writer.create(*nonce);
        *nonce = nonce.checked_add(1).ok_or(WriteError::NonceExhausted { writer })?;

        if state.objects.contains_key(&handle) {
            return Err(WriteError::HandleCollision { handle });
        }
        let size = code.len();
        state.objects.insert(handle, code);

        tracing::info!(target: "bytecode_storage", ?writer, ?handle, size, "payload written");
        Ok(handle)
    }

    /// Returns the payload stored at `handle`, byte for byte.
    pub fn read(&self, handle: Address) -> Result<Bytes, ReadError> {
        let state = self.state.read();
        let code = state.objects.get(&handle).ok_or(ReadError::NotFound(handle))?;
        decode_payload(code).map(Bytes::copy_from_slice)
    }

    /// Sends the purge signal to `handle` on behalf of `caller`.
    pub fn purge(&self, caller: Address, handle: Address) -> Result<(), PurgeError> {
        self.purge_with_signal(caller, handle, &[PURGE_SIGNAL])
    }

    /// Deletes the object at `handle` if `caller` is its creator and `signal`
    /// is exactly `[0xFF]`.
    ///
    /// Checks run in the same order as the cleanup logic embedded in the
    /// object: creator, signal length, signal value. Any failure leaves the
    /// object in place.
    pub fn purge_with_signal(
        &self,
        caller: Address,
        handle: Address,
        signal: &[u8],
    ) -> Result<(), PurgeError> {
        let mut state = self.state.write();
        let code = state.objects.get(&handle).ok_or(PurgeError::NotFound(handle))?;

        let creator = decode_creator(code)?;
        if caller != creator {
            tracing::warn!(target: "bytecode_storage", ?caller, ?creator, ?handle, "purge denied");
            return Err(PurgeError::NotCreator { handle, caller, creator });
        }
        match signal {
            [PURGE_SIGNAL] => {}
            [byte] => return Err(PurgeError::InvalidSignal { byte: *byte }),
            _ => return Err(PurgeError::InvalidSignalLength { len: signal.len() }),
        }

        state.objects.remove(&handle);
        tracing::info!(target: "bytecode_storage", ?caller, ?handle, "payload purged");
        Ok(())
    }

    /// Size of the object at `handle` including its header, or zero if there is none.
    pub fn size_of(&self, handle: Address) -> usize {
        self.state.read().objects.get(&handle).map_or(0, |code| code.len())
    }

    /// Returns true if an object is stored at `handle`.
    pub fn exists(&self, handle: Address) -> bool {
        self.state.read().objects.contains_key(&handle)
    }

    /// Creator recorded in the header of the object at `handle`.
    pub fn creator_of(&self, handle: Address) -> Result<Address, ReadError> {
        let state = self.state.read();
        let code = state.objects.get(&handle).ok_or(ReadError::NotFound(handle))?;
        decode_creator(code)
    }

    /// Raw stored object at `handle`, header included.
    pub fn code_of(&self, handle: Address) -> Option<Bytes> {
        self.state.read().objects.get(&handle).cloned()
    }

    /// Number of objects `writer` has written.
    pub fn nonce_of(&self, writer: Address) -> u64 {
        self.state.read().nonces.get(&writer).copied().unwrap_or_default()
    }

    /// Handle the next write by `writer` will receive.
    pub fn next_handle(&self, writer: Address) -> Address {
        writer.create(self.nonce_of(writer))
    }

    /// Stores a payload of any size as consecutive objects.
    ///
    /// If any chunk fails to write, the chunks already written are purged
    /// before the error is returned. An empty payload is stored as one empty
    /// object.
    pub fn write_chunks(
        &self,
        writer: Address,
        payload: &[u8],
    ) -> Result<Vec<Address>, WriteError> {
        if payload.is_empty() {
            return self.write(writer, payload).map(|handle| vec![handle]);
        }
        let chunk_size = self.config.max_payload_size();
        if chunk_size == 0 {
            // even a single byte chunk does not fit
            return Err(WriteError::ObjectTooLarge {
                size: runtime_code(writer, &payload[..1]).len(),
                limit: self.config.max_object_size,
            });
        }

        let mut handles = Vec::with_capacity(payload.len().div_ceil(chunk_size));
        for chunk in payload.chunks(chunk_size) {
            match self.write(writer, chunk) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    for handle in handles {
                        if let Err(purge_err) = self.purge(writer, handle) {
                            tracing::warn!(
                                target: "bytecode_storage",
                                ?handle,
                                %purge_err,
                                "failed to purge partial chunk"
                            );
                        }
                    }
                    return Err(err);
                }
            }
        }
        tracing::debug!(
            target: "bytecode_storage",
            ?writer,
            chunks = handles.len(),
            "payload chunked"
        );
        Ok(handles)
    }

    /// Concatenates the payloads at `handles` in order.
    pub fn read_chunks(&self, handles: &[Address]) -> Result<Vec<u8>, ReadError> {
        let mut payload = Vec::new();
        for handle in handles {
            payload.extend_from_slice(&self.read(*handle)?);
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::HEADER_LEN;
    use alloy_primitives::address;

    const WRITER: Address = address!("0x000000000000000000000000000000000000c0de");
    const OTHER: Address = address!("0x000000000000000000000000000000000000beef");

    fn large_payload() -> Vec<u8> {
        (0..12_000u32).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn round_trips_payloads_of_any_size() {
        let store = PayloadStore::default();
        for payload in [Vec::new(), vec![0x42], large_payload()] {
            let handle = store.write(WRITER, &payload).unwrap();
            assert_eq!(&store.read(handle).unwrap()[..], payload.as_slice());
            assert_eq!(store.size_of(handle), HEADER_LEN + payload.len());
        }
    }

    #[test]
    fn missing_object_reads_as_error_with_zero_size() {
        let store = PayloadStore::default();
        assert_eq!(store.read(OTHER), Err(ReadError::NotFound(OTHER)));
        assert_eq!(store.size_of(OTHER), 0);
        assert!(!store.exists(OTHER));
    }

    #[test]
    fn handles_follow_create_derivation() {
        let store = PayloadStore::default();
        assert_eq!(store.next_handle(WRITER), WRITER.create(0));
        let first = store.write(WRITER, b"a").unwrap();
        let second = store.write(WRITER, b"a").unwrap();
        assert_eq!(first, WRITER.create(0));
        assert_eq!(second, WRITER.create(1));
        assert_eq!(store.nonce_of(WRITER), 2);
        assert_eq!(store.creator_of(first).unwrap(), WRITER);
    }

    #[test]
    fn only_creator_may_purge() {
        let store = PayloadStore::default();
        let handle = store.write(WRITER, b"script").unwrap();
        assert_eq!(
            store.purge(OTHER, handle),
            Err(PurgeError::NotCreator { handle, caller: OTHER, creator: WRITER })
        );
        assert_eq!(&store.read(handle).unwrap()[..], b"script");
    }

    #[test]
    fn purge_signal_must_be_single_ff_byte() {
        let store = PayloadStore::default();
        let handle = store.write(WRITER, b"script").unwrap();

        let cases: [(&[u8], PurgeError); 4] = [
            (&[], PurgeError::InvalidSignalLength { len: 0 }),
            (&[0xFF, 0xFF], PurgeError::InvalidSignalLength { len: 2 }),
            (&[0xFE], PurgeError::InvalidSignal { byte: 0xFE }),
            (&[0x00], PurgeError::InvalidSignal { byte: 0x00 }),
        ];
        for (signal, expected) in cases {
            assert_eq!(store.purge_with_signal(WRITER, handle, signal), Err(expected));
            assert!(store.exists(handle));
        }
        assert_eq!(&store.read(handle).unwrap()[..], b"script");
    }

    #[test]
    fn purge_removes_object_and_handle_is_not_reused() {
        let store = PayloadStore::default();
        let handle = store.write(WRITER, b"old").unwrap();
        store.purge(WRITER, handle).unwrap();

        assert_eq!(store.read(handle), Err(ReadError::NotFound(handle)));
        assert_eq!(store.size_of(handle), 0);
        assert_eq!(store.purge(WRITER, handle), Err(PurgeError::NotFound(handle)));

        let replacement = store.write(WRITER, b"new").unwrap();
        assert_ne!(replacement, handle);
    }

    #[test]
    fn oversized_object_is_rejected() {
        let store = PayloadStore::new(StoreConfig::new(HEADER_LEN + 4));
        assert!(store.write(WRITER, b"four").is_ok());
        assert_eq!(
            store.write(WRITER, b"fives"),
            Err(WriteError::ObjectTooLarge { size: HEADER_LEN + 5, limit: HEADER_LEN + 4 })
        );
        assert_eq!(store.nonce_of(WRITER), 1);
    }

    #[test]
    fn chunks_round_trip() {
        let store = PayloadStore::new(StoreConfig::new(HEADER_LEN + 1000));
        let payload = large_payload();
        let handles = store.write_chunks(WRITER, &payload).unwrap();
        assert_eq!(handles.len(), 12);
        assert_eq!(store.read_chunks(&handles).unwrap(), payload);

        let empty = store.write_chunks(WRITER, &[]).unwrap();
        assert_eq!(empty.len(), 1);
        assert!(store.read_chunks(&empty).unwrap().is_empty());
    }

    #[test]
    fn chunking_without_payload_room_reports_smallest_object() {
        let store = PayloadStore::new(StoreConfig::new(HEADER_LEN));
        assert_eq!(
            store.write_chunks(WRITER, b"abc"),
            Err(WriteError::ObjectTooLarge { size: HEADER_LEN + 1, limit: HEADER_LEN })
        );
        assert_eq!(store.nonce_of(WRITER), 0);
    }

    #[test]
    fn code_of_returns_full_object() {
        let store = PayloadStore::default();
        let handle = store.write(WRITER, b"draw").unwrap();
        let code = store.code_of(handle).unwrap();
        assert_eq!(code, runtime_code(WRITER, b"draw"));
        assert_eq!(code.len(), store.size_of(handle));
        assert_eq!(&code[HEADER_LEN..], b"draw");

        store.purge(WRITER, handle).unwrap();
        assert_eq!(store.code_of(handle), None);
    }
}
