//! Record source contract for the vendor database binding.
//!
//! The CDB is read through a keyed cursor interface: `key_exists` probes for
//! a record group, `fetch_next` pages through it one fixed-size payload at a
//! time. The real binding wraps the vendor library; [`MemorySource`] replays
//! captured record streams in memory and backs the test suites.

use std::collections::BTreeMap;

use thiserror::Error;

/// Upper bound for a single record payload, in bytes.
pub const MAX_RECORD_LEN: usize = 256;

/// Outcome of a successful [`RecordSource::fetch_next`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The buffer holds a valid record and the cursor advanced.
    HasMore,
    /// The key stream is exhausted; the buffer content is not valid.
    End,
}

/// Failure reported by the underlying record source, carrying the vendor
/// status code verbatim. Fetch failures are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("status {code}: {message}")]
pub struct SourceError {
    pub code: i32,
    pub message: String,
}

impl SourceError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Reusable buffer a record is fetched into.
///
/// The caller owns one buffer per fetch loop and passes it by exclusive
/// reference into every call; the source overwrites it in place. The
/// content is only meaningful while the last status was
/// [`FetchStatus::HasMore`].
#[derive(Debug, Clone)]
pub struct RecordBuffer {
    bytes: [u8; MAX_RECORD_LEN],
    len: usize,
}

impl RecordBuffer {
    pub fn new() -> Self {
        Self {
            bytes: [0; MAX_RECORD_LEN],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The payload written by the last fetch.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Replace the buffer content. Returns `false` when `payload` exceeds
    /// the buffer capacity, leaving the previous content in place.
    pub fn fill(&mut self, payload: &[u8]) -> bool {
        if payload.len() > MAX_RECORD_LEN {
            return false;
        }
        self.bytes[..payload.len()].copy_from_slice(payload);
        self.len = payload.len();
        true
    }
}

impl Default for RecordBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only access to a keyed record store.
///
/// Cursors are keyed by `(key, subkey)`: `continuation = false` starts the
/// stream from its first record, `true` resumes it. One fetch loop is run
/// to completion before another starts; interleaving cursors on the same
/// handle is not supported.
pub trait RecordSource {
    /// Acquire the database handle. Must be called before any fetch.
    fn open(&mut self) -> Result<(), SourceError>;

    /// Release the database handle. Idempotent.
    fn close(&mut self);

    /// Cheap existence probe for a record group.
    fn key_exists(&self, key: u16, subkey: u32) -> bool;

    /// Fetch the next record of `(key, subkey)` into `buffer`.
    fn fetch_next(
        &mut self,
        key: u16,
        subkey: u32,
        buffer: &mut RecordBuffer,
        continuation: bool,
    ) -> Result<FetchStatus, SourceError>;
}

/// In-memory record source.
///
/// The vendor binding itself is out of scope for this crate; this
/// implementation replays encoded record payloads keyed by `(key, subkey)`
/// and is the reference collaborator for the test suites. Failures can be
/// injected per key to exercise error propagation.
#[derive(Debug, Default)]
pub struct MemorySource {
    streams: BTreeMap<(u16, u32), Vec<Vec<u8>>>,
    cursors: BTreeMap<(u16, u32), usize>,
    failures: BTreeMap<(u16, u32), SourceError>,
    open: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one encoded record to the stream of `(key, subkey)`. Creates
    /// the stream when absent, making the key visible to `key_exists`.
    pub fn push_record(&mut self, key: u16, subkey: u32, payload: Vec<u8>) {
        self.streams.entry((key, subkey)).or_default().push(payload);
    }

    /// Make every fetch on `(key, subkey)` fail with `error`.
    pub fn fail_key(&mut self, key: u16, subkey: u32, error: SourceError) {
        self.failures.insert((key, subkey), error);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl RecordSource for MemorySource {
    fn open(&mut self) -> Result<(), SourceError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.cursors.clear();
    }

    fn key_exists(&self, key: u16, subkey: u32) -> bool {
        self.streams.contains_key(&(key, subkey))
    }

    fn fetch_next(
        &mut self,
        key: u16,
        subkey: u32,
        buffer: &mut RecordBuffer,
        continuation: bool,
    ) -> Result<FetchStatus, SourceError> {
        if !self.open {
            return Err(SourceError::new(-1, "source is not open"));
        }
        if let Some(error) = self.failures.get(&(key, subkey)) {
            return Err(error.clone());
        }

        let Some(stream) = self.streams.get(&(key, subkey)) else {
            return Ok(FetchStatus::End);
        };

        let cursor = self.cursors.entry((key, subkey)).or_insert(0);
        if !continuation {
            *cursor = 0;
        }
        if *cursor >= stream.len() {
            return Ok(FetchStatus::End);
        }

        if !buffer.fill(&stream[*cursor]) {
            return Err(SourceError::new(3, "record exceeds the buffer capacity"));
        }
        *cursor += 1;
        Ok(FetchStatus::HasMore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drained(source: &mut MemorySource, key: u16, subkey: u32) -> Vec<Vec<u8>> {
        let mut buffer = RecordBuffer::new();
        let mut continuation = false;
        let mut payloads = Vec::new();
        loop {
            match source
                .fetch_next(key, subkey, &mut buffer, continuation)
                .expect("fetch should succeed")
            {
                FetchStatus::HasMore => payloads.push(buffer.as_slice().to_vec()),
                FetchStatus::End => break,
            }
            continuation = true;
        }
        payloads
    }

    #[test]
    fn pages_through_a_stream_and_restarts_on_fresh_cursor() {
        let mut source = MemorySource::new();
        source.push_record(160, 0, vec![1, 2]);
        source.push_record(160, 0, vec![3, 4]);
        source.open().expect("open should succeed");

        assert_eq!(drained(&mut source, 160, 0), vec![vec![1, 2], vec![3, 4]]);
        // A non-continuation call rewinds the cursor.
        assert_eq!(drained(&mut source, 160, 0), vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn missing_key_yields_end_and_no_existence() {
        let mut source = MemorySource::new();
        source.open().expect("open should succeed");
        assert!(!source.key_exists(161, 1));
        assert!(drained(&mut source, 161, 1).is_empty());
    }

    #[test]
    fn fetch_on_closed_source_fails() {
        let mut source = MemorySource::new();
        source.push_record(160, 0, vec![0; 4]);
        let mut buffer = RecordBuffer::new();
        let error = source
            .fetch_next(160, 0, &mut buffer, false)
            .expect_err("closed source should fail");
        assert_eq!(error.code, -1);
    }

    #[test]
    fn injected_failure_is_reported() {
        let mut source = MemorySource::new();
        source.push_record(162, 4, vec![0; 8]);
        source.fail_key(162, 4, SourceError::new(17, "simulated index corruption"));
        source.open().expect("open should succeed");

        let mut buffer = RecordBuffer::new();
        let error = source
            .fetch_next(162, 4, &mut buffer, false)
            .expect_err("injected failure should surface");
        assert_eq!(error.code, 17);
    }

    #[test]
    fn oversized_record_is_rejected() {
        let mut source = MemorySource::new();
        source.push_record(160, 0, vec![0; MAX_RECORD_LEN + 1]);
        source.open().expect("open should succeed");

        let mut buffer = RecordBuffer::new();
        let error = source
            .fetch_next(160, 0, &mut buffer, false)
            .expect_err("oversized record should fail");
        assert_eq!(error.code, 3);
    }
}
