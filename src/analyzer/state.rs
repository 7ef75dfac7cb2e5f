//! Per-stream incremental state and the sliding window
//!
//! One `ProcessingState` belongs to exactly one analysis. It holds the
//! trailing bytes that still matter for frame synchronization plus the
//! bookkeeping needed to count every frame once, no matter how the
//! source chunks its bytes.

use crate::mp3::{Id3v2TagInfo, TagProbe};
use tracing::{debug, trace};

/// Default sliding window capacity in bytes.
pub const DEFAULT_WINDOW_CAPACITY: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    /// Haven't seen enough bytes to know whether a tag is present
    Pending,
    /// Inside a tag; this many bytes still need discarding
    Skipping { remaining: u64 },
    /// Tag consumed (or there never was one)
    Done,
}

#[derive(Debug, Clone)]
pub struct ProcessingState {
    buffer: Vec<u8>,
    bytes_seen_total: u64,
    tag_state: TagState,
    tag: Option<Id3v2TagInfo>,
    last_counted: Option<u64>,
    frame_count: u64,
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            bytes_seen_total: 0,
            tag_state: TagState::Pending,
            tag: None,
            last_counted: None,
            frame_count: 0,
        }
    }
}

impl ProcessingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently retained in the window
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Total bytes delivered by the source, including trimmed-away ones.
    /// Only advances once a chunk has been fully processed.
    pub fn bytes_seen_total(&self) -> u64 {
        self.bytes_seen_total
    }

    pub fn tag_skipped(&self) -> bool {
        self.tag_state == TagState::Done
    }

    /// Leading ID3v2 tag, once its header has been read
    pub fn tag(&self) -> Option<Id3v2TagInfo> {
        self.tag
    }

    /// Absolute stream offset of the most recently counted frame
    pub fn last_counted(&self) -> Option<u64> {
        self.last_counted
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub(crate) fn append(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Mark a chunk of `chunk_len` bytes as fully processed.
    pub(crate) fn finish_chunk(&mut self, chunk_len: usize) {
        self.bytes_seen_total += chunk_len as u64;
    }

    /// Consume a leading ID3v2 tag.
    ///
    /// Returns `true` once frame scanning may start. While it returns `false`
    /// the current chunk must not be scanned. Tag bytes are discarded as they
    /// arrive, so a large tag never grows the buffer past its header.
    pub(crate) fn skip_tag(&mut self) -> bool {
        loop {
            match self.tag_state {
                TagState::Done => return true,
                TagState::Pending => match Id3v2TagInfo::probe(&self.buffer) {
                    TagProbe::Absent => {
                        self.tag_state = TagState::Done;
                        return true;
                    }
                    TagProbe::NeedMoreData => return false,
                    TagProbe::Present(info) => {
                        debug!(
                            tag_len = info.total_len,
                            footer = info.has_footer,
                            "skipping ID3v2 tag"
                        );
                        self.tag = Some(info);
                        self.tag_state = TagState::Skipping {
                            remaining: info.total_len,
                        };
                    }
                },
                TagState::Skipping { remaining } => {
                    let n = remaining.min(self.buffer.len() as u64) as usize;
                    self.buffer.drain(..n);
                    let remaining = remaining - n as u64;
                    if remaining > 0 {
                        self.tag_state = TagState::Skipping { remaining };
                        return false;
                    }
                    self.tag_state = TagState::Done;
                }
            }
        }
    }

    /// Absolute stream offset of `buffer[cursor]` while the chunk of
    /// `chunk_len` bytes is being processed.
    ///
    /// `bytes_seen_total` has not been advanced for that chunk yet, so the
    /// chunk length is added back here. The buffer is always a suffix of
    /// everything delivered so far.
    pub(crate) fn absolute_position(&self, cursor: usize, chunk_len: usize) -> u64 {
        self.bytes_seen_total + chunk_len as u64 - self.buffer.len() as u64 + cursor as u64
    }

    /// Count the frame at `absolute` unless it was already counted from an
    /// earlier, overlapping window. Returns whether it was new.
    pub(crate) fn record_frame(&mut self, absolute: u64) -> bool {
        if self.last_counted.is_some_and(|last| absolute <= last) {
            return false;
        }
        self.frame_count += 1;
        self.last_counted = Some(absolute);
        true
    }

    /// Keep only the trailing `capacity` bytes.
    pub(crate) fn trim(&mut self, capacity: usize) {
        if self.buffer.len() > capacity {
            let excess = self.buffer.len() - capacity;
            trace!(excess, capacity, "trimming window");
            self.buffer.drain(..excess);
        }
    }
}
