//! Streaming frame analyzer
//!
//! Feeds chunks, in arrival order, through three stages:
//!
//! 1. skip a leading ID3v2 tag (once)
//! 2. confirm and count frames with two-header lookahead
//! 3. trim the buffer back to the sliding window
//!
//! Memory stays at O(window) however long the stream is. The result does
//! not depend on how the source splits its bytes into chunks.

mod counter;
pub mod state;

pub use state::{ProcessingState, DEFAULT_WINDOW_CAPACITY};

use crate::config::AnalyzerConfig;
use crate::mp3::frame::HEADER_LEN;
use futures::stream::{Stream, StreamExt};
use std::io::{self, Read};
use tracing::debug;

/// Final result of analyzing one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    /// Confirmed MPEG-1 Layer III frames
    pub frame_count: u64,
    /// Bytes delivered by the source
    pub bytes_total: u64,
    /// Length of the leading ID3v2 tag, header and footer included
    pub tag_length: Option<u64>,
}

/// Incremental frame counter for a single byte stream
#[derive(Debug, Clone)]
pub struct FrameAnalyzer {
    window_capacity: usize,
    state: ProcessingState,
}

impl Default for FrameAnalyzer {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            state: ProcessingState::new(),
        }
    }
}

impl FrameAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new().with_window_capacity(config.window_capacity)
    }

    /// Override the sliding window size. Values below a header length are
    /// raised to one header length.
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity.max(HEADER_LEN);
        self
    }

    pub fn window_capacity(&self) -> usize {
        self.window_capacity
    }

    pub fn state(&self) -> &ProcessingState {
        &self.state
    }

    pub fn frame_count(&self) -> u64 {
        self.state.frame_count()
    }

    /// Process the next chunk of the stream.
    pub fn push(&mut self, chunk: &[u8]) {
        self.state.append(chunk);
        self.process_chunk(chunk.len());
        // Must come after processing: position arithmetic relies on it
        self.state.finish_chunk(chunk.len());
    }

    fn process_chunk(&mut self, chunk_len: usize) {
        if !self.state.skip_tag() {
            return;
        }
        counter::count_confirmed_frames(&mut self.state, chunk_len);
        self.state.trim(self.window_capacity);
    }

    /// End of stream.
    pub fn finish(self) -> Analysis {
        let analysis = Analysis {
            frame_count: self.state.frame_count(),
            bytes_total: self.state.bytes_seen_total(),
            tag_length: self.state.tag().map(|tag| tag.total_len),
        };
        debug!(
            frames = analysis.frame_count,
            bytes = analysis.bytes_total,
            "stream analysis complete"
        );
        analysis
    }

    /// Drain an async chunk stream.
    ///
    /// Each chunk is fully processed before the next one is polled. The first
    /// source error aborts the analysis and is returned unchanged.
    pub async fn consume<S, B, E>(mut self, stream: S) -> Result<Analysis, E>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
    {
        futures::pin_mut!(stream);
        while let Some(chunk) = stream.next().await {
            self.push(chunk?.as_ref());
        }
        Ok(self.finish())
    }

    /// Drain a blocking reader in reads of up to `chunk_size` bytes.
    pub fn consume_reader<R: Read>(
        mut self,
        reader: &mut R,
        chunk_size: usize,
    ) -> io::Result<Analysis> {
        let mut buf = vec![0u8; chunk_size.max(1)];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.push(&buf[..n]);
        }
        Ok(self.finish())
    }
}

/// Count frames in an async stream of byte chunks with default settings.
pub async fn analyze_stream<S, B, E>(stream: S) -> Result<Analysis, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    FrameAnalyzer::new().consume(stream).await
}

/// Count frames from a blocking reader with default settings.
pub fn analyze_reader<R: Read>(reader: &mut R) -> io::Result<Analysis> {
    FrameAnalyzer::new().consume_reader(reader, AnalyzerConfig::default().chunk_size)
}

/// Count frames in an in-memory buffer, delivered as a single chunk.
pub fn analyze_bytes(data: &[u8]) -> Analysis {
    let mut analyzer = FrameAnalyzer::new();
    analyzer.push(data);
    analyzer.finish()
}
