//! mp3-frames - count MPEG-1 Layer III frames in a byte stream
//!
//! The analyzer consumes bytes in whatever chunks the source hands out and
//! returns how many audio frames it found, using a fixed-size window of
//! memory regardless of the stream's length.
//!
//! # How frames are found
//!
//! 1. **ID3v2 skip**: a leading ID3v2 tag (header, data and optional footer)
//!    is discarded before any frame search starts.
//! 2. **Sync + parse**: every offset is tested for an MPEG-1 Layer III header.
//!    Other MPEG versions and layers are rejected.
//! 3. **Two-header confirmation**: a header only counts when another valid
//!    header sits exactly one declared frame length after it. The last frame
//!    of a stream therefore never counts.
//! 4. **Sliding window**: after each chunk only the trailing bytes are kept,
//!    and frames are remembered by absolute stream offset so that rescanning
//!    overlapping windows never counts one twice.
//!
//! # Quick Start
//!
//! ```no_run
//! use mp3_frames::analyze_reader;
//!
//! let mut file = std::fs::File::open("track.mp3")?;
//! let analysis = analyze_reader(&mut file)?;
//! println!("{} frames", analysis.frame_count);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Async sources work the same way:
//!
//! ```
//! use futures::stream;
//! use mp3_frames::analyze_stream;
//!
//! let chunks = stream::iter(vec![Ok::<_, std::io::Error>(vec![0u8; 16])]);
//! let analysis = futures::executor::block_on(analyze_stream(chunks))?;
//! assert_eq!(analysis.frame_count, 0);
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`analyzer`]: the streaming frame counter
//! - [`mp3`]: frame header and ID3v2 boundary parsing
//! - [`config`]: TOML-backed analyzer settings
//! - [`report`]: output formatters (JSON, CSV)

pub mod analyzer;
pub mod config;
pub mod error;
pub mod mp3;
pub mod report;

pub use analyzer::{analyze_bytes, analyze_reader, analyze_stream, Analysis, FrameAnalyzer};
pub use config::AnalyzerConfig;
pub use error::{Error, Result};
