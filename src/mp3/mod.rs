pub mod frame;
pub mod id3;

pub use frame::{FrameHeader, Layer, MpegVersion, Probe};
pub use id3::{Id3v2TagInfo, TagProbe};
