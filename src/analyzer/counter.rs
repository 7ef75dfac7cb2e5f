//! Frame confirmation and counting
//!
//! A lone sync pattern shows up in arbitrary binary data all the time. Two
//! headers exactly one declared frame length apart almost never do, so a
//! candidate only counts once the header after it parses too.

use super::state::ProcessingState;
use crate::mp3::frame::{FrameHeader, Probe, HEADER_LEN};
use tracing::trace;

/// Scan the window and count every newly confirmed frame.
///
/// `chunk_len` is the length of the chunk currently being processed.
/// Returns how many frames were counted for the first time.
pub(crate) fn count_confirmed_frames(state: &mut ProcessingState, chunk_len: usize) -> u64 {
    let mut cursor = 0;
    let mut counted = 0;

    while cursor + HEADER_LEN <= state.buffer().len() {
        let header = match FrameHeader::probe(state.buffer(), cursor) {
            Probe::Frame(header) => header,
            Probe::Incomplete | Probe::Invalid => {
                cursor += 1;
                continue;
            }
        };

        let next = cursor + header.frame_size as usize;
        match FrameHeader::probe(state.buffer(), next) {
            // Can't confirm yet; revisit this candidate when more bytes arrive
            Probe::Incomplete => break,
            // False sync
            Probe::Invalid => cursor += 1,
            Probe::Frame(_) => {
                let absolute = state.absolute_position(cursor, chunk_len);
                if state.record_frame(absolute) {
                    trace!(offset = absolute, size = header.frame_size, "frame counted");
                    counted += 1;
                }
                cursor = next;
            }
        }
    }

    counted
}
