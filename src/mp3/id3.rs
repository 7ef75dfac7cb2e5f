//! ID3v2 tag boundary detection
//!
//! ID3v2 tags appear BEFORE the audio frames. Header layout (10 bytes):
//! - "ID3" (3 bytes) - magic
//! - Version (2 bytes)
//! - Flags (1 byte) - bit 0x10 = footer present
//! - Size (4 bytes) - synchsafe integer (7 bits per byte), excludes header/footer
//!
//! Only the boundary matters here; no tag fields are decoded.

pub const ID3_MAGIC: &[u8; 3] = b"ID3";
pub const ID3_HEADER_LEN: usize = 10;
pub const ID3_FOOTER_LEN: usize = 10;

const FLAG_FOOTER: u8 = 0x10;

/// Boundary information of a leading ID3v2 tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id3v2TagInfo {
    /// Declared tag data size (synchsafe-decoded)
    pub size: u32,
    pub has_footer: bool,
    /// Header + data + optional footer
    pub total_len: u64,
}

/// What the start of a buffer says about a leading tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagProbe {
    /// No ID3v2 signature; frames may start right away
    Absent,
    /// Looks like (the start of) a tag, but the header isn't complete yet
    NeedMoreData,
    /// Complete header read
    Present(Id3v2TagInfo),
}

impl Id3v2TagInfo {
    /// Inspect the start of `buf` for an ID3v2 header.
    ///
    /// A buffer shorter than the magic that matches its prefix (`"I"`,
    /// `"ID"`) is reported as `NeedMoreData` so tiny chunks don't make the
    /// tag invisible.
    pub fn probe(buf: &[u8]) -> TagProbe {
        let magic_len = buf.len().min(ID3_MAGIC.len());
        if buf[..magic_len] != ID3_MAGIC[..magic_len] {
            return TagProbe::Absent;
        }
        if buf.len() < ID3_HEADER_LEN {
            return TagProbe::NeedMoreData;
        }

        let has_footer = buf[5] & FLAG_FOOTER != 0;
        let size = synchsafe_u32([buf[6], buf[7], buf[8], buf[9]]);
        let footer_len = if has_footer { ID3_FOOTER_LEN } else { 0 };

        TagProbe::Present(Id3v2TagInfo {
            size,
            has_footer,
            total_len: (ID3_HEADER_LEN + footer_len) as u64 + u64::from(size),
        })
    }
}

/// Decode a 4-byte synchsafe integer (low 7 bits of each byte)
pub fn synchsafe_u32(bytes: [u8; 4]) -> u32 {
    ((bytes[0] as u32 & 0x7F) << 21)
        | ((bytes[1] as u32 & 0x7F) << 14)
        | ((bytes[2] as u32 & 0x7F) << 7)
        | (bytes[3] as u32 & 0x7F)
}
