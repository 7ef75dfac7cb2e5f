//! MPEG-1 Layer III frame header parsing
//!
//! MP3 frames start with a sync word (11 bits of 1s) followed by header info.
//! Frame header structure (4 bytes):
//! AAAAAAAA AAABBCCD EEEEFFGH IIJJKLMM
//!
//! A = sync (11 bits)
//! B = MPEG version (2 bits): 00=2.5, 01=reserved, 10=2, 11=1
//! C = Layer (2 bits): 00=reserved, 01=III, 10=II, 11=I
//! D = Protection bit (CRC)
//! E = Bitrate index (4 bits)
//! F = Sample rate index (2 bits)
//! G = Padding bit
//! H = Private bit
//! I = Channel mode (2 bits)
//! J = Mode extension (2 bits)
//! K = Copyright
//! L = Original
//! M = Emphasis (2 bits)
//!
//! Only MPEG-1 Layer III is accepted. Every other version/layer combination
//! decodes fine but is rejected as "not a frame" so the scanner resyncs past it.

/// Length of a frame header in bytes.
pub const HEADER_LEN: usize = 4;

/// Smallest frame size accepted as plausible.
pub const MIN_FRAME_SIZE: u32 = 20;

/// Largest frame size accepted as plausible.
pub const MAX_FRAME_SIZE: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MpegVersion {
    Mpeg1,
    Mpeg2,
    Mpeg25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Layer1,
    Layer2,
    Layer3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub version: MpegVersion,
    pub layer: Layer,
    pub bitrate_index: u8,
    pub sample_rate_index: u8,
    /// Bitrate in kbps
    pub bitrate: u32,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub padding: bool,
    /// CRC protection flag (stored inverted in the stream: 0 means protected)
    pub protected: bool,
    /// Total frame length in bytes, header included
    pub frame_size: u32,
}

/// Outcome of looking for a header at a given buffer offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// A valid MPEG-1 Layer III header starts here
    Frame(FrameHeader),
    /// Fewer than 4 bytes available, can't decide yet
    Incomplete,
    /// Definitely not a usable header
    Invalid,
}

// Bitrate lookup table (kbps), indexed by the 4-bit bitrate index.
// Index 0 = free, 15 = bad; both rejected before lookup.
const BITRATES_V1_L3: [u32; 16] = [
    0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 288, 320,
];
const SAMPLE_RATES_V1: [u32; 3] = [44100, 48000, 32000];

impl FrameHeader {
    /// Parse a 4-byte frame header
    pub fn parse(header: [u8; 4]) -> Option<Self> {
        // Check sync word (11 bits)
        if header[0] != 0xFF || (header[1] & 0xE0) != 0xE0 {
            return None;
        }

        // MPEG version (bits 4-3 of byte 1)
        let version = match (header[1] >> 3) & 0x03 {
            0 => MpegVersion::Mpeg25,
            2 => MpegVersion::Mpeg2,
            3 => MpegVersion::Mpeg1,
            _ => return None, // Reserved
        };

        // Layer (bits 2-1 of byte 1)
        let layer = match (header[1] >> 1) & 0x03 {
            1 => Layer::Layer3,
            2 => Layer::Layer2,
            3 => Layer::Layer1,
            _ => return None, // Reserved
        };

        if version != MpegVersion::Mpeg1 || layer != Layer::Layer3 {
            return None;
        }

        // Bitrate index (bits 7-4 of byte 2)
        let bitrate_index = (header[2] >> 4) & 0x0F;
        if !(1..=14).contains(&bitrate_index) {
            return None; // Free or bad bitrate
        }

        // Sample rate index (bits 3-2 of byte 2)
        let sample_rate_index = (header[2] >> 2) & 0x03;
        let sample_rate = *SAMPLE_RATES_V1.get(sample_rate_index as usize)?;

        // Padding (bit 1 of byte 2)
        let padding = (header[2] & 0x02) != 0;

        // Protection (bit 0 of byte 2), inverted
        let protected = (header[2] & 0x01) == 0;

        let bitrate = BITRATES_V1_L3[bitrate_index as usize];
        let frame_size = 144 * bitrate * 1000 / sample_rate + u32::from(padding);

        if !(MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&frame_size) {
            return None;
        }

        Some(FrameHeader {
            version,
            layer,
            bitrate_index,
            sample_rate_index,
            bitrate,
            sample_rate,
            padding,
            protected,
            frame_size,
        })
    }

    /// Look for a header at `offset` in `buf`.
    pub fn probe(buf: &[u8], offset: usize) -> Probe {
        let Some(bytes) = offset
            .checked_add(HEADER_LEN)
            .and_then(|end| buf.get(offset..end))
        else {
            return Probe::Incomplete;
        };

        match FrameHeader::parse([bytes[0], bytes[1], bytes[2], bytes[3]]) {
            Some(header) => Probe::Frame(header),
            None => Probe::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // BACKGROUND: MPEG-1 Layer III frame headers
    // ==========================================================================
    //
    // An MP3 file is a sequence of "frames", each carrying ~26ms of compressed
    // audio at 44.1kHz. Every frame starts with a 4-byte header:
    //
    // ┌─────────┬───────┬───────┬───────┬────────┬────────┬─────┬─────┬──────┐
    // │ Sync    │Version│ Layer │Protect│Bitrate │SampRate│Pad  │Priv │ChanMd│ ...
    // │11 bits  │2 bits │2 bits │1 bit  │4 bits  │2 bits  │1 bit│1 bit│2 bits│
    // └─────────┴───────┴───────┴───────┴────────┴────────┴─────┴─────┴──────┘
    //
    // The frame counter only cares about MPEG-1 Layer III. Anything else is
    // treated exactly like random bytes: not a frame, advance and resync.
    // ==========================================================================

    /// MPEG1 Layer3 128kbps 44.1kHz stereo
    ///
    /// - 0xFF: First 8 bits of sync word
    /// - 0xFB: Remaining sync (111), MPEG1 (11), Layer3 (01), no CRC (1)
    /// - 0x90: Bitrate index 9 = 128kbps, sample rate 0 = 44100Hz, no padding
    /// - 0x00: Stereo
    fn valid_mp3_header() -> [u8; 4] {
        [0xFF, 0xFB, 0x90, 0x00]
    }

    #[test]
    fn test_parse_valid_header_128kbps() {
        let parsed = FrameHeader::parse(valid_mp3_header()).expect("Should parse valid header");

        assert_eq!(parsed.version, MpegVersion::Mpeg1);
        assert_eq!(parsed.layer, Layer::Layer3);
        assert_eq!(parsed.bitrate_index, 9);
        assert_eq!(parsed.sample_rate_index, 0);
        assert_eq!(parsed.bitrate, 128);
        assert_eq!(parsed.sample_rate, 44100);
        assert!(!parsed.padding);
        // floor(144 * 128000 / 44100) = floor(417.95) = 417
        assert_eq!(parsed.frame_size, 417);
    }

    #[test]
    fn test_parse_invalid_sync() {
        assert!(FrameHeader::parse([0x00, 0x00, 0x00, 0x00]).is_none());

        // 0xFF 0x00: first byte OK, but we need 111xxxxx in the second
        assert!(FrameHeader::parse([0xFF, 0x00, 0x90, 0x00]).is_none());
        // 0xFF 0xDB: only two of the three high bits set
        assert!(FrameHeader::parse([0xFF, 0xDB, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_parse_reserved_version() {
        // 0xEB = 11101011: version = 01 (reserved)
        assert!(FrameHeader::parse([0xFF, 0xEB, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_parse_reserved_layer() {
        // 0xF9 = 11111001: MPEG1, layer = 00 (reserved)
        assert!(FrameHeader::parse([0xFF, 0xF9, 0x90, 0x00]).is_none());
    }

    // ==========================================================================
    // UNSUPPORTED STREAMS
    // ==========================================================================
    //
    // MPEG-2, MPEG-2.5, Layer I and Layer II all have well-formed headers, but
    // the counter rejects them outright rather than counting them.
    // ==========================================================================

    #[test]
    fn test_rejects_mpeg2_and_mpeg25() {
        // MPEG2 Layer3: version bits 10 -> 0xF3
        assert!(FrameHeader::parse([0xFF, 0xF3, 0x90, 0x00]).is_none());
        // MPEG2.5 Layer3: version bits 00 -> 0xE3
        assert!(FrameHeader::parse([0xFF, 0xE3, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_rejects_layer1_and_layer2() {
        // MPEG1 Layer2: layer bits 10 -> 0xFD
        assert!(FrameHeader::parse([0xFF, 0xFD, 0x90, 0x00]).is_none());
        // MPEG1 Layer1: layer bits 11 -> 0xFF
        assert!(FrameHeader::parse([0xFF, 0xFF, 0x90, 0x00]).is_none());
    }

    #[test]
    fn test_parse_invalid_bitrate() {
        // Index 15 (bad)
        assert!(FrameHeader::parse([0xFF, 0xFB, 0xF0, 0x00]).is_none());
        // Index 0 (free format - unsupported)
        assert!(FrameHeader::parse([0xFF, 0xFB, 0x00, 0x00]).is_none());
    }

    #[test]
    fn test_parse_invalid_sample_rate() {
        // 0x9C = 10011100: bitrate 9, sample rate = 11 (reserved)
        assert!(FrameHeader::parse([0xFF, 0xFB, 0x9C, 0x00]).is_none());
    }

    #[test]
    fn test_parse_with_padding() {
        // 0x92 = 0x90 | 0x02 = 128kbps with padding -> one extra byte
        let parsed = FrameHeader::parse([0xFF, 0xFB, 0x92, 0x00]).expect("Should parse");
        assert!(parsed.padding);
        assert_eq!(parsed.frame_size, 418);
    }

    #[test]
    fn test_protection_flag_is_inverted() {
        let parsed = FrameHeader::parse([0xFF, 0xFB, 0x90, 0x00]).expect("Should parse");
        assert!(parsed.protected);

        let parsed = FrameHeader::parse([0xFF, 0xFB, 0x91, 0x00]).expect("Should parse");
        assert!(!parsed.protected);
        assert_eq!(parsed.frame_size, 417);
    }

    #[test]
    fn test_sample_rates() {
        // 0x94: 128kbps @ 48000Hz -> floor(144 * 128000 / 48000) = 384
        let parsed = FrameHeader::parse([0xFF, 0xFB, 0x94, 0x00]).expect("Should parse");
        assert_eq!(parsed.sample_rate, 48000);
        assert_eq!(parsed.frame_size, 384);

        // 0x98: 128kbps @ 32000Hz -> 144 * 128000 / 32000 = 576
        let parsed = FrameHeader::parse([0xFF, 0xFB, 0x98, 0x00]).expect("Should parse");
        assert_eq!(parsed.sample_rate, 32000);
        assert_eq!(parsed.frame_size, 576);
    }

    // ==========================================================================
    // BITRATE INDEX TABLE
    // ==========================================================================
    //
    // Index: 0    1    2    3    4    5    6    7    8    9   10   11   12   13   14   15
    // kbps:  -   32   40   48   56   64   80   96  112  128  160  192  224  256  288    -
    // ==========================================================================

    #[test]
    fn test_bitrate_index_table() {
        let test_cases = [
            (0x10, 32),
            (0x20, 40),
            (0x30, 48),
            (0x40, 56),
            (0x50, 64),
            (0x60, 80),
            (0x70, 96),
            (0x80, 112),
            (0x90, 128),
            (0xA0, 160),
            (0xB0, 192),
            (0xC0, 224),
            (0xD0, 256),
            (0xE0, 288),
        ];

        for (byte2, expected_bitrate) in test_cases {
            let parsed = FrameHeader::parse([0xFF, 0xFB, byte2, 0x00])
                .unwrap_or_else(|| panic!("Should parse header with byte 0x{:02X}", byte2));
            assert_eq!(
                parsed.bitrate, expected_bitrate,
                "Byte 0x{:02X} should give {}kbps",
                byte2, expected_bitrate
            );
        }
    }

    #[test]
    fn test_frame_sizes_stay_within_sanity_bounds() {
        // Every accepted header lands well inside [20, 10000]
        for byte2 in 0u8..=0xFF {
            if let Some(parsed) = FrameHeader::parse([0xFF, 0xFB, byte2, 0x00]) {
                assert!(parsed.frame_size >= MIN_FRAME_SIZE);
                assert!(parsed.frame_size <= MAX_FRAME_SIZE);
            }
        }
        // Largest: 288kbps @ 32kHz with padding = 1296 + 1
        let largest = FrameHeader::parse([0xFF, 0xFB, 0xEA, 0x00]).expect("Should parse");
        assert_eq!(largest.frame_size, 1297);
    }

    // ==========================================================================
    // PROBING A BUFFER
    // ==========================================================================

    #[test]
    fn test_probe_incomplete_is_not_invalid() {
        let buf = [0xFF, 0xFB, 0x90];
        assert_eq!(FrameHeader::probe(&buf, 0), Probe::Incomplete);
        assert_eq!(FrameHeader::probe(&buf, 10), Probe::Incomplete);
        assert_eq!(FrameHeader::probe(&buf, usize::MAX), Probe::Incomplete);
    }

    #[test]
    fn test_probe_at_offset() {
        let buf = [0x00, 0x11, 0xFF, 0xFB, 0x90, 0x00];
        assert_eq!(FrameHeader::probe(&buf, 0), Probe::Invalid);
        match FrameHeader::probe(&buf, 2) {
            Probe::Frame(header) => assert_eq!(header.frame_size, 417),
            other => panic!("expected frame, got {:?}", other),
        }
    }
}
