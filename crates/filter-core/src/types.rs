//! Stream identity enums shared by every filter.
//!
//! Both enums travel through pid properties as `PropertyValue::Uint`, so each
//! one converts losslessly to and from `u32`. Unknown values are preserved.

use std::fmt;

/// Build a four-character code in big-endian order.
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    ((code[0] as u32) << 24) | ((code[1] as u32) << 16) | ((code[2] as u32) << 8) | code[3] as u32
}

/// Kind of elementary stream carried by a pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamType {
    Unknown,
    Visual,
    Audio,
    Text,
    Metadata,
    File,
    Other(u32),
}

impl StreamType {
    pub const fn code(self) -> u32 {
        match self {
            StreamType::Unknown => 0,
            StreamType::Visual => 4,
            StreamType::Audio => 5,
            StreamType::Text => 13,
            StreamType::Metadata => 16,
            StreamType::File => 32,
            StreamType::Other(v) => v,
        }
    }
}

impl From<u32> for StreamType {
    fn from(value: u32) -> Self {
        match value {
            0 => StreamType::Unknown,
            4 => StreamType::Visual,
            5 => StreamType::Audio,
            13 => StreamType::Text,
            16 => StreamType::Metadata,
            32 => StreamType::File,
            v => StreamType::Other(v),
        }
    }
}

impl From<StreamType> for u32 {
    fn from(value: StreamType) -> Self {
        value.code()
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Unknown => write!(f, "Unknown"),
            StreamType::Visual => write!(f, "Visual"),
            StreamType::Audio => write!(f, "Audio"),
            StreamType::Text => write!(f, "Text"),
            StreamType::Metadata => write!(f, "Metadata"),
            StreamType::File => write!(f, "File"),
            StreamType::Other(v) => write!(f, "Other({v})"),
        }
    }
}

/// Codec identifier of a pid.
///
/// `None` means the codec is not known yet; filters that need framed access
/// units usually exclude it in their input capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecId {
    None,
    Avc,
    Hevc,
    Av1,
    Aac,
    Mp3,
    /// SCTE-35 splice information carried as opaque sections.
    Scte35,
    Other(u32),
}

const CODEC_AVC: u32 = fourcc(b"avc1");
const CODEC_HEVC: u32 = fourcc(b"hvc1");
const CODEC_AV1: u32 = fourcc(b"av01");
const CODEC_AAC: u32 = fourcc(b"mp4a");
const CODEC_MP3: u32 = fourcc(b".mp3");
const CODEC_SCTE35: u32 = fourcc(b"sc35");

impl From<u32> for CodecId {
    fn from(value: u32) -> Self {
        match value {
            0 => CodecId::None,
            CODEC_AVC => CodecId::Avc,
            CODEC_HEVC => CodecId::Hevc,
            CODEC_AV1 => CodecId::Av1,
            CODEC_AAC => CodecId::Aac,
            CODEC_MP3 => CodecId::Mp3,
            CODEC_SCTE35 => CodecId::Scte35,
            v => CodecId::Other(v),
        }
    }
}

impl CodecId {
    pub const fn code(self) -> u32 {
        match self {
            CodecId::None => 0,
            CodecId::Avc => CODEC_AVC,
            CodecId::Hevc => CODEC_HEVC,
            CodecId::Av1 => CODEC_AV1,
            CodecId::Aac => CODEC_AAC,
            CodecId::Mp3 => CODEC_MP3,
            CodecId::Scte35 => CODEC_SCTE35,
            CodecId::Other(v) => v,
        }
    }
}

impl From<CodecId> for u32 {
    fn from(value: CodecId) -> Self {
        value.code()
    }
}

impl fmt::Display for CodecId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecId::None => write!(f, "none"),
            CodecId::Avc => write!(f, "avc"),
            CodecId::Hevc => write!(f, "hevc"),
            CodecId::Av1 => write!(f, "av1"),
            CodecId::Aac => write!(f, "aac"),
            CodecId::Mp3 => write!(f, "mp3"),
            CodecId::Scte35 => write!(f, "scte35"),
            CodecId::Other(v) => write!(f, "other({v:#010x})"),
        }
    }
}

/// Stream access point type of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SapType {
    #[default]
    None,
    /// Closed GOP random access point, the packet decodes on its own.
    Sap1,
}

impl SapType {
    #[inline]
    pub fn is_random_access(&self) -> bool {
        !matches!(self, SapType::None)
    }
}
