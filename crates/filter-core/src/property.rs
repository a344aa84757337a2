//! Typed properties attached to pids and packets.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

use crate::types::{CodecId, StreamType};

/// Key of a pid or packet property.
///
/// Well-known keys are enum variants; anything else is addressed by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyKey {
    Id,
    StreamType,
    CodecId,
    Timescale,
    Sparse,
    Unframed,
    Width,
    Height,
    SampleRate,
    Language,
    Named(String),
}

impl PropertyKey {
    pub fn named(name: impl Into<String>) -> Self {
        PropertyKey::Named(name.into())
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Id => write!(f, "ID"),
            PropertyKey::StreamType => write!(f, "StreamType"),
            PropertyKey::CodecId => write!(f, "CodecID"),
            PropertyKey::Timescale => write!(f, "Timescale"),
            PropertyKey::Sparse => write!(f, "Sparse"),
            PropertyKey::Unframed => write!(f, "Unframed"),
            PropertyKey::Width => write!(f, "Width"),
            PropertyKey::Height => write!(f, "Height"),
            PropertyKey::SampleRate => write!(f, "SampleRate"),
            PropertyKey::Language => write!(f, "Language"),
            PropertyKey::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Value of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Uint(u32),
    Bool(bool),
    String(String),
    /// Binary blob, shared without copying.
    Data(Bytes),
}

impl PropertyValue {
    pub fn as_uint(&self) -> Option<u32> {
        match self {
            PropertyValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Bytes> {
        match self {
            PropertyValue::Data(data) => Some(data),
            _ => None,
        }
    }
}

impl From<StreamType> for PropertyValue {
    fn from(value: StreamType) -> Self {
        PropertyValue::Uint(value.into())
    }
}

impl From<CodecId> for PropertyValue {
    fn from(value: CodecId) -> Self {
        PropertyValue::Uint(value.into())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<Bytes> for PropertyValue {
    fn from(value: Bytes) -> Self {
        PropertyValue::Data(value)
    }
}

/// Ordered set of properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: BTreeMap<PropertyKey, PropertyValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Look up a string-keyed property.
    pub fn get_str(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(&PropertyKey::Named(name.to_owned()))
    }

    pub fn set(&mut self, key: PropertyKey, value: impl Into<PropertyValue>) {
        self.entries.insert(key, value.into());
    }

    pub fn remove(&mut self, key: &PropertyKey) -> Option<PropertyValue> {
        self.entries.remove(key)
    }

    /// Replace every entry with the entries of `other`.
    pub fn copy_from(&mut self, other: &PropertyMap) {
        self.entries.clone_from(&other.entries);
    }

    pub fn stream_type(&self) -> Option<StreamType> {
        self.get(&PropertyKey::StreamType)
            .and_then(PropertyValue::as_uint)
            .map(StreamType::from)
    }

    pub fn codec_id(&self) -> Option<CodecId> {
        self.get(&PropertyKey::CodecId)
            .and_then(PropertyValue::as_uint)
            .map(CodecId::from)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
