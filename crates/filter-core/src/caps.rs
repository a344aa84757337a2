//! Capability declarations and input matching.
//!
//! A filter declares what it accepts and produces as a flat list of
//! capabilities. Input capabilities sharing a key are alternatives: the pid
//! must carry one of the listed values. Excluded capabilities reject a pid
//! carrying that exact value and accept a pid where the property is missing.

use crate::property::{PropertyKey, PropertyMap, PropertyValue};
use crate::types::{CodecId, StreamType};

/// Direction and polarity of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapFlags {
    Input,
    InputExcluded,
    Output,
    /// The value is never produced by a statically declared output.
    OutputStaticExcluded,
}

impl CapFlags {
    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(self, CapFlags::Input | CapFlags::InputExcluded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub flags: CapFlags,
    pub key: PropertyKey,
    pub value: PropertyValue,
}

impl Capability {
    pub const fn stream_type(flags: CapFlags, value: StreamType) -> Self {
        Self {
            flags,
            key: PropertyKey::StreamType,
            value: PropertyValue::Uint(value.code()),
        }
    }

    pub const fn codec_id(flags: CapFlags, value: CodecId) -> Self {
        Self {
            flags,
            key: PropertyKey::CodecId,
            value: PropertyValue::Uint(value.code()),
        }
    }

    pub const fn boolean(flags: CapFlags, key: PropertyKey, value: bool) -> Self {
        Self {
            flags,
            key,
            value: PropertyValue::Bool(value),
        }
    }
}

/// Check whether a pid with `props` satisfies the input side of `caps`.
pub fn caps_accept_input(caps: &[Capability], props: &PropertyMap) -> bool {
    for cap in caps.iter().filter(|c| c.flags == CapFlags::InputExcluded) {
        if props.get(&cap.key) == Some(&cap.value) {
            return false;
        }
    }

    let required = caps.iter().filter(|c| c.flags == CapFlags::Input);
    for cap in required {
        let alternatives = caps
            .iter()
            .filter(|c| c.flags == CapFlags::Input && c.key == cap.key);
        let matched = props
            .get(&cap.key)
            .is_some_and(|value| alternatives.clone().any(|c| &c.value == value));
        if !matched {
            return false;
        }
    }

    true
}
