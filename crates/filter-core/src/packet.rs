use bytes::Bytes;

use crate::property::{PropertyKey, PropertyMap, PropertyValue};
use crate::types::SapType;

/// A unit of media or metadata flowing through a pid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPacket {
    data: Bytes,
    cts: u64,
    duration: u32,
    framing_start: bool,
    framing_end: bool,
    sap: SapType,
    properties: PropertyMap,
}

impl FilterPacket {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Create a packet with `cts` set, the usual shape of demuxer output.
    pub fn with_cts(data: impl Into<Bytes>, cts: u64) -> Self {
        Self {
            cts,
            ..Self::new(data)
        }
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn cts(&self) -> u64 {
        self.cts
    }

    pub fn set_cts(&mut self, cts: u64) {
        self.cts = cts;
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: u32) {
        self.duration = duration;
    }

    /// Returns `(start, end)`: whether the packet begins and ends a frame.
    pub fn framing(&self) -> (bool, bool) {
        (self.framing_start, self.framing_end)
    }

    pub fn set_framing(&mut self, start: bool, end: bool) {
        self.framing_start = start;
        self.framing_end = end;
    }

    pub fn sap(&self) -> SapType {
        self.sap
    }

    pub fn set_sap(&mut self, sap: SapType) {
        self.sap = sap;
    }

    pub fn property_str(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get_str(name)
    }

    pub fn set_property_str(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.properties.set(PropertyKey::named(name), value);
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}
