/// Packet property carrying SCTE-35 sections, set by demuxers.
pub const DEFAULT_MARKER_PROPERTY: &str = "scte35";

#[derive(Debug, Clone)]
pub struct Scte35DecConfig {
    /// Instance name used as log prefix.
    pub name: String,
    /// Name of the binary packet property holding the splice payload.
    pub marker_property: String,
}

impl Default for Scte35DecConfig {
    fn default() -> Self {
        Self {
            name: "scte35dec".to_string(),
            marker_property: DEFAULT_MARKER_PROPERTY.to_string(),
        }
    }
}
