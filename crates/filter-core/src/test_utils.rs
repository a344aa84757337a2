use crate::property::{PropertyKey, PropertyMap, PropertyValue};
use crate::types::{CodecId, StreamType};

/// Initialize tracing for tests with appropriate settings
#[inline]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer() // Write to test output
        .try_init();
}

/// Properties of a framed H.264 video pid at 90 kHz.
pub fn video_pid_properties() -> PropertyMap {
    let mut props = PropertyMap::new();
    props.set(PropertyKey::Id, PropertyValue::Uint(1));
    props.set(PropertyKey::StreamType, StreamType::Visual);
    props.set(PropertyKey::CodecId, CodecId::Avc);
    props.set(PropertyKey::Timescale, PropertyValue::Uint(90_000));
    props.set(PropertyKey::Width, PropertyValue::Uint(1920));
    props.set(PropertyKey::Height, PropertyValue::Uint(1080));
    props
}

/// Properties of a framed AAC audio pid at 48 kHz.
pub fn audio_pid_properties() -> PropertyMap {
    let mut props = PropertyMap::new();
    props.set(PropertyKey::Id, PropertyValue::Uint(2));
    props.set(PropertyKey::StreamType, StreamType::Audio);
    props.set(PropertyKey::CodecId, CodecId::Aac);
    props.set(PropertyKey::Timescale, PropertyValue::Uint(48_000));
    props.set(PropertyKey::SampleRate, PropertyValue::Uint(48_000));
    props.set(PropertyKey::Language, PropertyValue::String("eng".to_string()));
    props
}
