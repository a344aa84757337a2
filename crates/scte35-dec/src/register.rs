use filter_core::{CapFlags, Capability, CodecId, FilterRegister, PropertyKey, StreamType};

static SCTE35_DEC_CAPS: [Capability; 5] = [
    Capability::stream_type(CapFlags::Input, StreamType::Visual),
    Capability::stream_type(CapFlags::Input, StreamType::Audio),
    Capability::boolean(CapFlags::InputExcluded, PropertyKey::Unframed, true),
    Capability::codec_id(CapFlags::InputExcluded, CodecId::None),
    Capability::boolean(CapFlags::OutputStaticExcluded, PropertyKey::Unframed, true),
];

pub static SCTE35_DEC_REGISTER: FilterRegister = FilterRegister {
    name: "scte35dec",
    description: "SCTE35 decoder",
    help: "This filter extracts SCTE-35 markers attached as properties to audio and video packets.\n",
    explicit_only: true,
    caps: &SCTE35_DEC_CAPS,
};

#[cfg(test)]
mod tests {
    use super::*;
    use filter_core::test_utils::{audio_pid_properties, video_pid_properties};
    use filter_core::{PropertyMap, caps_accept_input};

    #[test]
    fn test_register_is_explicit_and_dynamic() {
        assert_eq!(SCTE35_DEC_REGISTER.name, "scte35dec");
        assert!(SCTE35_DEC_REGISTER.explicit_only);
        assert!(!SCTE35_DEC_REGISTER.has_static_output());
        assert_eq!(SCTE35_DEC_REGISTER.input_caps().count(), 4);
    }

    #[test]
    fn test_accepts_framed_audio_and_video() {
        assert!(caps_accept_input(&SCTE35_DEC_CAPS, &video_pid_properties()));
        assert!(caps_accept_input(&SCTE35_DEC_CAPS, &audio_pid_properties()));
    }

    #[test]
    fn test_rejects_unframed_codecless_and_metadata() {
        let mut unframed = video_pid_properties();
        unframed.set(PropertyKey::Unframed, true);
        assert!(!caps_accept_input(&SCTE35_DEC_CAPS, &unframed));

        let mut no_codec = audio_pid_properties();
        no_codec.set(PropertyKey::CodecId, CodecId::None);
        assert!(!caps_accept_input(&SCTE35_DEC_CAPS, &no_codec));

        let mut metadata = PropertyMap::new();
        metadata.set(PropertyKey::StreamType, StreamType::Metadata);
        metadata.set(PropertyKey::CodecId, CodecId::Scte35);
        assert!(!caps_accept_input(&SCTE35_DEC_CAPS, &metadata));
    }
}
