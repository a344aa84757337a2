use bytes::Bytes;
use filter_core::test_utils::{audio_pid_properties, init_tracing, video_pid_properties};
use filter_core::{
    CodecId, Filter, FilterPacket, MemoryHost, ProcessStatus, PropertyKey, PropertyValue,
    SapType, StreamType,
};
use scte35_dec::{DEFAULT_MARKER_PROPERTY, SCTE35_DEC_REGISTER, Scte35Dec};

fn packet(cts: u64, marker: Option<&'static [u8]>) -> FilterPacket {
    let mut pck = FilterPacket::with_cts(vec![0x00, 0x00, 0x00, 0x01, 0x65], cts);
    if let Some(marker) = marker {
        pck.set_property_str(DEFAULT_MARKER_PROPERTY, Bytes::from_static(marker));
    }
    pck
}

#[test]
fn extracts_markers_from_video_stream() {
    init_tracing();
    let mut host = MemoryHost::new(&SCTE35_DEC_REGISTER);
    let mut filter = Scte35Dec::new();

    let input = host.connect(&mut filter, video_pid_properties()).unwrap();
    let output = filter.output_pid().unwrap();

    host.push_packet(input, packet(0, None)).unwrap();
    host.push_packet(input, packet(10, Some(&[0xDE, 0xAD, 0xBE, 0xEF])))
        .unwrap();
    host.push_packet(input, packet(20, None)).unwrap();
    host.push_packet(input, packet(30, Some(&[0xCA, 0xFE, 0xBA, 0xBE])))
        .unwrap();
    host.set_source_eos(input).unwrap();

    assert_eq!(host.run(&mut filter).unwrap(), ProcessStatus::EndOfStream);
    assert!(host.is_eos(output));

    let sent = host.take_output(output);
    let summary: Vec<(Vec<u8>, u64, u32)> = sent
        .iter()
        .map(|p| (p.data().to_vec(), p.cts(), p.duration()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (vec![0xDE, 0xAD, 0xBE, 0xEF], 10, 10),
            (vec![0xCA, 0xFE, 0xBA, 0xBE], 30, 20),
        ]
    );
    assert!(sent.iter().all(|p| p.sap() == SapType::Sap1));
    assert_eq!(filter.emitted(), 2);
    assert_eq!(filter.skipped(), 2);
    assert_eq!(filter.last_cts(), 30);
}

#[test]
fn output_pid_describes_sparse_marker_stream() {
    let mut host = MemoryHost::new(&SCTE35_DEC_REGISTER);
    let mut filter = Scte35Dec::new();

    let input = host.connect(&mut filter, audio_pid_properties()).unwrap();
    let output = filter.output_pid().unwrap();

    let mut reconfigured = audio_pid_properties();
    reconfigured.set(PropertyKey::SampleRate, PropertyValue::Uint(44_100));
    reconfigured.set(PropertyKey::Timescale, PropertyValue::Uint(44_100));
    host.reconfigure(&mut filter, input, reconfigured).unwrap();

    let props = host.properties(output).unwrap();
    assert_eq!(props.stream_type(), Some(StreamType::Metadata));
    assert_eq!(props.codec_id(), Some(CodecId::Scte35));
    assert_eq!(props.get(&PropertyKey::Sparse), Some(&PropertyValue::Bool(true)));
    assert_eq!(
        props.get(&PropertyKey::SampleRate),
        Some(&PropertyValue::Uint(44_100))
    );
    assert_eq!(
        props.get(&PropertyKey::Language),
        Some(&PropertyValue::String("eng".to_string()))
    );
}

#[test]
fn packets_without_markers_produce_nothing() {
    let mut host = MemoryHost::new(&SCTE35_DEC_REGISTER);
    let mut filter = Scte35Dec::new();

    let input = host.connect(&mut filter, video_pid_properties()).unwrap();
    let output = filter.output_pid().unwrap();
    for cts in (0..50).map(|i| i * 3_000) {
        host.push_packet(input, packet(cts, None)).unwrap();
    }

    assert_eq!(host.run(&mut filter).unwrap(), ProcessStatus::Continue);
    assert_eq!(host.queued(input), 0);
    assert!(host.take_output(output).is_empty());
    assert_eq!(filter.last_cts(), 0);
}

#[test]
fn independent_instances_keep_separate_state() {
    let mut host_a = MemoryHost::new(&SCTE35_DEC_REGISTER);
    let mut host_b = MemoryHost::new(&SCTE35_DEC_REGISTER);
    let mut filter_a = Scte35Dec::new();
    let mut filter_b = Scte35Dec::new();

    let input_a = host_a.connect(&mut filter_a, video_pid_properties()).unwrap();
    let input_b = host_b.connect(&mut filter_b, audio_pid_properties()).unwrap();

    host_a.push_packet(input_a, packet(1_000, Some(&[0x01]))).unwrap();
    host_b.push_packet(input_b, packet(5, Some(&[0x02]))).unwrap();
    host_a.run(&mut filter_a).unwrap();
    host_b.run(&mut filter_b).unwrap();

    assert_eq!(filter_a.last_cts(), 1_000);
    assert_eq!(filter_b.last_cts(), 5);
}

#[test]
fn removal_before_eos_stops_processing() {
    let mut host = MemoryHost::new(&SCTE35_DEC_REGISTER);
    let mut filter = Scte35Dec::new();

    let input = host.connect(&mut filter, video_pid_properties()).unwrap();
    let output = filter.output_pid().unwrap();
    host.push_packet(input, packet(10, Some(&[0x01]))).unwrap();
    host.disconnect(&mut filter, input).unwrap();

    assert_eq!(filter.process(&mut host).unwrap(), ProcessStatus::Continue);
    assert!(host.output_pids().is_empty());
    assert_eq!(host.removed_pids(), &[output]);
    assert_eq!(filter.emitted(), 0);
}
