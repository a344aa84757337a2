//! # In-memory host
//!
//! A [`FilterHost`] backed by plain collections. It connects source pids to a
//! single filter, feeds them packets and collects whatever the filter sends
//! on the pids it creates. Useful to embed a filter without a graph runtime
//! and to exercise filters in tests.
//!
//! ## Usage
//!
//! Create a host for the filter's register, connect an input with
//! [`MemoryHost::connect`], queue packets with [`MemoryHost::push_packet`]
//! and drive the filter with [`MemoryHost::run`].

use std::collections::{BTreeMap, VecDeque};

use bytes::BytesMut;
use tracing::{debug, trace, warn};

use crate::caps::caps_accept_input;
use crate::filter::{Filter, ProcessStatus};
use crate::host::{FilterHost, PidId};
use crate::packet::FilterPacket;
use crate::property::{PropertyKey, PropertyMap, PropertyValue};
use crate::register::FilterRegister;
use crate::FilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PidKind {
    /// Created by the host, feeds the filter.
    Source,
    /// Created by the filter through [`FilterHost::pid_new`].
    Output,
}

#[derive(Debug)]
struct MemoryPid {
    kind: PidKind,
    properties: PropertyMap,
    packets: VecDeque<FilterPacket>,
    eos: bool,
    /// Number of `pid_set_eos` calls received.
    eos_signals: u32,
    full_frame: bool,
}

impl MemoryPid {
    fn new(kind: PidKind, properties: PropertyMap) -> Self {
        Self {
            kind,
            properties,
            packets: VecDeque::new(),
            eos: false,
            eos_signals: 0,
            full_frame: false,
        }
    }
}

/// In-memory implementation of [`FilterHost`].
pub struct MemoryHost {
    register: &'static FilterRegister,
    pids: BTreeMap<PidId, MemoryPid>,
    next_id: u32,
    fail_pid_new: bool,
    fail_packet_alloc: bool,
    removed: Vec<PidId>,
}

impl MemoryHost {
    /// Create a host negotiating capabilities against `register`.
    pub fn new(register: &'static FilterRegister) -> Self {
        Self {
            register,
            pids: BTreeMap::new(),
            next_id: 1,
            fail_pid_new: false,
            fail_packet_alloc: false,
            removed: Vec::new(),
        }
    }

    fn alloc_id(&mut self) -> PidId {
        let id = PidId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a source pid carrying `properties`. The filter is not notified.
    pub fn add_source_pid(&mut self, properties: PropertyMap) -> PidId {
        let id = self.alloc_id();
        self.pids
            .insert(id, MemoryPid::new(PidKind::Source, properties));
        id
    }

    /// Add a source pid and offer it to `filter`.
    pub fn connect(
        &mut self,
        filter: &mut dyn Filter,
        properties: PropertyMap,
    ) -> Result<PidId, FilterError> {
        let pid = self.add_source_pid(properties);
        debug!("{} connecting {}", filter.name(), pid);
        filter.configure_pid(self, pid, false)?;
        Ok(pid)
    }

    /// Replace the properties of a source pid and notify `filter`.
    pub fn reconfigure(
        &mut self,
        filter: &mut dyn Filter,
        pid: PidId,
        properties: PropertyMap,
    ) -> Result<(), FilterError> {
        let entry = self.pids.get_mut(&pid).ok_or(FilterError::UnknownPid(pid))?;
        entry.properties = properties;
        debug!("{} reconfiguring {}", filter.name(), pid);
        filter.configure_pid(self, pid, false)
    }

    /// Notify `filter` that a source pid is gone, then drop it.
    pub fn disconnect(&mut self, filter: &mut dyn Filter, pid: PidId) -> Result<(), FilterError> {
        debug!("{} disconnecting {}", filter.name(), pid);
        filter.configure_pid(self, pid, true)?;
        self.pids.remove(&pid);
        Ok(())
    }

    pub fn push_packet(&mut self, pid: PidId, packet: FilterPacket) -> Result<(), FilterError> {
        let entry = self.pids.get_mut(&pid).ok_or(FilterError::UnknownPid(pid))?;
        entry.packets.push_back(packet);
        Ok(())
    }

    /// Signal end of stream on a source pid once its queue drains.
    pub fn set_source_eos(&mut self, pid: PidId) -> Result<(), FilterError> {
        let entry = self.pids.get_mut(&pid).ok_or(FilterError::UnknownPid(pid))?;
        entry.eos = true;
        Ok(())
    }

    /// Make the next `pid_new` calls fail with [`FilterError::OutOfMemory`].
    pub fn fail_pid_new(&mut self, fail: bool) {
        self.fail_pid_new = fail;
    }

    /// Make `packet_new_alloc` fail with [`FilterError::OutOfMemory`].
    pub fn fail_packet_alloc(&mut self, fail: bool) {
        self.fail_packet_alloc = fail;
    }

    /// Pids created by the filter and still in the graph.
    pub fn output_pids(&self) -> Vec<PidId> {
        self.pids
            .iter()
            .filter(|(_, p)| p.kind == PidKind::Output)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Pids the filter removed from the graph, in removal order.
    pub fn removed_pids(&self) -> &[PidId] {
        &self.removed
    }

    pub fn properties(&self, pid: PidId) -> Option<&PropertyMap> {
        self.pids.get(&pid).map(|p| &p.properties)
    }

    pub fn is_full_frame(&self, pid: PidId) -> bool {
        self.pids.get(&pid).is_some_and(|p| p.full_frame)
    }

    pub fn is_eos(&self, pid: PidId) -> bool {
        self.pids.get(&pid).is_some_and(|p| p.eos)
    }

    /// How many times the filter signaled end of stream on `pid`.
    pub fn eos_signal_count(&self, pid: PidId) -> u32 {
        self.pids.get(&pid).map_or(0, |p| p.eos_signals)
    }

    /// Packets still queued on a pid. For output pids, everything sent so far.
    pub fn queued(&self, pid: PidId) -> usize {
        self.pids.get(&pid).map_or(0, |p| p.packets.len())
    }

    /// Take every packet the filter sent on `pid`.
    pub fn take_output(&mut self, pid: PidId) -> Vec<FilterPacket> {
        self.pids
            .get_mut(&pid)
            .filter(|p| p.kind == PidKind::Output)
            .map(|p| p.packets.drain(..).collect())
            .unwrap_or_default()
    }

    fn pending_source_packets(&self) -> usize {
        self.pids
            .values()
            .filter(|p| p.kind == PidKind::Source)
            .map(|p| p.packets.len())
            .sum()
    }

    fn source_eos_pending(&self) -> bool {
        self.pids
            .values()
            .any(|p| p.kind == PidKind::Source && p.eos)
    }

    /// Call `filter.process` until it reports end of stream or stops making
    /// progress on the queued source packets.
    pub fn run(&mut self, filter: &mut dyn Filter) -> Result<ProcessStatus, FilterError> {
        loop {
            let pending = self.pending_source_packets();
            if pending == 0 && !self.source_eos_pending() {
                return Ok(ProcessStatus::Continue);
            }

            let status = filter.process(self)?;
            if status == ProcessStatus::EndOfStream {
                debug!("{} reached end of stream", filter.name());
                return Ok(status);
            }

            if self.pending_source_packets() >= pending {
                trace!("{} made no progress, {} packets pending", filter.name(), pending);
                return Ok(status);
            }
        }
    }
}

impl FilterHost for MemoryHost {
    fn pid_new(&mut self) -> Result<PidId, FilterError> {
        if self.fail_pid_new {
            return Err(FilterError::OutOfMemory);
        }
        let id = self.alloc_id();
        self.pids
            .insert(id, MemoryPid::new(PidKind::Output, PropertyMap::new()));
        Ok(id)
    }

    fn pid_remove(&mut self, pid: PidId) {
        if self.pids.remove(&pid).is_some() {
            self.removed.push(pid);
        } else {
            warn!("Removing unknown {}", pid);
        }
    }

    fn pid_check_caps(&self, pid: PidId) -> bool {
        self.pids
            .get(&pid)
            .is_some_and(|p| caps_accept_input(self.register.caps, &p.properties))
    }

    fn pid_set_framing_mode(&mut self, pid: PidId, full_frame: bool) {
        if let Some(entry) = self.pids.get_mut(&pid) {
            entry.full_frame = full_frame;
        }
    }

    fn pid_get_property(&self, pid: PidId, key: &PropertyKey) -> Option<&PropertyValue> {
        self.pids.get(&pid).and_then(|p| p.properties.get(key))
    }

    fn pid_set_property(
        &mut self,
        pid: PidId,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<(), FilterError> {
        let entry = self.pids.get_mut(&pid).ok_or(FilterError::UnknownPid(pid))?;
        entry.properties.set(key, value);
        Ok(())
    }

    fn pid_copy_properties(&mut self, dst: PidId, src: PidId) -> Result<(), FilterError> {
        let source = self
            .pids
            .get(&src)
            .ok_or(FilterError::UnknownPid(src))?
            .properties
            .clone();
        let entry = self.pids.get_mut(&dst).ok_or(FilterError::UnknownPid(dst))?;
        entry.properties.copy_from(&source);
        Ok(())
    }

    fn pid_get_packet(&self, pid: PidId) -> Option<&FilterPacket> {
        self.pids
            .get(&pid)
            .filter(|p| p.kind == PidKind::Source)
            .and_then(|p| p.packets.front())
    }

    fn pid_drop_packet(&mut self, pid: PidId) {
        if let Some(entry) = self.pids.get_mut(&pid) {
            entry.packets.pop_front();
        }
    }

    fn pid_is_eos(&self, pid: PidId) -> bool {
        self.pids
            .get(&pid)
            .is_some_and(|p| p.eos && p.packets.is_empty())
    }

    fn pid_set_eos(&mut self, pid: PidId) {
        if let Some(entry) = self.pids.get_mut(&pid) {
            entry.eos = true;
            entry.eos_signals = entry.eos_signals.saturating_add(1);
        }
    }

    fn packet_new_alloc(&mut self, pid: PidId, size: usize) -> Result<BytesMut, FilterError> {
        if !self.pids.contains_key(&pid) {
            return Err(FilterError::UnknownPid(pid));
        }
        if self.fail_packet_alloc {
            return Err(FilterError::OutOfMemory);
        }
        Ok(BytesMut::zeroed(size))
    }

    fn packet_send(&mut self, pid: PidId, packet: FilterPacket) -> Result<(), FilterError> {
        let entry = self.pids.get_mut(&pid).ok_or(FilterError::UnknownPid(pid))?;
        entry.packets.push_back(packet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::{CapFlags, Capability};
    use crate::test_utils::{audio_pid_properties, init_tracing, video_pid_properties};
    use crate::types::StreamType;

    static PASS_CAPS: [Capability; 2] = [
        Capability::stream_type(CapFlags::Input, StreamType::Visual),
        Capability::stream_type(CapFlags::Output, StreamType::Visual),
    ];

    static PASS_REGISTER: FilterRegister = FilterRegister {
        name: "passthrough",
        description: "Forwards video packets",
        help: "",
        explicit_only: false,
        caps: &PASS_CAPS,
    };

    /// Forwards every packet of the last configured pid to one output.
    #[derive(Default)]
    struct Passthrough {
        input: Option<PidId>,
        output: Option<PidId>,
    }

    impl Filter for Passthrough {
        fn register(&self) -> &'static FilterRegister {
            &PASS_REGISTER
        }

        fn configure_pid(
            &mut self,
            host: &mut dyn FilterHost,
            pid: PidId,
            is_remove: bool,
        ) -> Result<(), FilterError> {
            if is_remove {
                if let Some(output) = self.output.take() {
                    host.pid_remove(output);
                }
                self.input = None;
                return Ok(());
            }
            if !host.pid_check_caps(pid) {
                return Err(FilterError::NotSupported);
            }
            let output = match self.output {
                Some(output) => output,
                None => host.pid_new()?,
            };
            self.output = Some(output);
            self.input = Some(pid);
            host.pid_copy_properties(output, pid)
        }

        fn process(&mut self, host: &mut dyn FilterHost) -> Result<ProcessStatus, FilterError> {
            let (Some(input), Some(output)) = (self.input, self.output) else {
                return Ok(ProcessStatus::Continue);
            };
            let Some(packet) = host.pid_get_packet(input).cloned() else {
                if host.pid_is_eos(input) {
                    host.pid_set_eos(output);
                    return Ok(ProcessStatus::EndOfStream);
                }
                return Ok(ProcessStatus::Continue);
            };
            host.packet_send(output, packet)?;
            host.pid_drop_packet(input);
            Ok(ProcessStatus::Continue)
        }
    }

    #[test]
    fn test_run_forwards_until_eos() {
        init_tracing();
        let mut host = MemoryHost::new(&PASS_REGISTER);
        let mut filter = Passthrough::default();

        let input = host.connect(&mut filter, video_pid_properties()).unwrap();
        for cts in [0, 3_000, 6_000] {
            host.push_packet(input, FilterPacket::with_cts(vec![0u8; 4], cts))
                .unwrap();
        }

        assert_eq!(host.run(&mut filter).unwrap(), ProcessStatus::Continue);
        host.set_source_eos(input).unwrap();
        assert_eq!(host.run(&mut filter).unwrap(), ProcessStatus::EndOfStream);

        let output = host.output_pids()[0];
        assert!(host.is_eos(output));
        assert_eq!(host.eos_signal_count(output), 1);
        assert_eq!(host.eos_signal_count(input), 0);
        assert_eq!(host.properties(output), Some(&video_pid_properties()));
        let cts: Vec<u64> = host.take_output(output).iter().map(|p| p.cts()).collect();
        assert_eq!(cts, vec![0, 3_000, 6_000]);
    }

    #[test]
    fn test_connect_rejects_unsupported_pid() {
        let mut host = MemoryHost::new(&PASS_REGISTER);
        let mut filter = Passthrough::default();

        let result = host.connect(&mut filter, audio_pid_properties());
        assert!(matches!(result, Err(FilterError::NotSupported)));
        assert!(host.output_pids().is_empty());
    }

    #[test]
    fn test_run_stops_when_filter_is_idle() {
        let mut host = MemoryHost::new(&PASS_REGISTER);
        let mut filter = Passthrough::default();

        let input = host.add_source_pid(video_pid_properties());
        host.push_packet(input, FilterPacket::new(vec![1])).unwrap();

        assert_eq!(host.run(&mut filter).unwrap(), ProcessStatus::Continue);
        assert_eq!(host.queued(input), 1);
    }

    #[test]
    fn test_allocation_failures() {
        let mut host = MemoryHost::new(&PASS_REGISTER);
        host.fail_pid_new(true);
        assert!(matches!(host.pid_new(), Err(FilterError::OutOfMemory)));
        host.fail_pid_new(false);

        let pid = host.pid_new().unwrap();
        assert_eq!(host.packet_new_alloc(pid, 3).unwrap().as_ref(), &[0, 0, 0]);
        host.fail_packet_alloc(true);
        assert!(matches!(
            host.packet_new_alloc(pid, 3),
            Err(FilterError::OutOfMemory)
        ));
    }

    #[test]
    fn test_disconnect_removes_filter_output() {
        let mut host = MemoryHost::new(&PASS_REGISTER);
        let mut filter = Passthrough::default();

        let input = host.connect(&mut filter, video_pid_properties()).unwrap();
        let output = host.output_pids()[0];
        host.disconnect(&mut filter, input).unwrap();

        assert!(host.output_pids().is_empty());
        assert_eq!(host.removed_pids(), &[output]);
        assert!(host.properties(input).is_none());
    }
}
