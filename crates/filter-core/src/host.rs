//! The boundary a filter consumes from its host.
//!
//! Pids are owned by the host and addressed through opaque [`PidId`] handles,
//! so a filter only keeps the handles it was given or created.

use std::fmt;

use bytes::BytesMut;

use crate::FilterError;
use crate::packet::FilterPacket;
use crate::property::{PropertyKey, PropertyValue};

/// Opaque handle to a pid living in the host graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PidId(u32);

impl PidId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pid#{}", self.0)
    }
}

/// Services a host graph provides to the filters it drives.
///
/// Calls never block. Input packets are pulled with [`pid_get_packet`] and
/// released with [`pid_drop_packet`]; output packets are allocated with
/// [`packet_new_alloc`] and handed over with [`packet_send`].
///
/// [`pid_get_packet`]: FilterHost::pid_get_packet
/// [`pid_drop_packet`]: FilterHost::pid_drop_packet
/// [`packet_new_alloc`]: FilterHost::packet_new_alloc
/// [`packet_send`]: FilterHost::packet_send
pub trait FilterHost {
    /// Create a new output pid owned by the calling filter.
    fn pid_new(&mut self) -> Result<PidId, FilterError>;

    /// Remove a pid from the graph. Unknown pids are ignored.
    fn pid_remove(&mut self, pid: PidId);

    /// Run capability negotiation for an input pid offered to the filter.
    fn pid_check_caps(&self, pid: PidId) -> bool;

    /// Request full-frame delivery: every packet is one complete access unit.
    fn pid_set_framing_mode(&mut self, pid: PidId, full_frame: bool);

    fn pid_get_property(&self, pid: PidId, key: &PropertyKey) -> Option<&PropertyValue>;

    fn pid_set_property(
        &mut self,
        pid: PidId,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<(), FilterError>;

    /// Replace all properties of `dst` with the properties of `src`.
    fn pid_copy_properties(&mut self, dst: PidId, src: PidId) -> Result<(), FilterError>;

    /// Peek the packet at the head of an input pid.
    fn pid_get_packet(&self, pid: PidId) -> Option<&FilterPacket>;

    /// Release the packet at the head of an input pid.
    fn pid_drop_packet(&mut self, pid: PidId);

    fn pid_is_eos(&self, pid: PidId) -> bool;

    fn pid_set_eos(&mut self, pid: PidId);

    /// Allocate a zeroed payload buffer of `size` bytes for a packet on `pid`.
    fn packet_new_alloc(&mut self, pid: PidId, size: usize) -> Result<BytesMut, FilterError>;

    /// Queue a packet on an output pid. Ownership moves to the host.
    fn packet_send(&mut self, pid: PidId, packet: FilterPacket) -> Result<(), FilterError>;
}
