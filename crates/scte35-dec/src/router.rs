//! Per-packet routing: marker extraction, timing and end of stream.

use filter_core::{
    FilterError, FilterHost, FilterPacket, ProcessStatus, PropertyValue, SapType,
};
use tracing::{debug, trace};

use crate::{Scte35Dec, host_error};

impl Scte35Dec {
    /// Handle at most one input packet.
    ///
    /// Packets without a marker are dropped. A packet carrying a non-empty
    /// marker produces exactly one output packet holding a copy of it.
    pub fn route(&mut self, host: &mut dyn FilterHost) -> Result<ProcessStatus, FilterError> {
        let (Some(input), Some(output)) = (self.input_pid, self.output_pid) else {
            return Ok(ProcessStatus::Continue);
        };

        let marker_property = self.config.marker_property.as_str();
        let head = host.pid_get_packet(input).map(|packet| {
            let marker = packet
                .property_str(marker_property)
                .and_then(PropertyValue::as_data)
                .filter(|data| !data.is_empty())
                .cloned();
            (packet.cts(), marker)
        });

        let Some((cts, marker)) = head else {
            if !host.pid_is_eos(input) {
                return Ok(ProcessStatus::Continue);
            }
            if !self.eos_signaled {
                debug!(
                    "{} End of stream after {} markers",
                    self.config.name, self.emitted
                );
                host.pid_set_eos(output);
                self.eos_signaled = true;
            }
            return Ok(ProcessStatus::EndOfStream);
        };

        let Some(marker) = marker else {
            self.skipped = self.skipped.saturating_add(1);
            trace!(
                "{} No marker at cts {}, {} packets skipped",
                self.config.name, cts, self.skipped
            );
            host.pid_drop_packet(input);
            return Ok(ProcessStatus::Continue);
        };

        let mut buf = host
            .packet_new_alloc(output, marker.len())
            .map_err(|e| host_error("packet_new_alloc", e))?;
        buf.copy_from_slice(&marker);

        let mut out = FilterPacket::new(buf.freeze());
        out.set_framing(true, true);
        out.set_sap(SapType::Sap1);
        // The real marker duration is not known until the next one shows up.
        out.set_duration(marker_duration(self.last_cts, cts));
        out.set_cts(cts);
        self.last_cts = self.last_cts.max(cts);

        trace!(
            "{} Marker at cts {} ({} bytes, duration {})",
            self.config.name,
            cts,
            out.len(),
            out.duration()
        );
        host.packet_send(output, out)
            .map_err(|e| host_error("packet_send", e))?;
        self.emitted = self.emitted.saturating_add(1);

        host.pid_drop_packet(input);
        Ok(ProcessStatus::Continue)
    }
}

/// Gap between the previous marker and `cts`, zero when timestamps go back.
fn marker_duration(last_cts: u64, cts: u64) -> u32 {
    u32::try_from(cts.saturating_sub(last_cts)).unwrap_or(u32::MAX)
}
