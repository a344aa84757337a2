//! Input/output pid lifecycle.
//!
//! The filter maps its single input pid onto a single metadata pid. The
//! output is created on the first successful attach and kept across
//! reconfigurations; it goes away with the input.

use filter_core::{
    CodecId, FilterError, FilterHost, PidId, PropertyKey, PropertyValue, StreamType,
};
use tracing::{debug, trace, warn};

use crate::{Scte35Dec, host_error};

impl Scte35Dec {
    /// Attach or reconfigure the input pid.
    ///
    /// Input properties are copied onto the output on every call, then the
    /// stream identity is overridden so the output reads as a sparse SCTE-35
    /// metadata stream.
    pub fn attach(&mut self, host: &mut dyn FilterHost, pid: PidId) -> Result<(), FilterError> {
        if !host.pid_check_caps(pid) {
            warn!(
                "{} Rejecting {}: capabilities not supported",
                self.config.name, pid
            );
            return Err(FilterError::NotSupported);
        }

        let output = match self.output_pid {
            Some(output) => {
                debug!("{} Reconfiguring {} -> {}", self.config.name, pid, output);
                output
            }
            None => {
                let output = host.pid_new()?;
                debug!("{} Attached {} -> {}", self.config.name, pid, output);
                self.output_pid = Some(output);
                self.eos_signaled = false;
                output
            }
        };

        if let Some(previous) = self.input_pid.filter(|&p| p != pid) {
            debug!(
                "{} Switching input from {} to {}",
                self.config.name, previous, pid
            );
        }
        self.input_pid = Some(pid);
        host.pid_set_framing_mode(pid, true);

        host.pid_copy_properties(output, pid)
            .map_err(|e| host_error("pid_copy_properties", e))?;
        for (key, value) in [
            (PropertyKey::StreamType, StreamType::Metadata.into()),
            (PropertyKey::CodecId, CodecId::Scte35.into()),
            (PropertyKey::Sparse, PropertyValue::Bool(true)),
        ] {
            host.pid_set_property(output, key, value)
                .map_err(|e| host_error("pid_set_property", e))?;
        }

        Ok(())
    }

    /// Detach the input pid and remove the output from the graph.
    ///
    /// Removing a pid that is not the active input does nothing, so repeated
    /// removals are harmless.
    pub fn detach(&mut self, host: &mut dyn FilterHost, pid: PidId) {
        if self.input_pid != Some(pid) {
            trace!("{} Ignoring removal of inactive {}", self.config.name, pid);
            return;
        }

        self.input_pid = None;
        if let Some(output) = self.output_pid.take() {
            debug!("{} Detached {}, removing {}", self.config.name, pid, output);
            host.pid_remove(output);
        }
    }
}
