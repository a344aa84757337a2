use crate::FilterError;
use crate::host::{FilterHost, PidId};
use crate::register::FilterRegister;

/// Outcome of a successful [`Filter::process`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// More work may arrive; call again when input is available.
    Continue,
    /// All outputs are ended, the host should stop scheduling the filter.
    EndOfStream,
}

/// A stage driven by a host graph.
///
/// The host calls [`configure_pid`](Filter::configure_pid) when an input pid
/// is connected, reconfigured or removed, and [`process`](Filter::process)
/// whenever the filter may have work. Calls are never concurrent.
pub trait Filter {
    fn register(&self) -> &'static FilterRegister;

    fn configure_pid(
        &mut self,
        host: &mut dyn FilterHost,
        pid: PidId,
        is_remove: bool,
    ) -> Result<(), FilterError>;

    fn process(&mut self, host: &mut dyn FilterHost) -> Result<ProcessStatus, FilterError>;

    fn name(&self) -> &'static str {
        self.register().name
    }
}
