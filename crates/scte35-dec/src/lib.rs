//! # SCTE-35 marker extraction
//!
//! Demuxers attach SCTE-35 splice sections to the audio or video packet they
//! were found next to, as a binary packet property. This filter takes one
//! such audio/video pid and re-emits every attached section as a standalone
//! packet on a sparse metadata pid tagged with [`CodecId::Scte35`], so that
//! muxers and packagers can treat markers as a stream of their own.
//!
//! Sections are copied verbatim; their content is never parsed.
//!
//! ## Lifecycle
//!
//! `Unattached -> Attached -> (process)* -> EndOfStream`, with
//! `Attached -> Unattached` whenever the host removes the input pid.
//!
//! [`CodecId::Scte35`]: filter_core::CodecId::Scte35

use filter_core::{Filter, FilterError, FilterHost, FilterRegister, PidId, ProcessStatus};

pub mod config;
mod pid;
mod register;
mod router;

pub use config::{DEFAULT_MARKER_PROPERTY, Scte35DecConfig};
pub use register::SCTE35_DEC_REGISTER;

/// Per-instance state of the SCTE-35 extraction filter.
#[derive(Debug)]
pub struct Scte35Dec {
    config: Scte35DecConfig,
    /// Active input, owned by the host.
    input_pid: Option<PidId>,
    /// Metadata pid created on first attach.
    output_pid: Option<PidId>,
    /// Timestamp of the last emitted marker, in input timescale ticks.
    last_cts: u64,
    eos_signaled: bool,
    emitted: u64,
    skipped: u64,
}

impl Default for Scte35Dec {
    fn default() -> Self {
        Self::new()
    }
}

impl Scte35Dec {
    pub fn new() -> Self {
        Self::with_config(Scte35DecConfig::default())
    }

    pub fn with_config(config: Scte35DecConfig) -> Self {
        Self {
            config,
            input_pid: None,
            output_pid: None,
            last_cts: 0,
            eos_signaled: false,
            emitted: 0,
            skipped: 0,
        }
    }

    pub fn input_pid(&self) -> Option<PidId> {
        self.input_pid
    }

    pub fn output_pid(&self) -> Option<PidId> {
        self.output_pid
    }

    pub fn last_cts(&self) -> u64 {
        self.last_cts
    }

    /// Number of markers sent so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Number of input packets dropped without a marker.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

/// Wrap a failed host call, keeping allocation failures as they are.
fn host_error(stage: &'static str, err: FilterError) -> FilterError {
    match err {
        FilterError::OutOfMemory => FilterError::OutOfMemory,
        other => FilterError::Stage {
            stage,
            source: Box::new(other),
        },
    }
}

impl Filter for Scte35Dec {
    fn register(&self) -> &'static FilterRegister {
        &SCTE35_DEC_REGISTER
    }

    fn configure_pid(
        &mut self,
        host: &mut dyn FilterHost,
        pid: PidId,
        is_remove: bool,
    ) -> Result<(), FilterError> {
        if is_remove {
            self.detach(host, pid);
            return Ok(());
        }
        self.attach(host, pid)
    }

    fn process(&mut self, host: &mut dyn FilterHost) -> Result<ProcessStatus, FilterError> {
        self.route(host)
    }
}
