//! # Filter Core
//!
//! This crate provides the host boundary for single-pid media filters.
//! A filter never touches the graph directly: it receives opaque pid handles
//! and asks a [`FilterHost`] to read, create, configure and feed them.
//!
//! ## Features
//!
//! - `FilterHost` trait describing what a graph offers to a filter
//! - `Filter` trait describing what a filter offers to the graph
//! - Typed pid/packet properties, capability tables and matching
//! - `MemoryHost`, an in-memory graph that drives a filter to completion
//!
//! ## License
//!
//! MIT License
//!
//! ## Authors
//!
//! - hua0512
//!

use thiserror::Error;

pub mod caps;
pub mod filter;
pub mod host;
pub mod memory;
pub mod packet;
pub mod property;
pub mod register;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

/// Re-export key traits and types
pub use caps::{CapFlags, Capability, caps_accept_input};
pub use filter::{Filter, ProcessStatus};
pub use host::{FilterHost, PidId};
pub use memory::MemoryHost;
pub use packet::FilterPacket;
pub use property::{PropertyKey, PropertyMap, PropertyValue};
pub use register::FilterRegister;
pub use types::{CodecId, SapType, StreamType};

/// Common error type for filter operations
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Out of memory")]
    OutOfMemory,

    #[error("Pid capabilities not supported")]
    NotSupported,

    #[error("Unknown pid: {0}")]
    UnknownPid(PidId),

    #[error("Host call failed ({stage}): {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
