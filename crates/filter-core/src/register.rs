use crate::caps::{CapFlags, Capability};

/// Static description of a filter, consulted by the host's graph builder.
#[derive(Debug)]
pub struct FilterRegister {
    pub name: &'static str,
    pub description: &'static str,
    pub help: &'static str,
    /// Only instantiated when the graph names the filter explicitly.
    pub explicit_only: bool,
    pub caps: &'static [Capability],
}

impl FilterRegister {
    /// Whether the filter declares an output the host may link statically.
    ///
    /// Filters without one only produce pids created at configure time.
    pub fn has_static_output(&self) -> bool {
        self.caps.iter().any(|c| c.flags == CapFlags::Output)
    }

    pub fn input_caps(&self) -> impl Iterator<Item = &Capability> {
        self.caps.iter().filter(|c| c.flags.is_input())
    }
}
