//! Identifiers used by one extraction run.

use std::fmt;

/// Run-unique identifier shared by components, ports and rendered edges.
///
/// Only meaningful inside one extraction: two runs over the same system may
/// hand out the same value to different objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ObjectId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Monotonic id source, owned by one run and threaded through every stage
/// that hands out ids.
///
/// The counter is incremented before each assignment, so the first id is `1`
/// and `0` stays free for the synthetic document root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdGen {
    last: u32,
}

impl IdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ObjectId {
        self.last += 1;
        ObjectId(self.last)
    }

    /// Highest id handed out so far, `0` if none.
    pub fn last(&self) -> u32 {
        self.last
    }
}

/// Index of a component in [`crate::Forest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentIdx(pub u32);

impl ComponentIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a port in [`crate::Forest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortIdx(pub u32);

impl PortIdx {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque identity of the channel a port is bound to.
///
/// Two ports are connected exactly when both carry a binding and the values
/// are equal. Names never take part in that decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binding(pub u64);

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl Binding {
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Binding carried by the backward face of a socket pair.
    ///
    /// The top bit is flipped so the return channel of an initiator and its
    /// target pair up with each other and never with the forward faces.
    /// Applying it twice yields the original binding.
    pub fn backward(self) -> Self {
        Binding(self.0 ^ (1 << 63))
    }
}
