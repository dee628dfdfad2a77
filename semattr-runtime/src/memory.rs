use std::fmt;

use serde::Serialize;

/// The category of a [`MemoryPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// Memory for objects allocated by the program.
    Heap,
    /// Memory used by the runtime itself, e.g. for code and metadata.
    NonHeap,
}

impl MemoryType {
    /// Returns the value of the `type` attribute for this memory type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heap => "heap",
            Self::NonHeap => "non_heap",
        }
    }
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of the readings of a [`MemoryPool`] in bytes.
///
/// Negative readings are unknown. In particular, `max` is `-1` for pools without a limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemoryUsage {
    /// Memory initially requested from the operating system.
    pub init: i64,
    /// Memory currently in use.
    pub used: i64,
    /// Memory guaranteed to be available.
    pub committed: i64,
    /// The maximum amount of memory the pool can grow to.
    pub max: i64,
}

/// A named memory region of the observed runtime.
///
/// The name and type must not change over the lifetime of the pool. The usage is read on every
/// collection and must be cheap and non-blocking.
pub trait MemoryPool: Send + Sync {
    /// Returns the name of the pool, e.g. `G1 Eden Space`.
    fn name(&self) -> &str;

    /// Returns the category of the pool.
    fn memory_type(&self) -> MemoryType;

    /// Returns the current readings of the pool.
    fn usage(&self) -> MemoryUsage;
}
