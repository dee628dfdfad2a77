//! Runtime metrics of memory pools.
//!
//! A [`MemoryPool`] is a named memory region with four readings: the initially requested size, the
//! used size, the committed size and the maximum obtainable size. [`register_observers`] registers
//! one instrument per reading with a [`Meter`]. On every collection tick, the meter invokes the
//! instrument's callback, which reads every pool afresh and records one data point per pool, tagged
//! with the pool name and its memory type.
//!
//! Readings are negative if the pool does not know them. Such readings are skipped, so an
//! unbounded pool is never reported with a limit of `-1`.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use semattr_runtime::{MemoryPool, MemoryType, MemoryUsage, ObserverRegistry, SCOPE_NAME};
//!
//! struct Heap;
//!
//! impl MemoryPool for Heap {
//!     fn name(&self) -> &str {
//!         "heap"
//!     }
//!
//!     fn memory_type(&self) -> MemoryType {
//!         MemoryType::Heap
//!     }
//!
//!     fn usage(&self) -> MemoryUsage {
//!         MemoryUsage { init: 64, used: 10, committed: 32, max: -1 }
//!     }
//! }
//!
//! let registry = ObserverRegistry::new(SCOPE_NAME);
//! let pools: Vec<Arc<dyn MemoryPool>> = vec![Arc::new(Heap)];
//! semattr_runtime::register_observers(&registry, &pools);
//!
//! let metrics = registry.collect();
//! assert_eq!(metrics.len(), 4);
//! assert!(metrics[3].points.is_empty());
//! ```

#![warn(missing_docs)]

mod measurement;
mod memory;
mod observer;
mod registry;
mod statsd;

pub use self::measurement::*;
pub use self::memory::*;
pub use self::observer::*;
pub use self::registry::*;
pub use self::statsd::*;
