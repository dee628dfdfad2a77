use std::sync::Arc;

use semattr_conventions as conventions;
use semattr_protocol::Attributes;
use serde::Serialize;

use crate::{LongMeasurement, MemoryPool, MemoryUsage};

/// Name of the instrumentation scope the memory instruments are registered under.
pub const SCOPE_NAME: &str = "io.opentelemetry.runtime-metrics";

/// Unit of all memory instruments.
const UNIT_BYTES: &str = "By";

/// Name, description and unit of an instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct InstrumentDescriptor {
    /// The instrument name, part of the exported metric schema.
    pub name: &'static str,
    /// Human-readable description of what is measured.
    pub description: &'static str,
    /// The unit of measured values.
    pub unit: &'static str,
}

/// Measure of initial memory requested.
pub const MEMORY_INIT: InstrumentDescriptor = InstrumentDescriptor {
    name: "process.runtime.jvm.memory.init",
    description: "Measure of initial memory requested",
    unit: UNIT_BYTES,
};

/// Measure of memory used.
pub const MEMORY_USAGE: InstrumentDescriptor = InstrumentDescriptor {
    name: "process.runtime.jvm.memory.usage",
    description: "Measure of memory used",
    unit: UNIT_BYTES,
};

/// Measure of memory committed.
pub const MEMORY_COMMITTED: InstrumentDescriptor = InstrumentDescriptor {
    name: "process.runtime.jvm.memory.committed",
    description: "Measure of memory committed",
    unit: UNIT_BYTES,
};

/// Measure of max obtainable memory.
pub const MEMORY_LIMIT: InstrumentDescriptor = InstrumentDescriptor {
    name: "process.runtime.jvm.memory.limit",
    description: "Measure of max obtainable memory",
    unit: UNIT_BYTES,
};

/// The callback of an observable instrument.
pub type ObserverCallback = Box<dyn Fn(&mut dyn LongMeasurement) + Send + Sync>;

/// Registers observable instruments with an external collection schedule.
///
/// The meter owns registered callbacks and invokes them on every collection tick, on whichever
/// thread it collects on.
pub trait Meter {
    /// Handle returned for every registered instrument.
    type Registration;

    /// Registers an observable instrument reporting integer values.
    fn register_long_observer(
        &self,
        descriptor: InstrumentDescriptor,
        callback: ObserverCallback,
    ) -> Self::Registration;
}

/// Returns the callback observing one reading of every pool.
///
/// The attributes of each pool are computed once. The usage of each pool is read on every
/// invocation, and `selector` picks the reading to record from it. Negative readings are unknown
/// and skipped.
pub fn callback<F>(
    pools: &[Arc<dyn MemoryPool>],
    selector: F,
) -> impl Fn(&mut dyn LongMeasurement) + Send + Sync + 'static
where
    F: Fn(&MemoryUsage) -> i64 + Send + Sync + 'static,
{
    let pools: Vec<_> = pools
        .iter()
        .map(|pool| (Arc::clone(pool), pool_attributes(pool.as_ref())))
        .collect();

    move |measurement: &mut dyn LongMeasurement| {
        for (pool, attributes) in &pools {
            let value = selector(&pool.usage());
            if value < 0 {
                semattr_log::trace!(pool = pool.name(), value, "skipping unknown memory reading");
                continue;
            }

            measurement.record(value, attributes);
        }
    }
}

fn pool_attributes(pool: &dyn MemoryPool) -> Attributes {
    let mut attributes = Attributes::new();
    attributes.insert(&conventions::POOL, pool.name().to_owned());
    attributes.insert(&conventions::TYPE, pool.memory_type().as_str().to_owned());
    attributes
}

/// Registers the init, usage, committed and limit instruments for `pools`.
///
/// The list of pools is fixed at registration. Returns the registrations in that order.
pub fn register_observers<M>(meter: &M, pools: &[Arc<dyn MemoryPool>]) -> Vec<M::Registration>
where
    M: Meter + ?Sized,
{
    let instruments: [(InstrumentDescriptor, fn(&MemoryUsage) -> i64); 4] = [
        (MEMORY_INIT, |usage| usage.init),
        (MEMORY_USAGE, |usage| usage.used),
        (MEMORY_COMMITTED, |usage| usage.committed),
        (MEMORY_LIMIT, |usage| usage.max),
    ];

    instruments
        .into_iter()
        .map(|(descriptor, selector)| {
            meter.register_long_observer(descriptor, Box::new(callback(pools, selector)))
        })
        .collect()
}
