use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::{
    DataPoint, InstrumentDescriptor, LongMeasurement, Meter, ObserverCallback, StatsdMeasurement,
};

/// Identifies an instrument registered with an [`ObserverRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(usize);

/// The data points of one instrument collected in a single tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InstrumentData {
    /// The instrumentation scope the instrument was registered under.
    pub scope: &'static str,
    /// Name, description and unit of the instrument.
    #[serde(flatten)]
    pub descriptor: InstrumentDescriptor,
    /// Recorded data points in the order they were recorded.
    pub points: Vec<DataPoint>,
}

type SharedCallback = Arc<dyn Fn(&mut dyn LongMeasurement) + Send + Sync>;

#[derive(Clone)]
struct Instrument {
    descriptor: InstrumentDescriptor,
    callback: SharedCallback,
}

/// An in-process [`Meter`] that invokes callbacks when asked to.
///
/// The registry does not run a schedule of its own. A caller drives collection by calling
/// [`collect`](Self::collect) or [`report`](Self::report) periodically.
pub struct ObserverRegistry {
    scope: &'static str,
    instruments: RwLock<Vec<Instrument>>,
}

impl ObserverRegistry {
    /// Creates an empty registry for the given instrumentation scope.
    pub fn new(scope: &'static str) -> Self {
        Self {
            scope,
            instruments: RwLock::new(Vec::new()),
        }
    }

    /// Returns the instrumentation scope of this registry.
    pub fn scope(&self) -> &'static str {
        self.scope
    }

    /// Returns the number of registered instruments.
    pub fn len(&self) -> usize {
        self.instruments.read().len()
    }

    /// Returns `true` if no instrument is registered.
    pub fn is_empty(&self) -> bool {
        self.instruments.read().is_empty()
    }

    /// Copies the registered instruments out, so callbacks run without holding the lock.
    fn snapshot(&self) -> Vec<Instrument> {
        self.instruments.read().clone()
    }

    /// Invokes all callbacks and returns their data points, in registration order.
    ///
    /// Instruments registered while collecting are picked up by the next collection.
    pub fn collect(&self) -> Vec<InstrumentData> {
        self.snapshot()
            .into_iter()
            .map(|instrument| {
                let mut points: Vec<DataPoint> = Vec::new();
                (instrument.callback)(&mut points);

                InstrumentData {
                    scope: self.scope,
                    descriptor: instrument.descriptor,
                    points,
                }
            })
            .collect()
    }

    /// Invokes all callbacks and emits their data points as statsd gauges.
    ///
    /// Nothing is sent if no statsd client is configured.
    pub fn report(&self) {
        for instrument in self.snapshot() {
            let mut measurement = StatsdMeasurement::new(instrument.descriptor.name);
            (instrument.callback)(&mut measurement);
        }
    }
}

impl Meter for ObserverRegistry {
    type Registration = ObserverId;

    fn register_long_observer(
        &self,
        descriptor: InstrumentDescriptor,
        callback: ObserverCallback,
    ) -> ObserverId {
        let mut instruments = self.instruments.write();
        let id = ObserverId(instruments.len());

        semattr_log::debug!(
            scope = self.scope,
            instrument = descriptor.name,
            "registered observable instrument"
        );

        instruments.push(Instrument {
            descriptor,
            callback: Arc::from(callback),
        });
        id
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self
            .instruments
            .read()
            .iter()
            .map(|instrument| instrument.descriptor.name)
            .collect();

        f.debug_struct("ObserverRegistry")
            .field("scope", &self.scope)
            .field("instruments", &names)
            .finish()
    }
}
