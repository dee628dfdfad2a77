use semattr_protocol::Attributes;
use semattr_statsd::GaugeMetric;
use semattr_statsd::prelude::*;

use crate::LongMeasurement;

/// Characters that delimit tags in the statsd line protocol.
const TAG_DELIMITERS: [char; 4] = [',', ':', '|', '\n'];

/// Replaces tag delimiters in `value` so it stays a single tag value.
fn tag_value(value: &str) -> String {
    value.replace(TAG_DELIMITERS, "_")
}

/// A gauge named after an observable instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrumentGauge(pub &'static str);

impl GaugeMetric for InstrumentGauge {
    fn name(&self) -> &'static str {
        self.0
    }
}

/// Emits recorded data points as statsd gauges.
///
/// Every attribute of a point becomes a tag of the gauge, so points of different memory pools are
/// reported as separate series. Tag delimiters in attribute values are replaced with `_`. Points are dropped if no statsd client is configured.
#[derive(Clone, Copy, Debug)]
pub struct StatsdMeasurement {
    gauge: InstrumentGauge,
}

impl StatsdMeasurement {
    /// Creates a measurement emitting gauges under the given instrument name.
    pub fn new(instrument: &'static str) -> Self {
        Self {
            gauge: InstrumentGauge(instrument),
        }
    }
}

impl LongMeasurement for StatsdMeasurement {
    fn record(&mut self, value: i64, attributes: &Attributes) {
        let Ok(value) = u64::try_from(value) else {
            semattr_log::trace!(gauge = self.gauge.name(), value, "dropping negative gauge value");
            return;
        };

        let tags: Vec<(&str, String)> = attributes
            .iter()
            .map(|(name, value)| (name, tag_value(&value.to_string())))
            .collect();

        semattr_statsd::with_client(|client| {
            let mut metric = client.gauge_with_tags(self.gauge.name(), value);
            for (name, value) in &tags {
                metric = metric.with_tag(name, value);
            }
            client.send_metric(metric);
        });
    }
}

#[cfg(test)]
mod tests {
    use semattr_conventions as conventions;
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn test_record_as_gauge() {
        let mut attributes = Attributes::new();
        attributes.insert(&conventions::POOL, "G1 Eden Space".to_owned());
        attributes.insert(&conventions::TYPE, "heap".to_owned());

        let captures = semattr_statsd::with_capturing_test_client(|| {
            let mut measurement = StatsdMeasurement::new("process.runtime.jvm.memory.usage");
            measurement.record(1024, &attributes);
            measurement.record(-1, &attributes);
        });

        assert_eq!(
            captures,
            ["process.runtime.jvm.memory.usage:1024|g|#pool:G1 Eden Space,type:heap"]
        );
    }

    #[test]
    fn test_tag_delimiters_replaced() {
        let mut attributes = Attributes::new();
        attributes.insert(&conventions::POOL, "CodeHeap 'a,b|c:d'".to_owned());
        attributes.insert(&conventions::TYPE, "non_heap".to_owned());

        let captures = semattr_statsd::with_capturing_test_client(|| {
            StatsdMeasurement::new("process.runtime.jvm.memory.init").record(7, &attributes);
        });

        assert_eq!(
            captures,
            ["process.runtime.jvm.memory.init:7|g|#pool:CodeHeap 'a_b_c_d',type:non_heap"]
        );
    }
}
