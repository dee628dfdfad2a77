use semattr_protocol::Attributes;
use serde::Serialize;

/// Receives the data points of an observable instrument during one collection.
pub trait LongMeasurement {
    /// Records a single data point.
    fn record(&mut self, value: i64, attributes: &Attributes);
}

/// A recorded data point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    /// The observed value.
    pub value: i64,
    /// Attributes distinguishing this point from other points of the same instrument.
    pub attributes: Attributes,
}

impl LongMeasurement for Vec<DataPoint> {
    fn record(&mut self, value: i64, attributes: &Attributes) {
        self.push(DataPoint {
            value,
            attributes: attributes.clone(),
        });
    }
}
