//! A high-level StatsD metric client built on cadence.
//!
//! ## Defining Metrics
//!
//! In order to use metrics, one needs to first define one of the metric traits on a custom enum.
//! The following types of metrics are available: `counter` and `gauge`. For explanations on what
//! that means see [Metric Types].
//!
//! The metric traits serve only to provide a type safe metric name. Both metric types have exactly
//! the same form, they are different only to ensure that a metric can only be used for the type for
//! which it was defined.
//!
//! ## Initializing the Client
//!
//! Metrics can be used without initializing a statsd client. In that case, invoking `with_client`
//! or the [`metric!`] macro will become a noop. Only when configured, metrics will actually be
//! collected.
//!
//! To initialize the client, either use [`set_client`] to pass a custom client, or use
//! [`init`] to create a default client with known arguments:
//!
//! ```no_run
//! # use std::collections::BTreeMap;
//! # use semattr_statsd::MetricsClientConfig;
//!
//! semattr_statsd::init(MetricsClientConfig {
//!     prefix: "myprefix",
//!     host: "localhost:8125",
//!     default_tags: BTreeMap::new(),
//!     buffer_size: None,
//! })
//! .ok();
//! ```
//!
//! ## Macro Usage
//!
//! The recommended way to record metrics is by using the [`metric!`] macro. See the trait docs
//! for more information on how to record each type of metric.
//!
//! ```
//! use semattr_statsd::{metric, CounterMetric};
//!
//! struct MyCounter;
//!
//! impl CounterMetric for MyCounter {
//!     fn name(&self) -> &'static str {
//!         "counter"
//!     }
//! }
//!
//! metric!(counter(MyCounter) += 1);
//! ```
//!
//! ## Manual Usage
//!
//! ```
//! use semattr_statsd::prelude::*;
//!
//! semattr_statsd::with_client(|client| {
//!     client.count("mymetric", 1).ok();
//! });
//! ```
//!
//! [Metric Types]: https://github.com/statsd/statsd/blob/master/docs/metric_types.md

#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::io;
use std::net::{ToSocketAddrs, UdpSocket};
use std::ops::Deref;
use std::sync::Arc;

use cadence::{BufferedUdpMetricSink, Metric, MetricBuilder, QueuingMetricSink, StatsdClient};
use parking_lot::RwLock;

/// Maximum number of metric events that can be queued before we start dropping them.
const METRICS_MAX_QUEUE_SIZE: usize = 100_000;

/// Error returned by [`init`].
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// The statsd host could not be resolved.
    #[error("could not resolve statsd host {0}")]
    Resolve(String, #[source] io::Error),
    /// The statsd host resolved to no address.
    #[error("statsd host {0} has no address")]
    NoAddress(String),
    /// The local UDP socket could not be created.
    #[error("could not create udp socket")]
    Socket(#[source] io::Error),
    /// The metric sink could not be created.
    #[error("could not create metric sink")]
    Sink(#[from] cadence::MetricError),
}

/// Client configuration object to store globally.
#[derive(Debug)]
pub struct MetricsClient {
    /// The raw statsd client.
    pub statsd_client: StatsdClient,
    /// Default tags to apply to every metric.
    pub default_tags: BTreeMap<String, String>,
}

/// Client configuration used for initialization of [`MetricsClient`].
#[derive(Debug)]
pub struct MetricsClientConfig<'a, A> {
    /// Prefix which is prepended to all metric names.
    pub prefix: &'a str,
    /// Host of the metrics upstream.
    pub host: A,
    /// Tags that are added to all metrics.
    pub default_tags: BTreeMap<String, String>,
    /// Size of the UDP buffer in bytes.
    ///
    /// Metrics are flushed once the buffer is full. Defaults to cadence's buffer size.
    pub buffer_size: Option<usize>,
}

impl Deref for MetricsClient {
    type Target = StatsdClient;

    fn deref(&self) -> &StatsdClient {
        &self.statsd_client
    }
}

impl MetricsClient {
    /// Send a metric with the default tags defined on this `MetricsClient`.
    #[inline(always)]
    pub fn send_metric<'a, T>(&'a self, mut metric: MetricBuilder<'a, '_, T>)
    where
        T: Metric + From<String>,
    {
        for (k, v) in &self.default_tags {
            metric = metric.with_tag(k, v);
        }

        if let Err(error) = metric.try_send() {
            semattr_log::error!(
                error = &error as &dyn std::error::Error,
                maximum_capacity = METRICS_MAX_QUEUE_SIZE,
                "error sending a metric",
            );
        }
    }
}

static METRICS_CLIENT: RwLock<Option<Arc<MetricsClient>>> = RwLock::new(None);

thread_local! {
    static CURRENT_CLIENT: std::cell::RefCell<Option<Arc<MetricsClient>>> = METRICS_CLIENT.read().clone().into();
}

/// Internal prelude for the macro
#[doc(hidden)]
pub mod _pred {
    pub use cadence::prelude::*;
}

/// The metrics prelude that is necessary to use the client.
pub mod prelude {
    pub use cadence::prelude::*;
}

/// Set a new statsd client.
pub fn set_client(client: MetricsClient) {
    *METRICS_CLIENT.write() = Some(Arc::new(client));
    CURRENT_CLIENT.with(|cell| cell.replace(METRICS_CLIENT.read().clone()));
}

/// Set a test client for the period of the called function (only affects the current thread).
pub fn with_capturing_test_client(f: impl FnOnce()) -> Vec<String> {
    let (rx, sink) = cadence::SpyMetricSink::new();
    let test_client = MetricsClient {
        statsd_client: StatsdClient::from_sink("", sink),
        default_tags: Default::default(),
    };

    CURRENT_CLIENT.with(|cell| {
        let old_client = cell.replace(Some(Arc::new(test_client)));
        f();
        cell.replace(old_client);
    });

    rx.iter()
        .map(|x| String::from_utf8_lossy(&x).into_owned())
        .collect()
}

/// Disable the client again.
pub fn disable() {
    *METRICS_CLIENT.write() = None;
    CURRENT_CLIENT.with(|cell| cell.replace(None));
}

/// Tell the metrics system to report to statsd.
pub fn init<A: ToSocketAddrs + std::fmt::Debug>(
    config: MetricsClientConfig<A>,
) -> Result<(), MetricsError> {
    let host = format!("{:?}", config.host);
    let addr = config
        .host
        .to_socket_addrs()
        .map_err(|e| MetricsError::Resolve(host.clone(), e))?
        .next()
        .ok_or(MetricsError::NoAddress(host))?;

    semattr_log::info!("reporting metrics to statsd at {addr}");

    let socket = UdpSocket::bind("0.0.0.0:0").map_err(MetricsError::Socket)?;
    socket.set_nonblocking(true).map_err(MetricsError::Socket)?;

    let udp_sink = match config.buffer_size {
        Some(capacity) => BufferedUdpMetricSink::with_capacity(addr, socket, capacity)?,
        None => BufferedUdpMetricSink::from(addr, socket)?,
    };
    let queuing_sink = QueuingMetricSink::with_capacity(udp_sink, METRICS_MAX_QUEUE_SIZE);

    set_client(MetricsClient {
        statsd_client: StatsdClient::from_sink(config.prefix, queuing_sink),
        default_tags: config.default_tags,
    });

    Ok(())
}

/// Invoke a callback with the current statsd client.
///
/// If statsd is not configured the callback is not invoked. For the most part
/// the [`metric!`] macro should be used instead.
#[inline(always)]
pub fn with_client<F, R>(f: F) -> R
where
    F: FnOnce(&MetricsClient) -> R,
    R: Default,
{
    CURRENT_CLIENT.with(|client| {
        if let Some(client) = client.borrow().as_deref() {
            f(client)
        } else {
            R::default()
        }
    })
}

/// A metric for capturing counters.
///
/// Counters are simple values incremented by a client. The rates at which these
/// events occur or average values will be determined by the server receiving them.
///
/// ## Example
///
/// ```
/// use semattr_statsd::{metric, CounterMetric};
///
/// enum MyCounter {
///     Observations,
///     SkippedReadings,
/// }
///
/// impl CounterMetric for MyCounter {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Observations => "observations",
///             Self::SkippedReadings => "skipped_readings",
///         }
///     }
/// }
///
/// // add to the counter
/// metric!(counter(MyCounter::Observations) += 1);
///
/// // add to the counter and provide tags
/// metric!(
///     counter(MyCounter::SkippedReadings) += 1,
///     pool = "heap",
/// );
/// ```
pub trait CounterMetric {
    /// Returns the counter metric name that will be sent to statsd.
    fn name(&self) -> &'static str;
}

/// A metric for capturing gauges.
///
/// Gauge values are an instantaneous measurement of a value determined by the client. They do not
/// change unless changed by the client. Examples include memory usage or how many connections are
/// active.
///
/// ## Example
///
/// ```
/// use semattr_statsd::{metric, GaugeMetric};
///
/// struct MemoryUsed;
///
/// impl GaugeMetric for MemoryUsed {
///     fn name(&self) -> &'static str {
///         "memory.used"
///     }
/// }
///
/// // a simple gauge value
/// metric!(gauge(MemoryUsed) = 1024);
///
/// // a gauge with tags
/// metric!(
///     gauge(MemoryUsed) = 1024,
///     pool = "eden",
///     type = "heap"
/// );
/// ```
pub trait GaugeMetric {
    /// Returns the gauge metric name that will be sent to statsd.
    fn name(&self) -> &'static str;
}

/// Emits a metric.
///
/// See [crate-level documentation](self) for examples.
#[macro_export]
macro_rules! metric {
    // counter increment
    (counter($id:expr) += $value:expr $(, $($k:tt).+ = $v:expr)* $(,)?) => {
        match $value {
            value if value != 0 => {
                $crate::with_client(|client| {
                    use $crate::_pred::*;
                    client.send_metric(
                        client.count_with_tags(&$crate::CounterMetric::name(&$id), value)
                        $(.with_tag(stringify!($($k).+), $v))*
                    )
                })
            },
            _ => {},
        };
    };

    // gauge set
    (gauge($id:expr) = $value:expr $(, $($k:tt).+ = $v:expr)* $(,)?) => {
        $crate::with_client(|client| {
            use $crate::_pred::*;
            client.send_metric(
                client.gauge_with_tags(&$crate::GaugeMetric::name(&$id), $value)
                    $(.with_tag(stringify!($($k).+), $v))*
            )
        })
    };
}
