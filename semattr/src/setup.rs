use std::net::ToSocketAddrs;

use anyhow::{Context, Result};
use semattr_config::Config;
use semattr_http::{HttpClientAttributesExtractor, HttpServerAttributesExtractor};
use semattr_statsd::MetricsClientConfig;

use crate::exchange::ExchangeGetter;

/// Validates the parts of the config that can only be checked against the environment.
pub fn check_config(config: &Config) -> Result<()> {
    if let Some(addr) = config.statsd_addr() {
        addr.to_socket_addrs()
            .with_context(|| format!("invalid statsd address `{addr}`"))?;
    }

    Ok(())
}

/// Print config infos to the log.
pub fn dump_config_infos(config: &Config) {
    if config.path().as_os_str().is_empty() {
        semattr_log::debug!("running without config folder");
    } else {
        semattr_log::debug!("loaded config from {}", config.path().display());
    }
    semattr_log::debug!("  log level: {}", config.logging().level);
    match config.statsd_addr() {
        Some(addr) => semattr_log::debug!("  statsd: {addr}"),
        None => semattr_log::debug!("  statsd: -"),
    };
}

/// Initialize the metric system.
pub fn init_metrics(config: &Config) -> Result<()> {
    let Some(host) = config.statsd_addr() else {
        return Ok(());
    };

    semattr_statsd::init(MetricsClientConfig {
        prefix: config.metrics_prefix(),
        host,
        default_tags: config.metrics_default_tags().clone(),
        buffer_size: config.statsd_buffer_size(),
    })?;

    Ok(())
}

/// Builds a client extractor capturing the headers listed in the config.
pub fn client_extractor(config: &Config) -> HttpClientAttributesExtractor<ExchangeGetter> {
    let capture = config.client_capture();
    HttpClientAttributesExtractor::builder(ExchangeGetter)
        .capture_request_headers(capture.request_headers.iter().cloned())
        .capture_response_headers(capture.response_headers.iter().cloned())
        .build()
}

/// Builds a server extractor capturing the headers listed in the config.
pub fn server_extractor(config: &Config) -> HttpServerAttributesExtractor<ExchangeGetter> {
    let capture = config.server_capture();
    HttpServerAttributesExtractor::builder(ExchangeGetter)
        .capture_request_headers(capture.request_headers.iter().cloned())
        .capture_response_headers(capture.response_headers.iter().cloned())
        .build()
}
