use std::error::Error;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use semattr_config::Config;
use semattr_conventions as conventions;
use semattr_http::{AttributesExtractor, SpanKeyProvider, sanitize_url};
use semattr_protocol::Attributes;
use semattr_statsd::metric;

use crate::cliapp::{
    App, ClientArgs, Command, ConfigCommand, ExchangeArgs, ExtractCommand, ServerArgs,
};
use crate::exchange::{Request, Response};
use crate::setup;
use crate::statsd::SemattrCounters;

/// Runs the command line application.
pub fn execute() -> Result<()> {
    let app = App::parse();

    let mut config = load_config(app.config.as_deref())?;
    if let Some(level) = app.log_level {
        config.logging_mut().level = level;
    }
    if let Some(format) = app.log_format {
        config.logging_mut().format = format;
    }

    semattr_log::init(config.logging());
    setup::dump_config_infos(&config);

    if app.command.reports_metrics() {
        setup::init_metrics(&config)?;
    }

    let result = match app.command {
        Command::SanitizeUrl { urls } => sanitize_urls(&urls),
        Command::HeaderKey { response, names } => header_keys(response, &names),
        Command::Extract(ExtractCommand::Client(args)) => extract_client(&config, args),
        Command::Extract(ExtractCommand::Server(args)) => extract_server(&config, args),
        Command::Config(ConfigCommand::Check) => check_config(&config),
        Command::Config(ConfigCommand::Show) => show_config(&config),
    };

    semattr_statsd::disable();
    result
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

#[allow(clippy::print_stdout)]
fn sanitize_urls(urls: &[String]) -> Result<()> {
    for url in urls {
        let sanitized = sanitize_url(url);
        let redacted = if sanitized != url.as_str() {
            "true"
        } else {
            "false"
        };

        metric!(counter(SemattrCounters::UrlSanitized) += 1, redacted = redacted);
        println!("{sanitized}");
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn header_keys(response: bool, names: &[String]) -> Result<()> {
    for name in names {
        let key = if response {
            conventions::response_header_key(name)
        } else {
            conventions::request_header_key(name)
        };
        println!("{}", key.name());
    }

    Ok(())
}

fn split_exchange(args: ExchangeArgs, request: &mut Request) -> Option<Response> {
    request.method = Some(args.method);
    request.headers = args.headers;
    request.flavor = args.flavor.clone();
    request.content_length = args.request_content_length;

    args.status.map(|status| Response {
        status,
        flavor: args.flavor,
        headers: args.response_headers,
        content_length: args.response_content_length,
    })
}

fn extract_client(config: &Config, args: ClientArgs) -> Result<()> {
    let ClientArgs { url, exchange } = args;
    let error = exchange.error;

    let mut request = Request {
        url: Some(url),
        ..Default::default()
    };
    let response = split_exchange(exchange, &mut request);

    let extractor = setup::client_extractor(config);
    print_attributes(&extractor, &request, response.as_ref(), error.as_ref())
}

fn extract_server(config: &Config, args: ServerArgs) -> Result<()> {
    let ServerArgs {
        target,
        scheme,
        route,
        exchange,
    } = args;
    let error = exchange.error;

    let mut request = Request {
        target: Some(target),
        scheme: Some(scheme),
        route,
        ..Default::default()
    };
    let response = split_exchange(exchange, &mut request);

    let extractor = setup::server_extractor(config);
    print_attributes(&extractor, &request, response.as_ref(), error.as_ref())
}

fn extract_attributes<E, Q, S, F>(
    extractor: &E,
    request: &Q,
    response: Option<&S>,
    error: Option<&F>,
) -> Attributes
where
    E: AttributesExtractor<Request = Q, Response = S> + SpanKeyProvider,
    F: Error + 'static,
{
    let mut attributes = Attributes::new();
    extractor.on_start(&mut attributes, &(), request);
    extractor.on_end(
        &mut attributes,
        &(),
        request,
        response,
        error.map(|e| e as &(dyn Error + 'static)),
    );

    let span_key = extractor.span_key();
    semattr_log::debug!(%span_key, attributes = attributes.len(), "extracted attributes");
    metric!(
        counter(SemattrCounters::Extraction) += 1,
        span_key = span_key.as_str()
    );

    attributes
}

#[allow(clippy::print_stdout)]
fn print_attributes<E, Q, S, F>(
    extractor: &E,
    request: &Q,
    response: Option<&S>,
    error: Option<&F>,
) -> Result<()>
where
    E: AttributesExtractor<Request = Q, Response = S> + SpanKeyProvider,
    F: Error + 'static,
{
    let attributes = extract_attributes(extractor, request, response, error);
    let json =
        serde_json::to_string_pretty(&attributes).context("failed to serialize attributes")?;
    println!("{json}");
    Ok(())
}

/// A normalized header capture list as the extractors see it.
#[derive(Debug, PartialEq, Eq)]
struct CaptureSummary {
    label: &'static str,
    names: Vec<String>,
    /// Configured names dropped because they repeat a name or its attribute key.
    ignored: usize,
}

impl CaptureSummary {
    fn new(label: &'static str, configured: &[String], names: Vec<String>) -> Self {
        Self {
            label,
            ignored: configured.len().saturating_sub(names.len()),
            names,
        }
    }
}

fn capture_summaries(config: &Config) -> [CaptureSummary; 4] {
    let client = setup::client_extractor(config);
    let server = setup::server_extractor(config);

    [
        CaptureSummary::new(
            "client request headers",
            &config.client_capture().request_headers,
            client.captured_request_headers().map(str::to_owned).collect(),
        ),
        CaptureSummary::new(
            "client response headers",
            &config.client_capture().response_headers,
            client.captured_response_headers().map(str::to_owned).collect(),
        ),
        CaptureSummary::new(
            "server request headers",
            &config.server_capture().request_headers,
            server.captured_request_headers().map(str::to_owned).collect(),
        ),
        CaptureSummary::new(
            "server response headers",
            &config.server_capture().response_headers,
            server.captured_response_headers().map(str::to_owned).collect(),
        ),
    ]
}

#[allow(clippy::print_stdout)]
fn check_config(config: &Config) -> Result<()> {
    if config.path().as_os_str().is_empty() {
        bail!("no config folder given, pass one with --config");
    }

    setup::check_config(config)?;

    for summary in capture_summaries(config) {
        let CaptureSummary {
            label,
            names,
            ignored,
        } = summary;

        if ignored > 0 {
            semattr_log::warn!(
                "{label}: {ignored} names ignored (duplicate or conflicting attribute key)"
            );
        }

        if names.is_empty() {
            println!("{label}: -");
        } else {
            println!("{label}: {}", names.join(", "));
        }
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.to_yaml_string()?);
    Ok(())
}
