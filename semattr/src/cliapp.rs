//! This module implements the definition of the command line app.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use semattr_log::{Level, LogFormat};

use crate::exchange::{ExchangeError, Header};

/// Computes HTTP semantic-convention attributes.
#[derive(Debug, Parser)]
#[command(name = "semattr", version, max_term_width = 79)]
pub struct App {
    /// The path to the config folder.
    #[arg(
        long,
        short = 'c',
        global = true,
        value_name = "CONFIG",
        env = "SEMATTR_CONFIG_PATH"
    )]
    pub config: Option<PathBuf>,

    /// Overrides the log level of the config file.
    #[arg(long, global = true, value_name = "LEVEL", env = "SEMATTR_LOG_LEVEL")]
    pub log_level: Option<Level>,

    /// Overrides the log format of the config file.
    #[arg(long, global = true, value_name = "FORMAT", env = "SEMATTR_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Removes user credentials from URLs.
    SanitizeUrl {
        /// The URLs to sanitize. Each result is printed on its own line.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Prints the attribute key a captured header is recorded under.
    HeaderKey {
        /// Use the response header prefix instead of the request header prefix.
        #[arg(long)]
        response: bool,

        /// The header names.
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Extracts the attributes of a single HTTP exchange as JSON.
    #[command(subcommand)]
    Extract(ExtractCommand),

    /// Manage the config file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Returns `true` if the command emits metrics and needs a statsd client.
    ///
    /// Config commands run without one, so they can report a broken metrics setup.
    pub fn reports_metrics(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

#[derive(Debug, Subcommand)]
pub enum ExtractCommand {
    /// Treats the exchange as an outgoing request.
    Client(ClientArgs),
    /// Treats the exchange as an incoming request.
    Server(ServerArgs),
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Loads the config and prints the normalized capture lists.
    Check,
    /// Dumps the effective config as YAML.
    Show,
}

/// Fields shared by client and server exchanges.
#[derive(Debug, Args)]
pub struct ExchangeArgs {
    /// The request method.
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// A request header as `Name: value`. May be repeated.
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<Header>,

    /// The protocol flavor, e.g. `1.1` or `2.0`.
    #[arg(long)]
    pub flavor: Option<String>,

    /// The size of the request body in bytes.
    #[arg(long, value_name = "BYTES")]
    pub request_content_length: Option<i64>,

    /// The response status code. Without it, no response is assumed.
    #[arg(long)]
    pub status: Option<u16>,

    /// A response header as `Name: value`. May be repeated.
    #[arg(long = "response-header", value_name = "HEADER", requires = "status")]
    pub response_headers: Vec<Header>,

    /// The size of the response body in bytes.
    #[arg(long, value_name = "BYTES", requires = "status")]
    pub response_content_length: Option<i64>,

    /// The error the exchange ended with.
    #[arg(long, value_enum)]
    pub error: Option<ExchangeError>,
}

#[derive(Debug, Args)]
pub struct ClientArgs {
    /// The full request URL.
    pub url: String,

    #[command(flatten)]
    pub exchange: ExchangeArgs,
}

#[derive(Debug, Args)]
pub struct ServerArgs {
    /// The request target, i.e. path and query.
    pub target: String,

    /// The URI scheme.
    #[arg(long, default_value = "http")]
    pub scheme: String,

    /// The route template the request matched.
    #[arg(long)]
    pub route: Option<String>,

    #[command(flatten)]
    pub exchange: ExchangeArgs,
}
