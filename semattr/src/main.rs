//! Command line interface for semantic-convention attribute extraction.
//!
//! The `semattr` binary exposes the extractors of [`semattr-http`] for inspection and scripting:
//!
//!  - `sanitize-url`: Removes user credentials from URLs.
//!  - `header-key`: Prints the attribute key a captured header is recorded under.
//!  - `extract client|server`: Runs an extractor over an exchange described by flags and prints
//!    the resulting attributes as JSON.
//!  - `config check|show`: Validates or dumps the config folder.
//!
//! # Workspace Crates
//!
//! Semattr is split into the following workspace crates:
//!
//!  - `semattr`: Main entry point and command line interface.
//!  - [`semattr-config`]: Static configuration for the CLI.
//!  - [`semattr-conventions`]: Attribute names of the semantic conventions.
//!  - [`semattr-http`]: HTTP client and server attribute extractors.
//!  - [`semattr-log`]: Error reporting and logging.
//!  - [`semattr-protocol`]: Attribute values, typed keys and the attribute sink.
//!  - [`semattr-runtime`]: Memory pool observers for runtime metrics.
//!  - [`semattr-statsd`]: High-level StatsD metric client.
//!
//! [`semattr-config`]: ../semattr_config/index.html
//! [`semattr-conventions`]: ../semattr_conventions/index.html
//! [`semattr-http`]: ../semattr_http/index.html
//! [`semattr-log`]: ../semattr_log/index.html
//! [`semattr-protocol`]: ../semattr_protocol/index.html
//! [`semattr-runtime`]: ../semattr_runtime/index.html
//! [`semattr-statsd`]: ../semattr_statsd/index.html

mod cli;
mod cliapp;
mod exchange;
mod setup;
mod statsd;

use std::process;

pub fn main() {
    let exit_code = match cli::execute() {
        Ok(()) => 0,
        Err(err) => {
            semattr_log::ensure_error(&err);
            1
        }
    };

    process::exit(exit_code);
}
