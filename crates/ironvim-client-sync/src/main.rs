mod config;
mod connection;
mod http_client;
mod runner;
#[cfg(test)]
mod test_support;
mod tls;

use std::io;
use std::process::ExitCode;

use tracing::{info, instrument};

use config::{create_connector_config, init_logging, parse_args, Args};
use http_client::UreqHttpClient;
use runner::{report_failure, ExitStatus, SessionRunner};

fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(outcome) => {
            return ExitCode::from(outcome.report(&mut io::stdout(), &mut io::stderr()));
        }
    };

    // Held until main returns so the non-blocking writer is flushed.
    let _log_guard = match init_logging(args.verbose, &args.log_file) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    run_app(&args).into()
}

/// The main application logic, extracted to a separate function.
#[instrument(name = "main", level = "info", skip_all)]
fn run_app(args: &Args) -> ExitStatus {
    info!(
        server = %args.server,
        username = %args.username,
        verify_certificates = args.verify_certificates,
        "starting vSphere connection test"
    );

    let config = match create_connector_config(args) {
        Ok(config) => config,
        Err(e) => return report_failure(&mut io::stderr(), &e),
    };

    let policy = tls::trust_policy_for(config.transport);
    let client = match UreqHttpClient::new(policy.as_ref()) {
        Ok(client) => client,
        Err(e) => return report_failure(&mut io::stderr(), &e),
    };

    SessionRunner::new(&client, io::stdout().lock(), io::stderr().lock()).run(&config)
}
