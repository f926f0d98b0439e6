use clap::{error::ErrorKind, Parser};
use ironvim_client_core::{
    connector::http::ServerAddress, Credentials, TransportSecurity, VimConfig, DEFAULT_API_RELEASE,
};
use std::{ffi::OsString, io::Write, path::PathBuf};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, registry::Registry, EnvFilter};

pub const USAGE: &str = "Wrong number of arguments, must provide three arguments:
[1] The server name or IP address
[2] The user name to log in as
[3] The password to use";

/// Sets up a panic hook so panics end up in the log file.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!("A panic occurred: {}", panic_info);
    }));
}

/// vSphere connection test: logs in, prints the server's product name,
/// type and API version, then logs out
#[derive(Parser, Debug)]
#[command(name = "test-connection", version, about, long_about = None)]
pub struct Args {
    /// The server name or IP address
    pub server: String,

    /// The user name to log in as
    pub username: String,

    /// The password to use
    pub password: String,

    /// Verify the server certificate against the system trust store
    #[arg(long, help = "Verify the server certificate (default: accept any certificate)")]
    pub verify_certificates: bool,

    /// vim25 release announced in the SOAPAction header
    #[arg(long, default_value = DEFAULT_API_RELEASE)]
    pub api_release: String,

    #[arg(long, default_value = "vim_client.log", help = "Log file path")]
    pub log_file: PathBuf,

    /// Verbose logging (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase logging verbosity")]
    pub verbose: u8,
}

/// Why the command line was not accepted.
#[derive(Debug)]
pub enum ArgsOutcome {
    /// `--help` or `--version`, rendered by clap.
    Informational(clap::Error),
    /// Wrong positional count, or an option clap could not parse.
    Usage(clap::Error),
}

impl ArgsOutcome {
    /// Prints the outcome and returns the process exit code.
    pub fn report(self, stdout: &mut impl Write, stderr: &mut impl Write) -> u8 {
        match self {
            Self::Informational(e) => {
                let _ = write!(stdout, "{}", e.render());
                0
            }
            Self::Usage(e) => {
                let _ = writeln!(stdout, "{USAGE}");
                if !is_argument_count_error(e.kind()) {
                    let _ = write!(stderr, "{}", e.render());
                }
                1
            }
        }
    }
}

fn is_argument_count_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument | ErrorKind::TooManyValues
    )
}

/// Options go first; the last three arguments are always the server, user
/// name and password, even when they look like flags (`-v`, `--`, `-h`).
pub fn parse_args<I, T>(args: I) -> Result<Args, ArgsOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    // args[0] is the program name
    if args.len() >= 4 {
        let first_positional = args.len() - 3;
        if args[first_positional - 1].to_str() != Some("--") {
            args.insert(first_positional, OsString::from("--"));
        }
    }

    Args::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ArgsOutcome::Informational(e),
        _ => ArgsOutcome::Usage(e),
    })
}

/// Initialize logging with file output and structured records.
///
/// The returned guard flushes the non-blocking writer when dropped, so it must
/// be held until the process is about to exit.
pub fn init_logging(verbose_level: u8, log_file: &std::path::Path) -> anyhow::Result<WorkerGuard> {
    setup_panic_hook();

    // ureq logs through the `log` crate
    LogTracer::init().ok();

    let file = std::fs::File::create(log_file)?;
    let (nb_writer, guard) = tracing_appender::non_blocking(file);

    let filter_str = match verbose_level {
        0 => "info,ureq=error,native_tls=error",
        1 => "debug,ureq=warn,native_tls=warn",
        2 => "trace,ureq=info,native_tls=info",
        _ => "trace",
    };

    let env_filter = EnvFilter::new(filter_str);

    let subscriber = Registry::default().with(env_filter).with(
        fmt::layer()
            .with_writer(nb_writer)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(false)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!("Logging system initialized.");

    Ok(guard)
}

/// Create connector configuration from command line arguments
pub fn create_connector_config(args: &Args) -> Result<VimConfig, anyhow::Error> {
    let server = ServerAddress::parse(&args.server)?;

    let transport = if args.verify_certificates {
        TransportSecurity::Verified
    } else {
        TransportSecurity::InsecureAcceptAnyCertificate
    };

    debug!(%server, ?transport, api_release = %args.api_release, "connector configuration");

    Ok(VimConfig::builder()
        .server(server)
        .credentials(Credentials::new(&args.username, &args.password))
        .transport(transport)
        .api_release(args.api_release.as_str())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_of(args: &[&str]) -> (u8, String, String) {
        let outcome = parse_args(args).expect_err("arguments must be rejected");
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = outcome.report(&mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn test_three_positionals_are_accepted() {
        let args = parse_args(["test-connection", "203.0.113.5", "admin", "wrongpass"]).unwrap();

        assert_eq!(args.server, "203.0.113.5");
        assert_eq!(args.username, "admin");
        assert_eq!(args.password, "wrongpass");
        assert!(!args.verify_certificates);
        assert_eq!(args.api_release, "6.0");
        assert_eq!(args.log_file, PathBuf::from("vim_client.log"));
    }

    #[test]
    fn test_too_few_arguments_print_usage() {
        for args in [
            &["test-connection"][..],
            &["test-connection", "vcenter"],
            &["test-connection", "vcenter", "admin"],
        ] {
            let (code, stdout, stderr) = usage_of(args);
            assert_eq!(code, 1);
            assert_eq!(stdout.trim_end(), USAGE);
            assert!(stderr.is_empty());
        }
    }

    #[test]
    fn test_too_many_arguments_print_usage() {
        let (code, stdout, _) = usage_of(&["test-connection", "vcenter", "admin", "secret", "extra"]);

        assert_eq!(code, 1);
        assert!(stdout.contains("[1] The server name or IP address"));
        assert!(stdout.contains("[2] The user name to log in as"));
        assert!(stdout.contains("[3] The password to use"));
    }

    #[test]
    fn test_password_may_start_with_a_dash() {
        let args = parse_args(["test-connection", "vcenter", "admin", "-s3cret"]).unwrap();
        assert_eq!(args.password, "-s3cret");
    }

    #[test]
    fn test_password_that_looks_like_a_flag_is_positional() {
        for password in ["-v", "-h", "--help", "--", "--log-file", "-V"] {
            let args = parse_args(["test-connection", "vcenter", "admin", password])
                .unwrap_or_else(|e| panic!("password {password:?} rejected: {e:?}"));

            assert_eq!(args.server, "vcenter");
            assert_eq!(args.username, "admin");
            assert_eq!(args.password, password);
            assert_eq!(args.verbose, 0);
            assert_eq!(args.log_file, PathBuf::from("vim_client.log"));
        }
    }

    #[test]
    fn test_options_before_flag_like_positionals() {
        let args = parse_args([
            "test-connection",
            "-v",
            "--api-release",
            "7.0",
            "-x",
            "--",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.verbose, 1);
        assert_eq!(args.api_release, "7.0");
        assert_eq!(args.server, "-x");
        assert_eq!(args.username, "--");
        assert_eq!(args.password, "-v");
    }

    #[test]
    fn test_explicit_separator_is_honoured() {
        let args = parse_args(["test-connection", "--", "vcenter", "admin", "secret"]).unwrap();

        assert_eq!(args.server, "vcenter");
        assert_eq!(args.password, "secret");
    }

    #[test]
    fn test_help_is_informational() {
        let outcome = parse_args(["test-connection", "--help"]).unwrap_err();
        assert!(matches!(outcome, ArgsOutcome::Informational(_)));

        let mut stdout = Vec::new();
        let code = outcome.report(&mut stdout, &mut Vec::new());
        assert_eq!(code, 0);
        assert!(String::from_utf8(stdout).unwrap().contains("<SERVER>"));
    }

    #[test]
    fn test_connector_config_defaults_to_insecure_demo_mode() {
        let args = parse_args(["test-connection", "esx01.lab.local", "root", "vmware"]).unwrap();
        let config = create_connector_config(&args).unwrap();

        assert_eq!(config.transport, TransportSecurity::InsecureAcceptAnyCertificate);
        assert_eq!(config.credentials.username(), "root");
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "https://esx01.lab.local/sdk/vimService"
        );
    }

    #[test]
    fn test_connector_config_honours_options() {
        let args = parse_args([
            "test-connection",
            "--verify-certificates",
            "--api-release",
            "8.0.2.0",
            "vcenter",
            "admin",
            "secret",
        ])
        .unwrap();
        let config = create_connector_config(&args).unwrap();

        assert_eq!(config.transport, TransportSecurity::Verified);
        assert_eq!(config.soap_action(), "\"urn:vim25/8.0.2.0\"");
    }

    #[test]
    fn test_blank_server_is_rejected() {
        let args = parse_args(["test-connection", "  ", "admin", "secret"]).unwrap();
        assert!(create_connector_config(&args).is_err());
    }
}
