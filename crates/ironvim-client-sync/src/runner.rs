use std::io::Write;

use ironvim_client_core::{Credentials, VimConfig, VimCoreError};
use tracing::{debug, error, info, instrument, warn};

use crate::connection::{HttpClient, LogoutGuard, VimSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Server info printed, or the credentials were rejected.
    Success,
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(status: ExitStatus) -> Self {
        Self::from(status.code())
    }
}

enum LoginOutcome {
    Printed,
    Rejected,
}

/// Prints the failure banner and the whole error chain.
pub fn report_failure(stderr: &mut impl Write, error: &anyhow::Error) -> ExitStatus {
    error!(error = ?error, "connection test failed");
    let _ = writeln!(stderr, "Connection test failed");
    let _ = writeln!(stderr, "{error:?}");
    ExitStatus::Failure
}

/// Describe, login, print, logout; one pass, no retries.
pub struct SessionRunner<'c, C: HttpClient + ?Sized, O: Write, E: Write> {
    client: &'c C,
    stdout: O,
    stderr: E,
}

impl<'c, C: HttpClient + ?Sized, O: Write, E: Write> SessionRunner<'c, C, O, E> {
    pub fn new(client: &'c C, stdout: O, stderr: E) -> Self {
        Self {
            client,
            stdout,
            stderr,
        }
    }

    #[instrument(name = "session_runner", level = "info", skip_all, fields(server = %config.server, user = %config.credentials.username()))]
    pub fn run(&mut self, config: &VimConfig) -> ExitStatus {
        let session = match VimSession::open(config, self.client) {
            Ok(session) => session,
            Err(e) => return report_failure(&mut self.stderr, &e),
        };

        let mut guard = LogoutGuard::arm(session);

        let status = match self.login_and_print(guard.session(), &config.credentials) {
            Ok(LoginOutcome::Printed) => ExitStatus::Success,
            Ok(LoginOutcome::Rejected) => {
                // no session was created, nothing to release
                guard.disarm();
                return ExitStatus::Success;
            }
            Err(e) => report_failure(&mut self.stderr, &e),
        };

        if let Err(e) = guard.release() {
            warn!(error = ?e, "logout failed");
            let _ = writeln!(self.stdout, "Failed while logging out");
            let _ = writeln!(self.stderr, "{e:?}");
        }

        info!(exit_code = status.code(), "connection test finished");
        status
    }

    fn login_and_print(
        &mut self,
        session: &mut VimSession<'c, C>,
        credentials: &Credentials,
    ) -> anyhow::Result<LoginOutcome> {
        match session.login(credentials) {
            Ok(user_session) => {
                debug!(user = %user_session.user_name, login_time = ?user_session.login_time, "login accepted");
            }
            Err(e) => {
                if let Some(fault) = e
                    .downcast_ref::<VimCoreError>()
                    .filter(|core| core.is_invalid_login())
                    .and_then(VimCoreError::fault)
                {
                    warn!(user = %credentials.username(), "credentials rejected by the server");
                    writeln!(
                        self.stdout,
                        "Either your username ({}) was wrong, or the password ({}) was not the right one.",
                        credentials.username(),
                        credentials.password()
                    )?;
                    writeln!(self.stdout, "{}", fault.message)?;
                    self.stdout.flush()?;
                    return Ok(LoginOutcome::Rejected);
                }
                return Err(e);
            }
        }

        let about = session.about();
        writeln!(self.stdout, "{}", about.full_name)?;
        writeln!(self.stdout, "Server type is {}", about.api_type)?;
        writeln!(self.stdout, "API version is {}", about.version)?;
        self.stdout.flush()?;

        Ok(LoginOutcome::Printed)
    }
}
