use anyhow::Context;
use ironvim_client_core::{
    connector::http::{HttpRequest, HttpResponse},
    AboutInfo, Credentials, ManagedObjectReference, ServiceContent, UserSession, VimConfig,
    VimConnector,
};
use tracing::{info, instrument, warn};

pub trait HttpClient {
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, anyhow::Error>;
}

/// A connector bound to an endpoint, together with the transport it talks
/// through and what the service descriptor told us when it was opened.
pub struct VimSession<'c, C: HttpClient + ?Sized> {
    connector: VimConnector,
    client: &'c C,
    about: AboutInfo,
    session_manager: ManagedObjectReference,
}

impl<'c, C: HttpClient + ?Sized> VimSession<'c, C> {
    /// Binds the endpoint and retrieves the service descriptor. A descriptor
    /// without a session manager cannot be logged into and is an error.
    #[instrument(level = "info", skip_all, fields(server = %config.server))]
    pub fn open(config: &VimConfig, client: &'c C) -> Result<Self, anyhow::Error> {
        let mut connector =
            VimConnector::new(config).context("Failed to bind the vim25 endpoint")?;

        let request = connector.retrieve_service_content()?;
        let response = client
            .send_request(request)
            .context("RetrieveServiceContent request failed")?;
        let ServiceContent {
            about,
            session_manager,
            ..
        } = connector
            .accept_service_content(response)
            .context("Failed to retrieve the service content")?;

        let session_manager =
            session_manager.context("The server did not expose a session manager")?;
        info!(endpoint = connector.endpoint(), %session_manager, "service described");

        Ok(Self {
            connector,
            client,
            about,
            session_manager,
        })
    }

    pub fn about(&self) -> &AboutInfo {
        &self.about
    }

    /// Errors keep the [`ironvim_client_core::VimCoreError`] as their source,
    /// so a rejected login can be told apart with `downcast_ref`.
    #[instrument(level = "info", skip_all, fields(user = %credentials.username()))]
    pub fn login(&mut self, credentials: &Credentials) -> Result<UserSession, anyhow::Error> {
        let request = self.connector.login(
            &self.session_manager,
            credentials.username(),
            credentials.password(),
            None,
        )?;
        let response = self
            .client
            .send_request(request)
            .context("Login request failed")?;

        let session = self
            .connector
            .accept_login(response)
            .context("Login failed")?;
        info!(session_key_len = session.key.len(), "session established");
        Ok(session)
    }

    #[instrument(level = "info", skip_all)]
    pub fn logout(&mut self) -> Result<(), anyhow::Error> {
        let request = self.connector.logout(&self.session_manager)?;
        let response = self
            .client
            .send_request(request)
            .context("Logout request failed")?;
        self.connector
            .accept_logout(response)
            .context("Logout failed")?;
        Ok(())
    }
}

/// Releases the remote session when the run leaves the logged-in scope.
///
/// Consumed either by [`LogoutGuard::release`], which attempts `Logout`
/// exactly once, or by [`LogoutGuard::disarm`] when there is no session to
/// release.
#[must_use = "an armed guard must be released or disarmed"]
pub struct LogoutGuard<'c, C: HttpClient + ?Sized> {
    session: VimSession<'c, C>,
    armed: bool,
}

impl<'c, C: HttpClient + ?Sized> LogoutGuard<'c, C> {
    pub fn arm(session: VimSession<'c, C>) -> Self {
        Self {
            session,
            armed: true,
        }
    }

    pub fn session(&mut self) -> &mut VimSession<'c, C> {
        &mut self.session
    }

    pub fn release(mut self) -> Result<(), anyhow::Error> {
        self.armed = false;
        self.session.logout()
    }

    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C: HttpClient + ?Sized> Drop for LogoutGuard<'_, C> {
    fn drop(&mut self) {
        if self.armed {
            warn!("logout guard dropped while armed, the server session stays open until it expires");
        }
    }
}
