use tracing::{debug, info, instrument, warn};

use ironvim_soap::{
    Login, Logout, ManagedObjectReference, RetrieveServiceContent, ServiceContent, UserSession,
    VimMethod, decode_response, encode_request,
};

use crate::{
    VimCoreError,
    connector::{
        config::VimConfig,
        http::{HttpBody, HttpBuilder, HttpRequest, HttpResponse},
    },
};

pub mod config;
pub mod cookie;
pub mod http;

/// Longest body excerpt kept in an HTTP status error.
const ERROR_BODY_EXCERPT: usize = 512;

/// RPC binding to one vim25 endpoint.
///
/// The connector performs no IO: each operation is split into a method that
/// builds the [`HttpRequest`] and an `accept_*` method that consumes the
/// matching [`HttpResponse`]. Cookies set by the server are replayed on every
/// later request, which keeps all calls inside one server session.
#[derive(Debug)]
pub struct VimConnector {
    http: HttpBuilder,
}

impl VimConnector {
    pub fn new(config: &VimConfig) -> Result<Self, VimCoreError> {
        let url = config.endpoint_url()?;
        info!(endpoint = %url, transport = ?config.transport, "binding vim25 endpoint");

        Ok(Self {
            http: HttpBuilder::new(url.into(), config.soap_action()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.http.url
    }

    /// `RetrieveServiceContent` against the well-known `ServiceInstance`.
    pub fn retrieve_service_content(&self) -> Result<HttpRequest, VimCoreError> {
        self.request(&RetrieveServiceContent::default())
    }

    pub fn accept_service_content(
        &mut self,
        response: HttpResponse,
    ) -> Result<ServiceContent, VimCoreError> {
        let content = self.accept::<RetrieveServiceContent>(response)?;
        info!(
            full_name = %content.about.full_name,
            api_type = %content.about.api_type,
            version = %content.about.version,
            "service content retrieved"
        );
        Ok(content)
    }

    pub fn login(
        &self,
        session_manager: &ManagedObjectReference,
        user_name: &str,
        password: &str,
        locale: Option<&str>,
    ) -> Result<HttpRequest, VimCoreError> {
        let login = Login {
            this: session_manager.clone(),
            user_name: user_name.to_string(),
            password: password.to_string(),
            locale: locale.map(str::to_string),
        };
        self.request(&login)
    }

    pub fn accept_login(&mut self, response: HttpResponse) -> Result<UserSession, VimCoreError> {
        let session = self.accept::<Login>(response)?;
        if !self.http.cookies.has_session() {
            warn!("login succeeded but the server did not set a session cookie");
        }
        info!(user = %session.user_name, "logged in");
        Ok(session)
    }

    pub fn logout(
        &self,
        session_manager: &ManagedObjectReference,
    ) -> Result<HttpRequest, VimCoreError> {
        self.request(&Logout {
            this: session_manager.clone(),
        })
    }

    pub fn accept_logout(&mut self, response: HttpResponse) -> Result<(), VimCoreError> {
        self.accept::<Logout>(response)?;
        info!("logged out");
        Ok(())
    }

    #[instrument(level = "debug", skip(self, method), fields(method = M::NAME))]
    fn request<M: VimMethod>(&self, method: &M) -> Result<HttpRequest, VimCoreError> {
        let xml = encode_request(method)?;
        debug!(
            body_length = xml.len(),
            has_cookie = !self.http.cookies.is_empty(),
            "request built"
        );
        Ok(self.http.post(HttpBody::Xml(xml)))
    }

    /// Faults travel with status 500, so both 2xx and 500 carry a SOAP body.
    #[instrument(level = "debug", skip(self, response), fields(method = M::NAME, status = response.status_code))]
    fn accept<M: VimMethod>(&mut self, response: HttpResponse) -> Result<M::Output, VimCoreError> {
        let stored = self
            .http
            .cookies
            .absorb(response.header_values("Set-Cookie"));
        if stored > 0 {
            debug!(stored, "session cookies updated");
        }

        if !response.is_success() && response.status_code != 500 {
            let body = response.body.as_str();
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            warn!(status = response.status_code, "unexpected HTTP status");
            return Err(VimCoreError::Http {
                status: response.status_code,
                body: excerpt,
            });
        }

        if response.body.is_empty() {
            return Err(VimCoreError::InvalidResponse(
                format!("empty body for {}", M::NAME).into(),
            ));
        }

        Ok(decode_response::<M>(response.body.as_str())?)
    }
}
