use std::borrow::Cow;

pub mod connector;
pub mod credentials;

pub use connector::config::{DEFAULT_API_RELEASE, TransportSecurity, VimConfig};
pub use connector::{VimConnector, cookie::SessionCookies};
pub use credentials::Credentials;
pub use ironvim_soap::{AboutInfo, ManagedObjectReference, ServiceContent, SoapFault, UserSession};

#[derive(Debug, thiserror::Error)]
pub enum VimCoreError {
    #[error("Invalid server address: {0}")]
    InvalidServerAddress(&'static str),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("SOAP error: {0}")]
    Soap(ironvim_soap::SoapError),

    #[error("Server fault: {0}")]
    Fault(SoapFault),

    #[error("Unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(Cow<'static, str>),
}

impl VimCoreError {
    pub fn fault(&self) -> Option<&SoapFault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// The server rejected the user name or password.
    pub fn is_invalid_login(&self) -> bool {
        self.fault().is_some_and(SoapFault::is_invalid_login)
    }
}

impl From<ironvim_soap::SoapError> for VimCoreError {
    fn from(value: ironvim_soap::SoapError) -> Self {
        match value {
            ironvim_soap::SoapError::Fault(fault) => Self::Fault(fault),
            other => Self::Soap(other),
        }
    }
}
