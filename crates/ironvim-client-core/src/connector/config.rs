use url::Url;

use crate::{Credentials, VimCoreError, connector::http::ServerAddress};

/// vim25 release announced in the `SOAPAction` header. Servers answer any
/// release up to their own, so an old one keeps the client compatible.
pub const DEFAULT_API_RELEASE: &str = "6.0";

pub const SDK_PATH: &str = "/sdk/vimService";

/// How the server certificate is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportSecurity {
    /// Certificate chain and host name are verified against the system trust store.
    #[default]
    Verified,
    /// DANGEROUS: any certificate is accepted for any host. Demo and lab use only.
    InsecureAcceptAnyCertificate,
}

/// Connection parameters, fixed for the lifetime of a connector.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub struct VimConfig {
    pub server: ServerAddress,
    pub credentials: Credentials,
    #[builder(default)]
    pub transport: TransportSecurity,
    #[builder(default = DEFAULT_API_RELEASE.to_string(), setter(into))]
    pub api_release: String,
}

impl VimConfig {
    /// `https://<server>/sdk/vimService`
    pub fn endpoint_url(&self) -> Result<Url, VimCoreError> {
        let url = Url::parse(&format!("https://{}{SDK_PATH}", self.server.url_host()))?;

        if url.path() != SDK_PATH || url.query().is_some() || url.fragment().is_some() {
            return Err(VimCoreError::InvalidServerAddress(
                "server address must be a host name or IP address, optionally with a port",
            ));
        }

        Ok(url)
    }

    pub fn soap_action(&self) -> String {
        format!("\"urn:vim25/{}\"", self.api_release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(server: &str) -> VimConfig {
        VimConfig::builder()
            .server(ServerAddress::parse(server).unwrap())
            .credentials(Credentials::new("root", "secret"))
            .build()
    }

    #[test]
    fn test_defaults() {
        let config = config("vcenter.lab.local");

        assert_eq!(config.transport, TransportSecurity::Verified);
        assert_eq!(config.api_release, DEFAULT_API_RELEASE);
        assert_eq!(config.soap_action(), "\"urn:vim25/6.0\"");
    }

    #[test]
    fn test_endpoint_url_for_host_ip_and_port() {
        assert_eq!(
            config("vcenter.lab.local").endpoint_url().unwrap().as_str(),
            "https://vcenter.lab.local/sdk/vimService"
        );
        assert_eq!(
            config("203.0.113.5").endpoint_url().unwrap().as_str(),
            "https://203.0.113.5/sdk/vimService"
        );
        assert_eq!(
            config("esx01:8443").endpoint_url().unwrap().as_str(),
            "https://esx01:8443/sdk/vimService"
        );
        assert_eq!(
            config("2001:db8::1").endpoint_url().unwrap().as_str(),
            "https://[2001:db8::1]/sdk/vimService"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_paths_and_garbage() {
        assert!(config("vcenter/ui").endpoint_url().is_err());
        assert!(config("vcenter?x=1").endpoint_url().is_err());
        assert!(config("bad host").endpoint_url().is_err());
    }
}
