use std::sync::Arc;

use anyhow::Context;
use ironvim_client_core::TransportSecurity;
use tracing::{info, warn};

/// Decides which server certificates the HTTPS transport accepts.
pub trait TrustPolicy {
    fn name(&self) -> &'static str;

    fn configure(&self, builder: &mut native_tls::TlsConnectorBuilder);
}

/// Chain and host name verified against the platform trust store.
#[derive(Debug, Default)]
pub struct SystemTrust;

impl TrustPolicy for SystemTrust {
    fn name(&self) -> &'static str {
        "system-trust"
    }

    fn configure(&self, _builder: &mut native_tls::TlsConnectorBuilder) {}
}

/// DANGEROUS: accepts any certificate for any host name.
///
/// Self-signed certificates are the norm on freshly installed ESXi hosts and
/// lab vCenters, which is the only place this policy belongs.
#[derive(Debug, Default)]
pub struct AcceptAnyCertificate;

impl TrustPolicy for AcceptAnyCertificate {
    fn name(&self) -> &'static str {
        "accept-any-certificate"
    }

    fn configure(&self, builder: &mut native_tls::TlsConnectorBuilder) {
        builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }
}

pub fn trust_policy_for(transport: TransportSecurity) -> Box<dyn TrustPolicy> {
    match transport {
        TransportSecurity::Verified => Box::new(SystemTrust),
        TransportSecurity::InsecureAcceptAnyCertificate => {
            warn!("certificate validation is disabled - this is INSECURE!");
            Box::new(AcceptAnyCertificate)
        }
    }
}

pub fn build_tls_connector(policy: &dyn TrustPolicy) -> anyhow::Result<Arc<native_tls::TlsConnector>> {
    let mut builder = native_tls::TlsConnector::builder();
    policy.configure(&mut builder);

    let connector = builder
        .build()
        .with_context(|| format!("Failed to build TLS connector ({})", policy.name()))?;
    info!(policy = policy.name(), "TLS trust policy installed");

    Ok(Arc::new(connector))
}
