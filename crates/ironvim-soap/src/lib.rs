pub mod envelope;
pub mod fault;
pub mod methods;
pub mod mor;
pub mod namespaces;

pub use envelope::SoapEnvelope;
pub use fault::{SoapFault, VimFaultKind};
pub use methods::{
    AboutInfo, Login, Logout, RetrieveServiceContent, ServiceContent, UserSession, VimMethod,
    decode_response, encode_request,
};
pub use mor::ManagedObjectReference;

#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    #[error("XML error: {0}")]
    Xml(#[from] ironvim_xml::XmlError),

    #[error("Server fault: {0}")]
    Fault(SoapFault),

    #[error("Unexpected response: expected <{expected}>, found <{found}>")]
    UnexpectedResponse { expected: String, found: String },
}

impl From<ironvim_xml::parser::Error> for SoapError {
    fn from(value: ironvim_xml::parser::Error) -> Self {
        Self::Xml(value.into())
    }
}

impl From<ironvim_xml::builder::XmlBuilderError> for SoapError {
    fn from(value: ironvim_xml::builder::XmlBuilderError) -> Self {
        Self::Xml(value.into())
    }
}
