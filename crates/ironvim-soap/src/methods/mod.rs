mod login;
mod logout;
mod retrieve_service_content;

pub use login::{Login, UserSession};
pub use logout::Logout;
pub use retrieve_service_content::{AboutInfo, RetrieveServiceContent, ServiceContent};

use ironvim_xml::{
    builder::Element,
    parser::{Node, NodeExt},
};
use tracing::{debug, instrument, warn};

use crate::{
    SoapError, SoapFault,
    envelope::SoapEnvelope,
    namespaces::{SOAP_ENVELOPE, VIM25},
};

/// A vim25 operation: how its request body is written and how its `returnval` is read.
pub trait VimMethod {
    /// Operation name, also the request element name.
    const NAME: &'static str;

    type Output;

    /// Child elements of the operation element, `_this` first.
    fn parameters(&self) -> Vec<Element<'_>>;

    /// Decodes the response; `returnval` is `None` for void operations.
    fn decode(returnval: Option<Node<'_, '_>>) -> Result<Self::Output, SoapError>;
}

/// Writes the full SOAP request document for `method`.
pub fn encode_request<M: VimMethod>(method: &M) -> Result<String, SoapError> {
    let operation = Element::new(M::NAME)
        .set_namespace(VIM25)
        .add_namespace_declaration(VIM25, None)
        .add_children(method.parameters());

    SoapEnvelope::wrap(operation)
}

/// Parses a response document for `M`, surfacing a SOAP fault as [`SoapError::Fault`].
#[instrument(level = "debug", skip(xml), fields(method = M::NAME, length = xml.len()))]
pub fn decode_response<M: VimMethod>(xml: &str) -> Result<M::Output, SoapError> {
    let document = ironvim_xml::parser::parse(xml)?;
    let body = SoapEnvelope::parse_body(&document)?;

    if let Some(fault) = body.child_ns(SOAP_ENVELOPE, "Fault") {
        let fault = SoapFault::from_node(fault);
        warn!(kind = %fault.kind, message = %fault.message, "server returned a fault");
        return Err(SoapError::Fault(fault));
    }

    let expected = format!("{}Response", M::NAME);
    let response = body
        .children()
        .find(Node::is_element)
        .ok_or_else(|| SoapError::UnexpectedResponse {
            expected: expected.clone(),
            found: "empty Body".to_string(),
        })?;

    if response.tag_name().name() != expected || response.tag_name().namespace() != Some(VIM25) {
        return Err(SoapError::UnexpectedResponse {
            expected,
            found: response.tag_name().name().to_string(),
        });
    }

    debug!("decoding response payload");
    M::decode(response.child("returnval"))
}

/// `returnval` is mandatory for operations with a result.
pub(crate) fn require_returnval<'a, 'input>(
    returnval: Option<Node<'a, 'input>>,
    method: &str,
) -> Result<Node<'a, 'input>, SoapError> {
    returnval.ok_or_else(|| {
        SoapError::Xml(ironvim_xml::XmlError::MissingElement {
            parent: format!("{method}Response"),
            name: "returnval".to_string(),
        })
    })
}
