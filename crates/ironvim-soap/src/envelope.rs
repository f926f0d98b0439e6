use ironvim_xml::{
    builder::{Builder, Declaration, Element},
    parser::{Document, Node, NodeExt},
};

use crate::{
    SoapError,
    namespaces::{SOAP_ENVELOPE, SOAP_ENVELOPE_ALIAS, XSD, XSD_ALIAS, XSI, XSI_ALIAS},
};

/// SOAP 1.1 envelope as spoken by the vim25 endpoint. Requests carry no header.
pub struct SoapEnvelope;

impl SoapEnvelope {
    /// Wraps a body payload element into a complete request document.
    pub fn wrap(payload: Element<'_>) -> Result<String, SoapError> {
        let envelope = Element::new("Envelope")
            .set_namespace(SOAP_ENVELOPE)
            .add_namespace_declaration(SOAP_ENVELOPE, Some(SOAP_ENVELOPE_ALIAS))
            .add_namespace_declaration(XSD, Some(XSD_ALIAS))
            .add_namespace_declaration(XSI, Some(XSI_ALIAS))
            .add_child(
                Element::new("Body")
                    .set_namespace(SOAP_ENVELOPE)
                    .add_child(payload),
            );

        let document = Builder::new(Some(Declaration::new("1.0", "UTF-8")), envelope);
        Ok(document.to_xml_string()?)
    }

    /// Returns the `Body` element of a parsed response envelope.
    pub fn parse_body<'a, 'input>(
        document: &'a Document<'input>,
    ) -> Result<Node<'a, 'input>, SoapError> {
        let envelope = document.root_element();
        envelope.expect_tag(SOAP_ENVELOPE, "Envelope")?;

        envelope.child_ns(SOAP_ENVELOPE, "Body").ok_or_else(|| {
            SoapError::Xml(ironvim_xml::XmlError::MissingElement {
                parent: "Envelope".to_string(),
                name: "Body".to_string(),
            })
        })
    }
}
