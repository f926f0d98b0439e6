use std::fmt;

use ironvim_xml::parser::{Node, NodeExt};

use crate::namespaces::XSI;

/// Faults of the `RuntimeFault` hierarchy that any vim25 method may raise.
const RUNTIME_FAULTS: &[&str] = &[
    "RuntimeFault",
    "SystemError",
    "RequestCanceled",
    "SecurityError",
    "HostCommunication",
    "InvalidRequest",
    "NotSupported",
    "NotImplemented",
    "ManagedObjectNotFound",
    "InvalidArgument",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VimFaultKind {
    /// Credentials were rejected by `Login`.
    InvalidLogin,
    /// The call needs a session and the cookie did not carry one.
    NotAuthenticated,
    RuntimeFault(String),
    Other(String),
}

impl VimFaultKind {
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "InvalidLogin" => Self::InvalidLogin,
            "NotAuthenticated" => Self::NotAuthenticated,
            name if RUNTIME_FAULTS.contains(&name) => Self::RuntimeFault(name.to_string()),
            name => Self::Other(name.to_string()),
        }
    }
}

impl fmt::Display for VimFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLogin => write!(f, "InvalidLogin"),
            Self::NotAuthenticated => write!(f, "NotAuthenticated"),
            Self::RuntimeFault(name) | Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A decoded `soapenv:Fault`.
#[derive(Debug, Clone)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
    /// vim25 fault type from the detail block, if the server sent one.
    pub detail_type: Option<String>,
    pub kind: VimFaultKind,
}

impl SoapFault {
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let code = node.child_text("faultcode").unwrap_or_default().to_string();
        let message = node.child_text("faultstring").unwrap_or_default().to_string();

        let detail_type = node
            .child("detail")
            .and_then(|detail| detail.children().find(Node::is_element))
            .map(detail_type_name);

        let kind = detail_type
            .as_deref()
            .map_or_else(|| VimFaultKind::Other(code.clone()), VimFaultKind::from_type_name);

        Self {
            code,
            message,
            detail_type,
            kind,
        }
    }

    pub fn is_invalid_login(&self) -> bool {
        self.kind == VimFaultKind::InvalidLogin
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.code, self.message)
    }
}

/// `xsi:type` wins over the element name, e.g. `<InvalidLoginFault xsi:type="InvalidLogin">`.
fn detail_type_name(detail: Node<'_, '_>) -> String {
    if let Some(xsi_type) = detail.attribute((XSI, "type")) {
        let local = xsi_type.rsplit(':').next().unwrap_or(xsi_type);
        return local.to_string();
    }

    let name = detail.tag_name().name();
    name.strip_suffix("Fault")
        .filter(|stripped| !stripped.is_empty())
        .unwrap_or(name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironvim_xml::parser::parse;

    fn fault(xml: &str) -> SoapFault {
        let document = parse(xml).unwrap();
        SoapFault::from_node(document.root_element())
    }

    #[test]
    fn test_xsi_type_takes_precedence() {
        let fault = fault(
            r#"<Fault xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <faultcode>ServerFaultCode</faultcode>
                 <faultstring>Cannot complete login due to an incorrect user name or password.</faultstring>
                 <detail><InvalidLoginFault xmlns="urn:vim25" xsi:type="InvalidLogin"/></detail>
               </Fault>"#,
        );

        assert_eq!(fault.kind, VimFaultKind::InvalidLogin);
        assert_eq!(fault.detail_type.as_deref(), Some("InvalidLogin"));
        assert_eq!(fault.code, "ServerFaultCode");
        assert!(fault.is_invalid_login());
    }

    #[test]
    fn test_element_name_fallback_strips_suffix() {
        let fault = fault(
            r#"<Fault><faultcode>ServerFaultCode</faultcode><faultstring>boom</faultstring>
               <detail><SystemErrorFault xmlns="urn:vim25"><reason>boom</reason></SystemErrorFault></detail></Fault>"#,
        );

        assert_eq!(fault.kind, VimFaultKind::RuntimeFault("SystemError".to_string()));
    }

    #[test]
    fn test_fault_without_detail_uses_code() {
        let fault = fault(
            "<Fault><faultcode>soapenv:Client</faultcode><faultstring>Unable to parse</faultstring></Fault>",
        );

        assert_eq!(fault.kind, VimFaultKind::Other("soapenv:Client".to_string()));
        assert!(fault.detail_type.is_none());
        assert_eq!(fault.to_string(), "soapenv:Client (soapenv:Client): Unable to parse");
    }

    #[test]
    fn test_prefixed_xsi_type() {
        let fault = fault(
            r#"<Fault xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><faultcode>ServerFaultCode</faultcode><faultstring/>
               <detail><NotAuthenticatedFault xsi:type="vim25:NotAuthenticated"/></detail></Fault>"#,
        );

        assert_eq!(fault.kind, VimFaultKind::NotAuthenticated);
    }
}
