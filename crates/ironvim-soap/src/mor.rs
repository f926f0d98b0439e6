use std::fmt;

use ironvim_xml::{
    XmlError,
    builder::{Attribute, Element},
    parser::{Node, NodeExt},
};

use crate::namespaces::VIM25;

/// Reference to a server-side managed object, e.g. `<_this type="SessionManager">SessionManager</_this>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagedObjectReference {
    pub mo_type: String,
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(mo_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mo_type: mo_type.into(),
            value: value.into(),
        }
    }

    /// The root object of every vim25 endpoint; usable before login.
    pub fn service_instance() -> Self {
        Self::new("ServiceInstance", "ServiceInstance")
    }

    pub fn to_element<'a>(&'a self, name: &'a str) -> Element<'a> {
        Element::new(name)
            .set_namespace(VIM25)
            .add_attribute(Attribute::new("type", self.mo_type.as_str()))
            .set_text(&self.value)
    }

    pub fn from_node(node: Node<'_, '_>) -> Result<Self, XmlError> {
        let mo_type = node.attribute("type").ok_or_else(|| {
            XmlError::InvalidXml(format!(
                "<{}> is not a managed object reference: missing type attribute",
                node.tag_name().name()
            ))
        })?;

        Ok(Self::new(mo_type, node.text_trimmed()))
    }
}

impl fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mo_type, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironvim_xml::builder::Builder;

    #[test]
    fn test_element_round_trips_through_parser() {
        let mor = ManagedObjectReference::service_instance();
        let element = mor
            .to_element("_this")
            .add_namespace_declaration(VIM25, None);
        let xml = Builder::new(None, element).to_xml_string().unwrap();

        assert_eq!(
            xml,
            r#"<_this xmlns="urn:vim25" type="ServiceInstance">ServiceInstance</_this>"#
        );

        let document = ironvim_xml::parser::parse(&xml).unwrap();
        let parsed = ManagedObjectReference::from_node(document.root_element()).unwrap();
        assert_eq!(parsed, mor);
    }

    #[test]
    fn test_missing_type_attribute() {
        let document = ironvim_xml::parser::parse("<sessionManager>SessionManager</sessionManager>").unwrap();
        assert!(ManagedObjectReference::from_node(document.root_element()).is_err());
    }

    #[test]
    fn test_display() {
        let mor = ManagedObjectReference::new("Folder", "group-d1");
        assert_eq!(mor.to_string(), "Folder:group-d1");
    }
}
