pub use roxmltree::*;

use crate::XmlError;

pub fn parse(xml: &str) -> Result<Document<'_>, roxmltree::Error> {
    roxmltree::Document::parse(xml)
}

/// Lookup helpers over element children, matching on local names.
pub trait NodeExt<'a, 'input: 'a> {
    fn child(&self, name: &str) -> Option<Node<'a, 'input>>;

    fn child_ns(&self, namespace: &str, name: &str) -> Option<Node<'a, 'input>>;

    fn required_child(&self, name: &str) -> Result<Node<'a, 'input>, XmlError>;

    fn child_text(&self, name: &str) -> Option<&'a str>;

    fn required_text(&self, name: &str) -> Result<&'a str, XmlError>;

    /// Text content with surrounding whitespace removed, empty when absent.
    fn text_trimmed(&self) -> &'a str;

    /// Fails unless the node is an element with the given namespace and local name.
    fn expect_tag(&self, namespace: &str, name: &str) -> Result<(), XmlError>;
}

impl<'a, 'input: 'a> NodeExt<'a, 'input> for Node<'a, 'input> {
    fn child(&self, name: &str) -> Option<Node<'a, 'input>> {
        self.children()
            .find(|child| child.is_element() && child.tag_name().name() == name)
    }

    fn child_ns(&self, namespace: &str, name: &str) -> Option<Node<'a, 'input>> {
        self.children().find(|child| {
            child.is_element()
                && child.tag_name().name() == name
                && child.tag_name().namespace() == Some(namespace)
        })
    }

    fn required_child(&self, name: &str) -> Result<Node<'a, 'input>, XmlError> {
        self.child(name).ok_or_else(|| XmlError::MissingElement {
            parent: self.tag_name().name().to_string(),
            name: name.to_string(),
        })
    }

    fn child_text(&self, name: &str) -> Option<&'a str> {
        self.child(name).map(|child| child.text_trimmed())
    }

    fn required_text(&self, name: &str) -> Result<&'a str, XmlError> {
        self.required_child(name).map(|child| child.text_trimmed())
    }

    fn text_trimmed(&self) -> &'a str {
        self.text().map_or("", str::trim)
    }

    fn expect_tag(&self, namespace: &str, name: &str) -> Result<(), XmlError> {
        if !self.is_element() || self.tag_name().name() != name {
            return Err(XmlError::XmlInvalidTag {
                expected: name.to_string(),
                found: self.tag_name().name().to_string(),
            });
        }

        if self.tag_name().namespace() != Some(namespace) {
            return Err(XmlError::XmlInvalidNamespace {
                expected: namespace.to_string(),
                found: self.tag_name().namespace().map(str::to_string),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABOUT: &str = r#"
<about xmlns="urn:vim25" xmlns:other="urn:other">
  <fullName>
    VMware ESXi 8.0.2 build-22380479
  </fullName>
  <apiType>HostAgent</apiType>
  <other:apiType>ignored</other:apiType>
  <licenseProductName/>
</about>
"#;

    #[test]
    fn test_child_lookup_skips_text_nodes() {
        let doc = parse(ABOUT).unwrap();
        let root = doc.root_element();

        assert_eq!(
            root.child_text("fullName"),
            Some("VMware ESXi 8.0.2 build-22380479")
        );
        assert_eq!(root.child_text("licenseProductName"), Some(""));
        assert!(root.child("build").is_none());
    }

    #[test]
    fn test_child_ns_filters_namespace() {
        let doc = parse(ABOUT).unwrap();
        let root = doc.root_element();

        let other = root.child_ns("urn:other", "apiType").unwrap();
        assert_eq!(other.text_trimmed(), "ignored");
        let vim = root.child_ns("urn:vim25", "apiType").unwrap();
        assert_eq!(vim.text_trimmed(), "HostAgent");
    }

    #[test]
    fn test_required_text_reports_parent() {
        let doc = parse(ABOUT).unwrap();
        let err = doc.root_element().required_text("version").unwrap_err();

        match err {
            XmlError::MissingElement { parent, name } => {
                assert_eq!(parent, "about");
                assert_eq!(name, "version");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_expect_tag() {
        let doc = parse(ABOUT).unwrap();
        let root = doc.root_element();

        assert!(root.expect_tag("urn:vim25", "about").is_ok());
        assert!(matches!(
            root.expect_tag("urn:vim25", "Envelope"),
            Err(XmlError::XmlInvalidTag { .. })
        ));
        assert!(matches!(
            root.expect_tag("urn:other", "about"),
            Err(XmlError::XmlInvalidNamespace { .. })
        ));
    }

    #[test]
    fn test_parse_error_converts_into_xml_error() {
        let err: XmlError = parse("<unclosed>").unwrap_err().into();
        assert!(matches!(err, XmlError::ParserError(_)));
    }
}
