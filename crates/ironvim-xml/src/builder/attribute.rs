use std::borrow::Cow;

use crate::builder::{escape, AliasMap, Namespace, NamespaceWrite, XmlBuilderError};

/// Represents an XML attribute with a name and value.
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    name: &'a str,
    value: Cow<'a, str>,
    namespace: Option<Namespace<'a>>,
}

impl<'a> Attribute<'a> {
    /// Creates a new instance of `Attribute`.
    ///
    /// # Example
    ///
    /// ```
    /// use ironvim_xml::builder::Attribute;
    /// let attribute = Attribute::new("type", "ServiceInstance");
    /// ```
    pub fn new(name: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        Attribute {
            name,
            value: value.into(),
            namespace: None,
        }
    }

    pub fn set_namespace(mut self, namespace: impl Into<Namespace<'a>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl<'a> NamespaceWrite<'a> for Attribute<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: &AliasMap<'a>,
    ) -> Result<(), XmlBuilderError> {
        let name = match &self.namespace {
            None => Cow::Borrowed(self.name),
            Some(ns) => match aliases.get(ns) {
                Some(Some(alias)) => Cow::Owned(format!("{alias}:{}", self.name)),
                // unprefixed attributes never belong to the default namespace
                Some(None) => {
                    return Err(XmlBuilderError::NamespaceHasNoAlias {
                        tag: self.name.to_string(),
                        ns: ns.url.to_string(),
                    })
                }
                None => {
                    return Err(XmlBuilderError::NamespaceNotDeclared {
                        tag: self.name.to_string(),
                        ns: ns.url.to_string(),
                    })
                }
            },
        };

        write!(w, " {}=\"{}\"", name, escape(&self.value))?;
        Ok(())
    }
}
