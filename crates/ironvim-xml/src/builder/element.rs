use std::borrow::Cow;

use crate::builder::{escape, AliasMap, Attribute, Namespace, NamespaceWrite, XmlBuilderError};

#[derive(Debug, Clone)]
pub enum Content<'a> {
    /// Represents a text content within an XML element.
    Text(Cow<'a, str>),
    /// Represents a child element within an XML element.
    Elements(Vec<Element<'a>>),

    None,
}

/// Represents an XML element.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    /// The name of the element.
    name: &'a str,
    /// The namespace this element belongs to.
    namespace: Option<Namespace<'a>>,
    /// Namespaces declared on this element, `None` alias means default namespace.
    declarations: Vec<(Namespace<'a>, Option<&'a str>)>,
    /// The attributes of the element.
    attributes: Vec<Attribute<'a>>,
    /// Text or child elements.
    content: Content<'a>,
}

impl<'a> Element<'a> {
    /// Creates a new instance of `Element` with the given name.
    ///
    /// # Example
    ///
    /// ```
    /// use ironvim_xml::builder::Element;
    /// let element = Element::new("returnval");
    /// ```
    pub fn new(name: &'a str) -> Self {
        Element {
            name,
            namespace: None,
            declarations: Vec::new(),
            attributes: Vec::new(),
            content: Content::None,
        }
    }

    /// Places the element in a namespace. The namespace must be declared on
    /// this element or one of its ancestors before the document is written.
    ///
    /// # Example
    ///
    /// ```
    /// use ironvim_xml::builder::{Element, Namespace};
    /// let element = Element::new("Login")
    ///     .set_namespace(Namespace::new("urn:vim25"))
    ///     .add_namespace_declaration("urn:vim25", None);
    /// ```
    pub fn set_namespace(mut self, namespace: impl Into<Namespace<'a>>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Declares `xmlns:alias="url"`, or `xmlns="url"` when `alias` is `None`.
    pub fn add_namespace_declaration(mut self, url: &'a str, alias: Option<&'a str>) -> Self {
        self.declarations.push((Namespace::new(url), alias));
        self
    }

    pub fn add_attribute(mut self, attribute: Attribute<'a>) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Adds a child element. Any previously set text is discarded.
    pub fn add_child(mut self, child: Element<'a>) -> Self {
        match self.content {
            Content::None | Content::Text(_) => {
                self.content = Content::Elements(vec![child]);
            }
            Content::Elements(ref mut children) => {
                children.push(child);
            }
        }
        self
    }

    pub fn add_children(mut self, children: Vec<Element<'a>>) -> Self {
        for child in children {
            self = self.add_child(child);
        }
        self
    }

    /// Adds a child only when `child` is `Some`.
    pub fn add_child_optional(self, child: Option<Element<'a>>) -> Self {
        match child {
            Some(child) => self.add_child(child),
            None => self,
        }
    }

    /// Sets the text content of the element. Any previously added children are discarded.
    pub fn set_text(mut self, text: &'a str) -> Self {
        self.content = Content::Text(Cow::Borrowed(text));
        self
    }

    pub fn set_text_owned(mut self, text: String) -> Self {
        self.content = Content::Text(Cow::Owned(text));
        self
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn content(&self) -> &Content<'a> {
        &self.content
    }

    fn qualified_name(&self, aliases: &AliasMap<'a>) -> Result<Cow<'a, str>, XmlBuilderError> {
        let Some(ns) = &self.namespace else {
            return Ok(Cow::Borrowed(self.name));
        };

        match aliases.get(ns) {
            Some(Some(alias)) => Ok(Cow::Owned(format!("{alias}:{}", self.name))),
            Some(None) => Ok(Cow::Borrowed(self.name)),
            None => Err(XmlBuilderError::NamespaceNotDeclared {
                tag: self.name.to_string(),
                ns: ns.url.to_string(),
            }),
        }
    }
}

impl<'a> NamespaceWrite<'a> for Element<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: &AliasMap<'a>,
    ) -> Result<(), XmlBuilderError> {
        let scoped;
        let aliases = if self.declarations.is_empty() {
            aliases
        } else {
            let mut map = aliases.clone();
            map.extend(self.declarations.iter().copied());
            scoped = map;
            &scoped
        };

        let name = self.qualified_name(aliases)?;
        write!(w, "<{name}")?;

        for (ns, alias) in &self.declarations {
            match alias {
                Some(alias) => write!(w, " xmlns:{alias}=\"{}\"", escape(ns.url))?,
                None => write!(w, " xmlns=\"{}\"", escape(ns.url))?,
            }
        }

        for attribute in &self.attributes {
            attribute.ns_write(w, aliases)?;
        }

        match &self.content {
            Content::None => w.write_all(b"/>")?,
            Content::Text(value) => write!(w, ">{}</{name}>", escape(value))?,
            Content::Elements(children) => {
                w.write_all(b">")?;
                for child in children {
                    child.ns_write(w, aliases)?;
                }
                write!(w, "</{name}>")?;
            }
        }

        Ok(())
    }
}
