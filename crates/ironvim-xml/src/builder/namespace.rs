use core::fmt;

/// Represents a namespace in XML, identified by its URI only.
///
/// The prefix used on the wire is decided by the element that declares the
/// namespace, see [`crate::builder::Element::add_namespace_declaration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace<'a> {
    pub url: &'a str,
}

impl fmt::Display for Namespace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.url.fmt(f)
    }
}

impl<'a> Namespace<'a> {
    /// Creates a new instance of `Namespace` with the given URI.
    ///
    /// # Example
    ///
    /// ```
    /// use ironvim_xml::builder::Namespace;
    /// let namespace = Namespace::new("urn:vim25");
    /// assert_eq!(namespace.to_string(), "urn:vim25");
    /// ```
    pub const fn new(uri: &'a str) -> Self {
        Namespace { url: uri }
    }
}

impl<'a> From<&'a str> for Namespace<'a> {
    fn from(value: &'a str) -> Self {
        Namespace::new(value)
    }
}
