//! A small XML writer for SOAP request documents.
//!
//! Elements are assembled with a fluent API and written in one pass. Namespace
//! prefixes are resolved while writing from the declarations found on the
//! element and its ancestors.
mod attribute;
mod declaration;
mod document;
mod element;
mod namespace;

use std::borrow::Cow;
use std::collections::HashMap;

pub use self::attribute::*;
pub use self::declaration::*;
pub use self::document::*;
pub use self::element::*;
pub use self::namespace::*;

/// Namespace to prefix mapping in scope while writing; `None` is the default namespace.
pub type AliasMap<'a> = HashMap<Namespace<'a>, Option<&'a str>>;

#[derive(Debug, thiserror::Error)]
pub enum XmlBuilderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("Namespace '{ns}' not declared for tag '{tag}'")]
    NamespaceNotDeclared { tag: String, ns: String },
    #[error("Namespace '{ns}' has no alias for tag '{tag}'")]
    NamespaceHasNoAlias { tag: String, ns: String },
}

pub trait NamespaceWrite<'a> {
    fn ns_write<W: std::io::Write>(
        &self,
        w: &mut W,
        aliases: &AliasMap<'a>,
    ) -> Result<(), XmlBuilderError>;
}

/// Escapes the five predefined XML entities.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
