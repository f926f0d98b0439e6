pub mod builder;
pub mod parser;

#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    #[error("Invalid XML: {0}")]
    ParserError(#[from] crate::parser::Error),

    #[error("XML Builder error: {0}")]
    BuilderError(#[from] crate::builder::XmlBuilderError),

    #[error("Invalid namespace: expected '{expected}', found '{found:?}'")]
    XmlInvalidNamespace {
        expected: String,
        found: Option<String>,
    },

    #[error("Invalid tag: expected '{expected}', found '{found}'")]
    XmlInvalidTag { expected: String, found: String },

    #[error("Missing element <{name}> under <{parent}>")]
    MissingElement { parent: String, name: String },

    #[error("Invalid XML: {0}")]
    InvalidXml(String),
}
