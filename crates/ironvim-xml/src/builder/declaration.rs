/// Represents an XML declaration.
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    version: &'a str,
    encoding: &'a str,
    standalone: Option<bool>,
}

impl<'a> Declaration<'a> {
    /// Creates a new instance of `Declaration` with the given version and encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use ironvim_xml::builder::Declaration;
    /// let declaration = Declaration::new("1.0", "UTF-8");
    /// assert_eq!(declaration.to_string(), r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    /// ```
    pub fn new(version: &'a str, encoding: &'a str) -> Self {
        Declaration {
            version,
            encoding,
            standalone: None,
        }
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = Some(standalone);
        self
    }

    pub fn write<W: std::io::Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, "{self}")
    }
}

impl std::fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            r#"<?xml version="{}" encoding="{}""#,
            self.version, self.encoding
        )?;

        if let Some(standalone) = self.standalone {
            let standalone = if standalone { "yes" } else { "no" };
            write!(f, r#" standalone="{standalone}""#)?;
        }

        write!(f, "?>")
    }
}
