use std::{fmt::Display, net::IpAddr};

use crate::{VimCoreError, connector::cookie::SessionCookies};

pub const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAddress {
    Ip(IpAddr),
    /// Host name, optionally followed by `:port`.
    Domain(String),
}

impl ServerAddress {
    pub fn parse(value: &str) -> Result<Self, VimCoreError> {
        let value = value.trim();
        if let Ok(ip) = value.parse::<IpAddr>() {
            Ok(ServerAddress::Ip(ip))
        } else if !value.is_empty() {
            Ok(ServerAddress::Domain(value.to_string()))
        } else {
            Err(VimCoreError::InvalidServerAddress(
                "server address cannot be empty",
            ))
        }
    }

    /// Host as it appears in a URL; IPv6 literals are bracketed.
    pub fn url_host(&self) -> String {
        match self {
            ServerAddress::Ip(IpAddr::V6(ip)) => format!("[{ip}]"),
            ServerAddress::Ip(ip) => ip.to_string(),
            ServerAddress::Domain(domain) => domain.clone(),
        }
    }
}

impl Display for ServerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerAddress::Ip(ip) => write!(f, "{ip}"),
            ServerAddress::Domain(domain) => write!(f, "{domain}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpBody {
    Xml(String),
    None,
}

impl HttpBody {
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            HttpBody::Xml(_) => Some(SOAP_CONTENT_TYPE),
            HttpBody::None => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the body content in bytes
    pub fn len(&self) -> usize {
        match self {
            HttpBody::Xml(content) => content.len(),
            HttpBody::None => 0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpBody::Xml(content) => content,
            HttpBody::None => "",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<HttpBody>,
    /// Value for the `Cookie` header, sent as-is by the transport.
    pub cookie: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: HttpBody,
}

impl HttpResponse {
    /// All values of a header, case-insensitively; `Set-Cookie` may repeat.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Builds SOAP 1.1 POSTs against the one endpoint a connector is bound to.
#[derive(Debug)]
pub struct HttpBuilder {
    pub(crate) url: String,
    pub(crate) soap_action: String,
    pub(crate) cookies: SessionCookies,
}

impl HttpBuilder {
    pub fn new(url: String, soap_action: String) -> Self {
        Self {
            url,
            soap_action,
            cookies: SessionCookies::default(),
        }
    }

    fn build_headers(&self, body: &HttpBody) -> Vec<(String, String)> {
        let mut headers = vec![("SOAPAction".to_string(), self.soap_action.clone())];

        if let Some(content_type) = body.content_type() {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
        }

        headers
    }

    pub fn post(&self, body: HttpBody) -> HttpRequest {
        HttpRequest {
            method: Method::Post,
            url: self.url.clone(),
            headers: self.build_headers(&body),
            body: Some(body),
            cookie: self.cookies.header_value(),
        }
    }
}
