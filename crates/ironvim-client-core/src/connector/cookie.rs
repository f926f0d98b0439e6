//! Session cookie continuity.
//!
//! The vim25 endpoint identifies the login session by the
//! `vmware_soap_session` cookie; every call made after `RetrieveServiceContent`
//! must replay it or the server treats the call as a new anonymous session.

use tracing::debug;

pub const VMWARE_SESSION_COOKIE: &str = "vmware_soap_session";

/// Cookies set by the server, replayed on every following request.
#[derive(Debug, Clone, Default)]
pub struct SessionCookies {
    cookies: Vec<(String, String)>,
}

impl SessionCookies {
    /// Stores the `name=value` pair of one `Set-Cookie` header; attributes are ignored.
    /// A cookie with the same name is replaced.
    pub fn store(&mut self, set_cookie: &str) -> bool {
        let pair = set_cookie.split(';').next().unwrap_or_default();
        let Some((name, value)) = pair.split_once('=') else {
            return false;
        };

        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let value = value.trim();

        debug!(cookie = name, "storing cookie");
        match self.cookies.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.cookies.push((name.to_string(), value.to_string())),
        }
        true
    }

    /// Stores every `Set-Cookie` value, returns how many were accepted.
    pub fn absorb<'a>(&mut self, set_cookies: impl IntoIterator<Item = &'a str>) -> usize {
        set_cookies
            .into_iter()
            .filter(|set_cookie| self.store(set_cookie))
            .count()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_session(&self) -> bool {
        self.get(VMWARE_SESSION_COOKIE).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Value of the `Cookie` request header, `None` before the first cookie arrives.
    pub fn header_value(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let header = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_keeps_only_name_value_pair() {
        let mut cookies = SessionCookies::default();

        assert!(cookies.store(
            "vmware_soap_session=\"b2c5e1f0d3a4\"; Path=/; HttpOnly; Secure;"
        ));
        assert!(cookies.has_session());
        assert_eq!(
            cookies.header_value().as_deref(),
            Some("vmware_soap_session=\"b2c5e1f0d3a4\"")
        );
    }

    #[test]
    fn test_same_name_replaces_and_order_is_kept() {
        let mut cookies = SessionCookies::default();

        let accepted = cookies.absorb(["a=1", "vmware_soap_session=old", "vmware_soap_session=new"]);

        assert_eq!(accepted, 3);
        assert_eq!(cookies.get(VMWARE_SESSION_COOKIE), Some("new"));
        assert_eq!(
            cookies.header_value().as_deref(),
            Some("a=1; vmware_soap_session=new")
        );
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let mut cookies = SessionCookies::default();

        assert_eq!(cookies.absorb(["no-equals-sign", "=orphan", ""]), 0);
        assert!(cookies.is_empty());
        assert!(cookies.header_value().is_none());
    }
}
