use std::fmt;

use ironvim_xml::{
    builder::Element,
    parser::{Node, NodeExt},
};

use crate::{ManagedObjectReference, SoapError, methods::VimMethod, namespaces::VIM25};

/// `SessionManager.Login`.
#[derive(Clone, typed_builder::TypedBuilder)]
pub struct Login {
    pub this: ManagedObjectReference,
    #[builder(setter(into))]
    pub user_name: String,
    #[builder(setter(into))]
    pub password: String,
    /// Omitted from the request when `None`; the server then uses its default locale.
    #[builder(default, setter(into, strip_option))]
    pub locale: Option<String>,
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login")
            .field("this", &self.this)
            .field("user_name", &self.user_name)
            .field("password", &"<redacted>")
            .field("locale", &self.locale)
            .finish()
    }
}

/// The `UserSession` returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    pub key: String,
    pub user_name: String,
    pub full_name: Option<String>,
    pub login_time: Option<String>,
}

impl VimMethod for Login {
    const NAME: &'static str = "Login";

    type Output = UserSession;

    fn parameters(&self) -> Vec<Element<'_>> {
        let mut parameters = vec![
            self.this.to_element("_this"),
            text_element("userName", &self.user_name),
            text_element("password", &self.password),
        ];
        if let Some(locale) = &self.locale {
            parameters.push(text_element("locale", locale));
        }
        parameters
    }

    fn decode(returnval: Option<Node<'_, '_>>) -> Result<Self::Output, SoapError> {
        let returnval = super::require_returnval(returnval, Self::NAME)?;

        Ok(UserSession {
            key: returnval.required_text("key")?.to_string(),
            user_name: returnval.required_text("userName")?.to_string(),
            full_name: returnval.child_text("fullName").map(str::to_string),
            login_time: returnval.child_text("loginTime").map(str::to_string),
        })
    }
}

fn text_element<'a>(name: &'a str, value: &'a str) -> Element<'a> {
    Element::new(name).set_namespace(VIM25).set_text(value)
}
