use ironvim_xml::{builder::Element, parser::Node};

use crate::{ManagedObjectReference, SoapError, methods::VimMethod};

/// `SessionManager.Logout`; ends the session named by the request cookie.
#[derive(Debug, Clone)]
pub struct Logout {
    pub this: ManagedObjectReference,
}

impl VimMethod for Logout {
    const NAME: &'static str = "Logout";

    type Output = ();

    fn parameters(&self) -> Vec<Element<'_>> {
        vec![self.this.to_element("_this")]
    }

    fn decode(_returnval: Option<Node<'_, '_>>) -> Result<Self::Output, SoapError> {
        Ok(())
    }
}
