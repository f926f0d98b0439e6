use ironvim_xml::{
    builder::Element,
    parser::{Node, NodeExt},
};

use crate::{ManagedObjectReference, SoapError, methods::VimMethod};

/// `RetrieveServiceContent` on the `ServiceInstance`; needs no session.
#[derive(Debug, Clone)]
pub struct RetrieveServiceContent {
    pub this: ManagedObjectReference,
}

impl Default for RetrieveServiceContent {
    fn default() -> Self {
        Self {
            this: ManagedObjectReference::service_instance(),
        }
    }
}

/// Product information from `ServiceContent.about`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub name: Option<String>,
    pub full_name: String,
    pub vendor: Option<String>,
    pub version: String,
    pub build: Option<String>,
    pub os_type: Option<String>,
    pub product_line_id: Option<String>,
    /// `VirtualCenter` or `HostAgent`.
    pub api_type: String,
    pub api_version: Option<String>,
    pub instance_uuid: Option<String>,
}

impl AboutInfo {
    fn from_node(node: Node<'_, '_>) -> Result<Self, SoapError> {
        let optional = |name: &str| node.child_text(name).map(str::to_string);

        Ok(Self {
            name: optional("name"),
            full_name: node.required_text("fullName")?.to_string(),
            vendor: optional("vendor"),
            version: node.required_text("version")?.to_string(),
            build: optional("build"),
            os_type: optional("osType"),
            product_line_id: optional("productLineId"),
            api_type: node.required_text("apiType")?.to_string(),
            api_version: optional("apiVersion"),
            instance_uuid: optional("instanceUuid"),
        })
    }
}

/// The service descriptor. Only the references this client uses are kept.
#[derive(Debug, Clone)]
pub struct ServiceContent {
    pub about: AboutInfo,
    /// Absent when the caller is not allowed to log in at all.
    pub session_manager: Option<ManagedObjectReference>,
    pub root_folder: Option<ManagedObjectReference>,
    pub property_collector: Option<ManagedObjectReference>,
}

impl VimMethod for RetrieveServiceContent {
    const NAME: &'static str = "RetrieveServiceContent";

    type Output = ServiceContent;

    fn parameters(&self) -> Vec<Element<'_>> {
        vec![self.this.to_element("_this")]
    }

    fn decode(returnval: Option<Node<'_, '_>>) -> Result<Self::Output, SoapError> {
        let returnval = super::require_returnval(returnval, Self::NAME)?;

        let reference = |name: &str| {
            returnval
                .child(name)
                .map(ManagedObjectReference::from_node)
                .transpose()
        };

        Ok(ServiceContent {
            about: AboutInfo::from_node(returnval.required_child("about")?)?,
            session_manager: reference("sessionManager")?,
            root_folder: reference("rootFolder")?,
            property_collector: reference("propertyCollector")?,
        })
    }
}
