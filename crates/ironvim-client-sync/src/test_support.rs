use std::{cell::RefCell, collections::VecDeque};

use ironvim_client_core::{
    connector::http::{HttpBody, HttpRequest, HttpResponse, ServerAddress},
    Credentials, TransportSecurity, VimConfig,
};

use crate::connection::HttpClient;

pub const SERVICE_CONTENT: &str =
    include_str!("../tests/resources/retrieve_service_content_esxi.xml");
pub const LOGIN_RESPONSE: &str = include_str!("../tests/resources/login_response.xml");
pub const LOGOUT_RESPONSE: &str = include_str!("../tests/resources/logout_response.xml");
pub const INVALID_LOGIN_FAULT: &str = include_str!("../tests/resources/invalid_login_fault.xml");
pub const NOT_AUTHENTICATED_FAULT: &str =
    include_str!("../tests/resources/not_authenticated_fault.xml");

/// Replays canned replies in order and records every request it was handed.
#[derive(Default)]
pub struct ScriptedClient {
    replies: RefCell<VecDeque<anyhow::Result<HttpResponse>>>,
    sent: RefCell<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: impl IntoIterator<Item = anyhow::Result<HttpResponse>>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            sent: RefCell::default(),
        }
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn sent_methods(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|request| {
                let body = request.body.as_ref().map(HttpBody::as_str).unwrap_or_default();
                ["RetrieveServiceContent", "Login", "Logout"]
                    .into_iter()
                    .find(|name| body.contains(&format!("<{name} ")) || body.contains(&format!("<{name}>")))
                    .unwrap_or("?")
                    .to_string()
            })
            .collect()
    }
}

impl HttpClient for ScriptedClient {
    fn send_request(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        self.sent.borrow_mut().push(request);
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted reply left")))
    }
}

pub fn soap_reply(status_code: u16, body: &str) -> anyhow::Result<HttpResponse> {
    Ok(HttpResponse {
        status_code,
        headers: vec![(
            "Set-Cookie".to_string(),
            "vmware_soap_session=\"7c1e2d3f4a5b\"; Path=/; HttpOnly; Secure;".to_string(),
        )],
        body: HttpBody::Xml(body.to_string()),
    })
}

pub fn config() -> VimConfig {
    VimConfig::builder()
        .server(ServerAddress::parse("203.0.113.5").unwrap())
        .credentials(Credentials::new("admin", "wrongpass"))
        .transport(TransportSecurity::InsecureAcceptAnyCertificate)
        .build()
}
