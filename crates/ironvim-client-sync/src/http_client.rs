use crate::{connection::HttpClient, tls::TrustPolicy};
use ironvim_client_core::connector::http::{HttpBody, HttpRequest, HttpResponse, Method};
use tracing::{debug, error, info, info_span, instrument};

/// Blocking HTTPS transport. One agent for the whole run, so the TLS
/// connection is reused across the three calls.
pub struct UreqHttpClient {
    agent: ureq::Agent,
}

impl UreqHttpClient {
    pub fn new(policy: &dyn TrustPolicy) -> anyhow::Result<Self> {
        let tls_connector = crate::tls::build_tls_connector(policy)?;
        let agent = ureq::AgentBuilder::new()
            .tls_connector(tls_connector)
            .build();

        Ok(UreqHttpClient { agent })
    }

    fn make_request(&self, request: &HttpRequest) -> Result<HttpResponse, anyhow::Error> {
        let span = info_span!("http.request", method=?request.method, url=%request.url);
        let _enter = span.enter();

        let mut ureq_request = match request.method {
            Method::Post => self.agent.post(&request.url),
        };

        for (name, value) in &request.headers {
            ureq_request = ureq_request.set(name, value);
        }

        if let Some(cookie) = &request.cookie {
            ureq_request = ureq_request.set("Cookie", cookie);
        }

        debug!(
            headers_count = request.headers.len(),
            has_cookie = request.cookie.is_some(),
            "request configured"
        );

        let response_result = match &request.body {
            Some(body) if !body.is_empty() => {
                debug!(body_length = body.len(), "sending with body");
                ureq_request.send_string(body.as_str())
            }
            _ => {
                debug!("sending without body");
                ureq_request.call()
            }
        };

        // SOAP faults arrive as 500, so a status error still carries a body worth reading
        let response = match response_result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                debug!(status, "received status response");
                response
            }
            Err(e) => {
                error!(error=%e, "request failed");
                return Err(e.into());
            }
        };

        let status_code = response.status();
        let headers = collect_headers(&response);
        let body = response.into_string().map_err(|e| {
            error!(error=%e, "failed to read response body");
            e
        })?;

        info!(status_code, response_body_length = body.len(), "response received");

        Ok(HttpResponse {
            status_code,
            headers,
            body: if body.is_empty() {
                HttpBody::None
            } else {
                HttpBody::Xml(body)
            },
        })
    }
}

/// Every header line, repeated names included; `Set-Cookie` usually repeats.
fn collect_headers(response: &ureq::Response) -> Vec<(String, String)> {
    let mut names = response.headers_names();
    names.sort_unstable();
    names.dedup();

    names
        .iter()
        .flat_map(|name| {
            response
                .all(name)
                .into_iter()
                .map(move |value| (name.clone(), value.to_string()))
        })
        .collect()
}

impl HttpClient for UreqHttpClient {
    #[instrument(name="http_client.send_request", level="info", skip(self, request), fields(method=?request.method, url=%request.url), err)]
    fn send_request(&self, request: HttpRequest) -> Result<HttpResponse, anyhow::Error> {
        self.make_request(&request)
    }
}
