// src/api.rs

//! Framework-neutral endpoint handlers.
//!
//! The surrounding web layer owns routing and access control; it hands the
//! raw `domain` query parameter to these functions and writes the returned
//! status code and JSON body back to the client. A missing or empty domain
//! is a client error, a failed base resolution is a server error, and every
//! other probe-level failure is already folded into the report itself.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{error, warn};
use url::Url;

use crate::core::resolver::DnsResolve;
use crate::core::scanner::{ScanError, run_blacklist_scan, run_health_scan};

/// Status code and JSON body for the web layer to emit.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            body: json!({ "error": message }),
        }
    }

    fn server_error(message: String) -> Self {
        Self {
            status: 500,
            body: json!({ "error": message }),
        }
    }
}

const MISSING_DOMAIN: &str = "Missing required query parameter: domain";

/// `GET`-style blacklist check for the `domain` query parameter.
pub async fn blacklist_endpoint(
    resolver: Arc<dyn DnsResolve>,
    domain: Option<&str>,
) -> ApiResponse {
    let Some(target) = normalized_target(domain) else {
        return ApiResponse::bad_request(MISSING_DOMAIN);
    };

    match run_blacklist_scan(resolver, &target).await {
        Ok(report) => into_json(&report),
        Err(ScanError::EmptyDomain) => ApiResponse::bad_request(MISSING_DOMAIN),
        Err(err @ ScanError::BaseResolution { .. }) => {
            warn!(domain = %target, error = %err, "Blacklist scan failed.");
            ApiResponse::server_error(format!("Could not resolve domain {target}"))
        }
    }
}

/// `GET`-style health check for the `domain` query parameter.
pub async fn health_endpoint(resolver: Arc<dyn DnsResolve>, domain: Option<&str>) -> ApiResponse {
    let Some(target) = normalized_target(domain) else {
        return ApiResponse::bad_request(MISSING_DOMAIN);
    };

    match run_health_scan(resolver.as_ref(), &target).await {
        Ok(report) => into_json(&report),
        Err(ScanError::EmptyDomain) => ApiResponse::bad_request(MISSING_DOMAIN),
        Err(err) => {
            error!(domain = %target, error = %err, "Health scan failed.");
            ApiResponse::server_error(format!("Health check failed for {target}"))
        }
    }
}

fn into_json<T: serde::Serialize>(report: &T) -> ApiResponse {
    match serde_json::to_value(report) {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => {
            error!(error = %err, "Failed to serialize report.");
            ApiResponse::server_error("Internal serialization error".to_string())
        }
    }
}

/// Accepts either a bare domain or a full URL and reduces it to a host
/// name. Returns `None` for missing or blank input.
fn normalized_target(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let host = Url::parse(&with_scheme)
        .ok()
        .and_then(|url| url.host_str().map(String::from))
        .unwrap_or_else(|| trimmed.to_string());
    Some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::blacklists::REGISTRY;
    use crate::core::resolver::mock::{MockResolver, a_record};
    use crate::core::resolver::RecordKind;

    #[test]
    fn normalizes_urls_to_hosts() {
        assert_eq!(
            normalized_target(Some("https://example.com/path?q=1")).as_deref(),
            Some("example.com")
        );
        assert_eq!(
            normalized_target(Some("example.com")).as_deref(),
            Some("example.com")
        );
        assert_eq!(normalized_target(Some("   ")), None);
        assert_eq!(normalized_target(None), None);
    }

    #[tokio::test]
    async fn missing_domain_is_a_client_error() {
        let resolver: Arc<dyn DnsResolve> = Arc::new(MockResolver::new());
        let response = blacklist_endpoint(Arc::clone(&resolver), None).await;
        assert_eq!(response.status, 400);
        assert!(response.body["error"].is_string());

        let response = health_endpoint(resolver, Some("")).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn unresolvable_domain_is_a_server_error() {
        let resolver: Arc<dyn DnsResolve> = Arc::new(MockResolver::new());
        let response = blacklist_endpoint(resolver, Some("no-such-host.invalid")).await;
        assert_eq!(response.status, 500);
        assert!(response.body["error"].is_string());
    }

    #[tokio::test]
    async fn successful_blacklist_scan_returns_full_report() {
        let resolver: Arc<dyn DnsResolve> = Arc::new(MockResolver::new().answer(
            "example.com",
            RecordKind::A,
            vec![a_record([1, 2, 3, 4], 300)],
        ));
        let response = blacklist_endpoint(resolver, Some("https://example.com/contact")).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body["domain"], "example.com");
        assert_eq!(response.body["ip"], "1.2.3.4");
        assert_eq!(response.body["totalChecked"], REGISTRY.len());
        assert_eq!(
            response.body["results"].as_array().unwrap().len(),
            REGISTRY.len()
        );
    }

    #[tokio::test]
    async fn successful_health_scan_returns_summary() {
        let resolver: Arc<dyn DnsResolve> = Arc::new(MockResolver::new().answer(
            "example.com",
            RecordKind::A,
            vec![a_record([1, 2, 3, 4], 300)],
        ));
        let response = health_endpoint(resolver, Some("example.com")).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.body["domain"], "example.com");
        assert_eq!(response.body["summary"]["status"], "Critical");
        assert!(response.body["results"].is_array());
    }
}
