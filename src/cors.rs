//! The cross-origin policy for the budgeting dashboard.

use axum::http::{HeaderValue, request::Parts};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// The origins that browsers may call the API from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// The exact origin of the local development server, e.g.
    /// "http://localhost:5173".
    pub dev_origin: String,
    /// Any HTTPS subdomain of this domain is allowed, e.g. "vercel.app".
    pub deploy_domain: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            dev_origin: "http://localhost:5173".to_owned(),
            deploy_domain: "vercel.app".to_owned(),
        }
    }
}

impl CorsConfig {
    /// Whether a request from `origin` may read responses.
    pub fn allows(&self, origin: &str) -> bool {
        if origin == self.dev_origin {
            return true;
        }

        origin
            .strip_prefix("https://")
            .and_then(|host| host.strip_suffix(&self.deploy_domain))
            .and_then(|subdomain| subdomain.strip_suffix('.'))
            .is_some_and(|subdomain| !subdomain.is_empty())
    }
}

/// Build the CORS layer for `config`.
///
/// Credentials are allowed, so methods and headers mirror the preflight
/// request instead of using a wildcard.
pub fn cors_layer(config: CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| config.allows(origin))
            },
        ))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}


#[cfg(test)]
mod cors_layer_tests {
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;

    use crate::{build_router, endpoints, test_utils::must_create_test_state};

    use super::{CorsConfig, cors_layer};

    fn server() -> TestServer {
        let router =
            build_router(must_create_test_state()).layer(cors_layer(CorsConfig::default()));

        TestServer::try_new(router).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed_with_credentials() {
        let response = server()
            .get(endpoints::HEALTH)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://my-budget.vercel.app"),
            )
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.header("access-control-allow-origin"),
            "https://my-budget.vercel.app"
        );
        assert_eq!(response.header("access-control-allow-credentials"), "true");
    }

    #[tokio::test]
    async fn preflight_mirrors_requested_method() {
        let response = server()
            .method(axum::http::Method::OPTIONS, endpoints::CREATE_EXPENSE)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://localhost:5173"),
            )
            .add_header(
                HeaderName::from_static("access-control-request-method"),
                HeaderValue::from_static("POST"),
            )
            .await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.header("access-control-allow-methods"), "POST");
    }

    #[tokio::test]
    async fn other_origins_get_no_cors_headers() {
        let response = server()
            .get(endpoints::HEALTH)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("https://example.com"),
            )
            .await;

        response.assert_status_ok();
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }
}
