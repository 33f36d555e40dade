//! CORS policy for browser clients.
//!
//! Policy:
//! - Any origin, any method, any header, credentials allowed, in every environment.
//!
//! `Any` (`*`) cannot be combined with `allow_credentials(true)`; tower-http
//! panics on that. Mirroring the request's origin, method and headers gives the
//! same effective policy with credentials.

use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Apply the permissive CORS policy to the given Router.
pub fn apply(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
