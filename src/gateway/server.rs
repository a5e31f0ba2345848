//! Router Construction and Serve Loop
//!
//! The routing table is declarative: one row per (method, path) with its
//! protection level, built once at startup and iterated to assemble the axum
//! `Router`. Cross-origin headers are stamped on every response and OPTIONS
//! requests short-circuit before routing, matching what admin UIs expect from
//! the control plane.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put, MethodRouter};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, info};

use crate::query::{QueryParser, SeriesWriter};
use crate::store::ResourceStore;

use super::auth;
use super::config::GatewayConfig;
use super::{
    database_routes, node_routes, retention_routes, series_routes, shard_routes, user_routes,
};

/// Shared state injected into all handlers. Built once before serving;
/// read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub store: Arc<dyn ResourceStore>,
    pub parser: Arc<dyn QueryParser>,
    pub writer: Arc<dyn SeriesWriter>,
}

/// How a route relates to the authentication gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Protection {
    /// No gate at all
    Open,
    /// Wrapped by the authentication gate
    Gated,
    /// Gate applied inside the handler, after the bootstrap rule
    Bootstrap,
}

/// One row of the routing table.
struct RouteSpec {
    method: Method,
    path: &'static str,
    service: MethodRouter<AppState>,
    protection: Protection,
}

impl RouteSpec {
    fn new(
        method: Method,
        path: &'static str,
        service: MethodRouter<AppState>,
        protection: Protection,
    ) -> Self {
        Self {
            method,
            path,
            service,
            protection,
        }
    }
}

#[rustfmt::skip]
fn route_table() -> Vec<RouteSpec> {
    use Protection::{Bootstrap, Gated, Open};
    vec![
        // Authentication route (reserved no-op)
        RouteSpec::new(Method::GET, "/authenticate", get(user_routes::authenticate), Open),

        // User routes; create-user carries the bootstrap exception
        RouteSpec::new(Method::GET, "/users", get(user_routes::list_users), Gated),
        RouteSpec::new(Method::POST, "/users", post(user_routes::create_user), Bootstrap),
        RouteSpec::new(Method::PUT, "/users/:user", put(user_routes::update_user), Gated),
        RouteSpec::new(Method::DELETE, "/users/:user", delete(user_routes::delete_user), Gated),

        // Database routes
        RouteSpec::new(Method::GET, "/db", get(database_routes::list_databases), Gated),
        RouteSpec::new(Method::POST, "/db", post(database_routes::create_database), Gated),
        RouteSpec::new(Method::DELETE, "/db/:name", delete(database_routes::delete_database), Gated),

        // Series routes
        RouteSpec::new(Method::GET, "/db/:db/series", get(series_routes::query_series), Gated),
        RouteSpec::new(Method::POST, "/db/:db/series", post(series_routes::write_series), Gated),

        // Shard routes
        RouteSpec::new(Method::GET, "/db/:db/shards", get(shard_routes::list_shards), Gated),
        RouteSpec::new(Method::DELETE, "/db/:db/shards/:id", delete(shard_routes::delete_shard), Gated),

        // Retention policy routes
        RouteSpec::new(Method::GET, "/db/:db/retention_policies", get(retention_routes::list_retention_policies), Gated),
        RouteSpec::new(Method::POST, "/db/:db/retention_policies", post(retention_routes::create_retention_policy), Gated),
        RouteSpec::new(Method::PUT, "/db/:db/retention_policies/:name", put(retention_routes::update_retention_policy), Gated),
        RouteSpec::new(Method::DELETE, "/db/:db/retention_policies/:name", delete(retention_routes::delete_retention_policy), Gated),

        // Data node routes
        RouteSpec::new(Method::GET, "/data_nodes", get(node_routes::list_data_nodes), Gated),
        RouteSpec::new(Method::POST, "/data_nodes", post(node_routes::create_data_node), Gated),
        RouteSpec::new(Method::DELETE, "/data_nodes/:id", delete(node_routes::delete_data_node), Gated),

        // Utilities
        RouteSpec::new(Method::GET, "/ping", get(node_routes::ping), Gated),
    ]
}

/// Build the router from the routing table.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new();
    for spec in route_table() {
        debug!(method = %spec.method, path = spec.path, protection = ?spec.protection, "route registered");
        let service = match spec.protection {
            Protection::Gated => spec
                .service
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth)),
            Protection::Open | Protection::Bootstrap => spec.service,
        };
        router = router.route(spec.path, service);
    }

    let version = HeaderValue::from_str(&state.config.version)
        .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
    router
        .layer(middleware::from_fn(cross_origin_headers))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-nimbusdb-version"),
            version,
        ))
        .with_state(state)
}

/// Stamp cross-origin headers on every response; OPTIONS requests
/// short-circuit with 200 before any routing or authentication happens.
async fn cross_origin_headers(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(
        "access-control-allow-origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "access-control-max-age",
        HeaderValue::from_static("2592000"),
    );
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET, POST, PUT, DELETE"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Origin, X-Requested-With, Content-Type, Accept"),
    );
    response
}

/// The admin gateway HTTP server.
pub struct AdminServer {
    config: Arc<GatewayConfig>,
    router: Router,
}

impl AdminServer {
    /// Assemble the server from its collaborators.
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn ResourceStore>,
        parser: Arc<dyn QueryParser>,
        writer: Arc<dyn SeriesWriter>,
    ) -> Self {
        let config = Arc::new(config);
        let router = build_router(AppState {
            config: config.clone(),
            store,
            parser,
            writer,
        });
        Self { config, router }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is terminated.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address: {e}"),
            )
        })?;

        info!(
            addr = %addr,
            auth_enabled = self.config.auth_enabled,
            version = %self.config.version,
            "starting admin gateway"
        );
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}
