//! GraphQL HTTP server.

use std::future::Future;

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptyMutation, EmptySubscription, ObjectType, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{extract::State, response::{Html, IntoResponse}, routing::get, Router};
use tracing::debug;

use crate::pagination::with_total_count_cache;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_playground: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            enable_playground: true,
        }
    }
}

/// Routes for `/graphql`, `/health` and, when enabled, the GraphiQL UI at `/`.
pub fn router<Q>(
    schema: Schema<Q, EmptyMutation, EmptySubscription>,
    config: &ServerConfig,
) -> Router
where
    Q: ObjectType + 'static,
{
    let mut app = Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler::<Q>))
        .route("/health", get(health_check))
        .with_state(schema);

    if config.enable_playground {
        app = app.route("/", get(graphql_playground));
    }

    app
}

/// Start the GraphQL server with graceful shutdown support.
pub async fn serve_with_shutdown<Q, F>(
    schema: Schema<Q, EmptyMutation, EmptySubscription>,
    config: ServerConfig,
    shutdown_signal: F,
) -> Result<(), std::io::Error>
where
    Q: ObjectType + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(schema, &config);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    debug!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

/// GraphQL query handler. Each operation gets its own total count cache.
async fn graphql_handler<Q>(
    State(schema): State<Schema<Q, EmptyMutation, EmptySubscription>>,
    req: GraphQLRequest,
) -> GraphQLResponse
where
    Q: ObjectType + 'static,
{
    schema
        .execute(with_total_count_cache(req.into_inner()))
        .await
        .into()
}

/// GraphQL Playground UI.
async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
