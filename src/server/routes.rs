//! HTTP routes for the gateway.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::extract::State;
use axum::http::{HeaderValue, Method, header};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::schema::ChatSchema;
use super::ServerError;
use crate::config::AppConfig;

#[derive(Clone)]
struct GatewayState {
    schema: ChatSchema,
    subscriptions_url: String,
}

/// Create the gateway router: `/graphql`, `/graphiql` and the
/// `/subscriptions` WebSocket upgrade.
pub fn create_router(schema: ChatSchema, config: &AppConfig) -> Result<Router, ServerError> {
    let cors = build_cors_layer(&config.origin())?;

    let state = GatewayState {
        schema: schema.clone(),
        subscriptions_url: config.subscriptions_url(),
    };

    Ok(Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphiql", get(graphiql_handler))
        .route_service("/subscriptions", GraphQLSubscription::new(schema))
        .layer(cors)
        .with_state(state))
}

/// Only the server's own origin may call it cross-origin.
fn build_cors_layer(origin: &str) -> Result<CorsLayer, ServerError> {
    let origin = HeaderValue::from_str(origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}

async fn graphql_handler(State(state): State<GatewayState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphiql_handler(State(state): State<GatewayState>) -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint(&state.subscriptions_url)
            .finish(),
    )
}
