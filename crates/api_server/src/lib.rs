//! HTTP surface for the lpforge entity store.

pub mod error;
pub mod handlers;
pub mod logging;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;

use lpforge_model_store::{
    Constraint, DecisionVariable, ModelStore, ObjectiveFunction, Parameter, Set, StoredEntity,
};

pub use error::ApiError;

/// Builds the `/api` router over a connected store.
///
/// Any origin may call the API; browsers get permissive CORS headers.
pub fn router(store: ModelStore) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .merge(entity_routes::<Set>())
        .merge(entity_routes::<Parameter>())
        .merge(entity_routes::<DecisionVariable>())
        .merge(entity_routes::<Constraint>())
        .merge(entity_routes::<ObjectiveFunction>())
        .fallback(handlers::fallback)
        .layer(CorsLayer::permissive())
        .with_state(store)
}

fn entity_routes<E: StoredEntity>() -> Router<ModelStore> {
    let collection = format!("/api/{}", E::KIND.collection());
    let item = format!("{collection}/{{id}}");
    Router::new()
        .route(
            &collection,
            get(handlers::list::<E>).post(handlers::create::<E>),
        )
        .route(
            &item,
            get(handlers::read::<E>)
                .put(handlers::update::<E>)
                .delete(handlers::remove::<E>),
        )
}
