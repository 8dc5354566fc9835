//! Generic CRUD handlers, instantiated once per entity kind.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;
use lpforge_model_store::{
    Action, EntityApi, Envelope, ErrorEnvelope, ModelError, ModelStore, StoredEntity,
};

pub type ApiResult = Result<Response, ApiError>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
    pub backend: &'static str,
}

pub async fn health(State(store): State<ModelStore>) -> Response {
    match store.ping().await {
        Ok(()) => Json(Envelope::ok(Health {
            ok: true,
            backend: store.backend_name(),
        }))
        .into_response(),
        Err(err) => {
            log::error!("api: health check failed: {err}");
            let envelope = ErrorEnvelope {
                success: false,
                error: "Database unavailable".to_string(),
                details: Some(err.message().to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response()
        }
    }
}

pub async fn fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new("Route not found")),
    )
        .into_response()
}

fn respond<E: StoredEntity, T: Serialize>(status: StatusCode, action: Action, data: T) -> Response {
    (status, Json(Envelope::for_action(E::KIND, action, data))).into_response()
}

fn fail<E: StoredEntity>(action: Action) -> impl FnOnce(ModelError) -> ApiError {
    move |err| ApiError::new(E::KIND, action, err)
}

// Ids that are not integers can never name a row.
fn parse_id<E: StoredEntity>(raw: &str, action: Action) -> Result<i64, ApiError> {
    raw.trim().parse::<i64>().map_err(|_| {
        ApiError::new(
            E::KIND,
            action,
            ModelError::not_found(format!("{} not found", E::KIND.label())),
        )
    })
}

fn body<E: StoredEntity>(
    payload: Result<Json<E::Input>, JsonRejection>,
    action: Action,
) -> Result<E::Input, ApiError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::rejected_body(E::KIND, action, rejection))
}

pub async fn list<E: StoredEntity>(State(store): State<ModelStore>) -> ApiResult {
    let entities = store
        .service::<E>()
        .list()
        .await
        .map_err(fail::<E>(Action::List))?;
    Ok(respond::<E, _>(StatusCode::OK, Action::List, entities))
}

pub async fn read<E: StoredEntity>(
    State(store): State<ModelStore>,
    Path(raw_id): Path<String>,
) -> ApiResult {
    let id = parse_id::<E>(&raw_id, Action::Read)?;
    let entity = store
        .service::<E>()
        .get(id)
        .await
        .map_err(fail::<E>(Action::Read))?;
    Ok(respond::<E, _>(StatusCode::OK, Action::Read, entity))
}

pub async fn create<E: StoredEntity>(
    State(store): State<ModelStore>,
    payload: Result<Json<E::Input>, JsonRejection>,
) -> ApiResult {
    let input = body::<E>(payload, Action::Create)?;
    let entity = store
        .service::<E>()
        .create(input)
        .await
        .map_err(fail::<E>(Action::Create))?;
    Ok(respond::<E, _>(StatusCode::CREATED, Action::Create, entity))
}

pub async fn update<E: StoredEntity>(
    State(store): State<ModelStore>,
    Path(raw_id): Path<String>,
    payload: Result<Json<E::Input>, JsonRejection>,
) -> ApiResult {
    let id = parse_id::<E>(&raw_id, Action::Update)?;
    let input = body::<E>(payload, Action::Update)?;
    let entity = store
        .service::<E>()
        .update(id, input)
        .await
        .map_err(fail::<E>(Action::Update))?;
    Ok(respond::<E, _>(StatusCode::OK, Action::Update, entity))
}

pub async fn remove<E: StoredEntity>(
    State(store): State<ModelStore>,
    Path(raw_id): Path<String>,
) -> ApiResult {
    let id = parse_id::<E>(&raw_id, Action::Delete)?;
    let entity = store
        .service::<E>()
        .delete(id)
        .await
        .map_err(fail::<E>(Action::Delete))?;
    Ok(respond::<E, _>(StatusCode::OK, Action::Delete, entity))
}
