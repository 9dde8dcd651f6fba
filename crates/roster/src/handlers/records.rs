//! Catalog CRUD handlers.
//!
//! Every handler is shared by both catalogs; the router attaches the
//! [`Catalog`] as a request extension.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde_json::{json, Map, Value};

use roster_core::catalog::{Catalog, PathLookup, Record};

use crate::{
    handlers::{error::json_object, AppError},
    state::AppState,
};

/// Body of a successful delete.
fn deleted_response(catalog: Catalog, record: &Record) -> Json<Value> {
    let store = record.store();
    let mut body = json!({
        "mensaje": format!("Personaje eliminado exitosamente de {store}"),
        "id": record.id,
        "database": store,
    });
    body[catalog.deleted_key()] = json!(record);
    Json(body)
}

/// List every record of a catalog (GET /hunters, GET /caballeros).
pub async fn list_records(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
) -> Result<Json<Vec<Record>>, AppError> {
    let records = state.resolver(catalog).list().await?;
    Ok(Json(records))
}

/// Fetch a single record (GET /hunter/{key}, GET /caballero/{key}).
///
/// Hunters are addressed by identifier, caballeros by name.
pub async fn get_record(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    Path(key): Path<String>,
) -> Result<Json<Record>, AppError> {
    let resolver = state.resolver(catalog);
    let record = match catalog.path_lookup() {
        PathLookup::ById => resolver.get(&key).await?,
        PathLookup::ByName => resolver.find_by_name(&key).await?,
    };
    Ok(Json(record))
}

/// Fetch a record by name (GET /{singular}/byname/{nombre}).
pub async fn get_record_by_name(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    Path(name): Path<String>,
) -> Result<Json<Record>, AppError> {
    let record = state.resolver(catalog).find_by_name(&name).await?;
    Ok(Json(record))
}

/// Create a record in the store named by `database` (POST /{singular}).
pub async fn create_record(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_object(payload)?;
    let record = state.resolver(catalog).create(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "mensaje": "Personaje creado exitosamente",
            "database": record.store(),
            "data": record,
        })),
    ))
}

/// Partially update a record (PUT /{singular}/{id}).
pub async fn update_record(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    Path(id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let body = json_object(payload)?;
    let record = state.resolver(catalog).update(&id, &body).await?;

    Ok(Json(json!({
        "mensaje": "Personaje actualizado exitosamente",
        "data": record,
    })))
}

/// Delete a record by identifier (DELETE /{singular}/{id}).
pub async fn delete_record(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = state.resolver(catalog).delete(&id).await?;
    Ok(deleted_response(catalog, &record))
}

/// Delete a record by name (DELETE /{singular}/byname/{nombre}).
pub async fn delete_record_by_name(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let record = state.resolver(catalog).delete_by_name(&name).await?;
    Ok(deleted_response(catalog, &record))
}
