//! Diagnostic endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use roster_core::catalog::Catalog;

use crate::{handlers::AppError, resolver::IdentifierProbe, state::AppState};

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// GET /debug - Connection state of both stores.
pub async fn store_status(State(state): State<AppState>) -> Json<Value> {
    let health = state.health().await;
    Json(json!({
        "mongodb": health.document,
        "sql": health.relational,
        "timestamp": timestamp(),
    }))
}

/// GET /debug/databases - Record counts and contents per catalog and store.
pub async fn databases(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut body = json!({ "timestamp": timestamp() });
    for catalog in Catalog::ALL {
        let snapshot = state.resolver(catalog).snapshot().await?;
        tracing::debug!(
            catalog = ?catalog,
            documents = snapshot.document.record_count,
            rows = snapshot.relational.record_count,
            "Collected store snapshot"
        );
        body[catalog.plural()] = json!(snapshot);
    }
    Ok(Json(body))
}

/// GET /debug/{singular}/{id} - Check an identifier against both stores.
pub async fn inspect_identifier(
    State(state): State<AppState>,
    Extension(catalog): Extension<Catalog>,
    Path(id): Path<String>,
) -> Result<Json<IdentifierProbe>, AppError> {
    let probe = state.resolver(catalog).inspect(&id).await?;
    Ok(Json(probe))
}

/// GET /debug/delete-test/{id} - Locate the hunter a delete would remove,
/// without deleting it.
pub async fn delete_dry_run(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let catalog = Catalog::Hunters;
    let record = state.resolver(catalog).get(&id).await?;
    let store = record.store();

    Ok(Json(json!({
        "message": format!("Personaje encontrado en {store}"),
        "database": store,
        "data": record,
        "deleteUrl": format!("/{}/{}", catalog.singular(), record.id),
    })))
}
