use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use roster_core::catalog::Catalog;

use crate::{
    handlers::{
        debug::{databases, delete_dry_run, inspect_identifier, store_status},
        health::{livez, readyz},
        records::{
            create_record, delete_record, delete_record_by_name, get_record, get_record_by_name,
            list_records, update_record,
        },
        root::{banner, server_check},
    },
    state::AppState,
};

/// Routes for one catalog. Handlers read the catalog from a request extension.
fn catalog_routes(catalog: Catalog) -> Router<AppState> {
    let singular = catalog.singular();

    Router::new()
        .route(&format!("/{}", catalog.plural()), get(list_records))
        .route(&format!("/{singular}"), post(create_record))
        .route(
            &format!("/{singular}/{{key}}"),
            get(get_record).put(update_record).delete(delete_record),
        )
        .route(
            &format!("/{singular}/byname/{{nombre}}"),
            get(get_record_by_name).delete(delete_record_by_name),
        )
        .route(&format!("/debug/{singular}/{{id}}"), get(inspect_identifier))
        .layer(Extension(catalog))
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let request_timeout = state.request_timeout;

    let router = Router::new()
        .route("/", get(banner))
        .route("/test", get(server_check))
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .route("/debug", get(store_status))
        .route("/debug/databases", get(databases))
        .route("/debug/delete-test/{id}", get(delete_dry_run));

    Catalog::ALL
        .into_iter()
        .fold(router, |router, catalog| router.merge(catalog_routes(catalog)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
