use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use chrono::Local;
use tower_http::trace::TraceLayer;

use crate::{
    error::ApiError,
    models::{Contact, CreateContact, SearchQuery, UpdateContact},
    store::ContactStore,
};

pub const MIN_SEARCH_LEN: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub store: ContactStore,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/contacts", get(search_contacts).post(create_contact))
        .route("/contacts/", get(search_contacts).post(create_contact))
        .route(
            "/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/upcoming_birthdays", get(upcoming_birthdays))
        .route("/upcoming_birthdays/", get(upcoming_birthdays))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<CreateContact>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(input) = payload?;
    Ok(Json(state.store.create(input).await?))
}

async fn search_contacts(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let Query(params) = params?;
    let q = match params.q {
        None => {
            return Err(ApiError::BadRequest(
                "Search query cannot be empty or None".to_string(),
            ))
        }
        Some(q) if q.chars().count() < MIN_SEARCH_LEN => {
            return Err(ApiError::BadRequest(format!(
                "Search query must be at least {MIN_SEARCH_LEN} characters"
            )))
        }
        Some(q) => q,
    };

    Ok(Json(state.store.search(&q).await?))
}

async fn get_contact(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.get(id).await?))
}

async fn update_contact(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateContact>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(id) = id?;
    let Json(changes) = payload?;
    Ok(Json(state.store.update(id, changes).await?))
}

async fn delete_contact(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.store.delete(id).await?))
}

async fn upcoming_birthdays(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    let today = Local::now().date_naive();
    Ok(Json(state.store.upcoming(today).await?))
}
