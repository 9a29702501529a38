//! HTTP routes.
//!
//! Every collection gets the same five routes. Handlers are registered per
//! [`SubjectKind`], so adding a collection means adding a kind.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use theatrebase_domain::{AwardCeremonyId, MaterialId, ProductionId, VenueId};
use theatrebase_shared::views::EntityView;
use uuid::Uuid;

use super::error::ApiError;
use super::json::retain_safe_integers;
use crate::app::App;
use crate::use_cases::{KeyedSubject, Page, SubjectKind};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    SubjectKind::ALL.into_iter().fold(
        Router::new().route("/api/health", get(health)),
        |router, kind| {
            let collection = format!("/api/{}", kind.collection());
            let member = format!("{collection}/{{id}}");
            router
                .route(
                    &collection,
                    get(move |State(app): State<Arc<App>>| list(app, kind)).post(
                        move |State(app): State<Arc<App>>, body: Bytes| create(app, kind, body),
                    ),
                )
                .route(
                    &member,
                    get(move |State(app): State<Arc<App>>, Path(id): Path<Uuid>| {
                        show(app, kind, id)
                    })
                    .put(
                        move |State(app): State<Arc<App>>, Path(id): Path<Uuid>, body: Bytes| {
                            update(app, kind, id, body)
                        },
                    )
                    .delete(
                        move |State(app): State<Arc<App>>, Path(id): Path<Uuid>| {
                            delete(app, kind, id)
                        },
                    ),
                )
        },
    )
}

async fn health() -> &'static str {
    "OK"
}

/// Serializes a response body with out-of-range integers removed.
fn respond<T: Serialize>(body: &T) -> Result<Response, ApiError> {
    let mut value =
        serde_json::to_value(body).map_err(|e| ApiError::Internal(e.to_string()))?;
    retain_safe_integers(&mut value);
    Ok(Json(value).into_response())
}

/// Bodies are parsed here rather than by the `Json` extractor so that
/// malformed JSON is a validation error like any other bad input.
fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::invalid_body)
}

async fn list(app: Arc<App>, kind: SubjectKind) -> Result<Response, ApiError> {
    let listing = app.projector.list(kind).await?;
    respond(&listing)
}

async fn show(app: Arc<App>, kind: SubjectKind, id: Uuid) -> Result<Response, ApiError> {
    let page = app.projector.project(kind.subject(id)).await?;
    respond(&page)
}

async fn create(app: Arc<App>, kind: SubjectKind, body: Bytes) -> Result<Response, ApiError> {
    let management = &app.management;
    let page: Page = match kind {
        SubjectKind::Material => management.create_material(&parse(&body)?).await?,
        SubjectKind::Production => management.create_production(&parse(&body)?).await?,
        SubjectKind::Venue => management.create_venue(&parse(&body)?).await?,
        SubjectKind::AwardCeremony => management.create_ceremony(&parse(&body)?).await?,
        SubjectKind::Person
        | SubjectKind::Company
        | SubjectKind::Character
        | SubjectKind::Award => {
            let subject = keyed(kind)?;
            management.create_keyed_subject(subject, &parse(&body)?).await?
        }
    };
    tracing::info!(%kind, "Created");
    respond(&page)
}

async fn update(
    app: Arc<App>,
    kind: SubjectKind,
    id: Uuid,
    body: Bytes,
) -> Result<Response, ApiError> {
    let management = &app.management;
    let page: Page = match kind {
        SubjectKind::Material => {
            management
                .update_material(MaterialId::from_uuid(id), &parse(&body)?)
                .await?
        }
        SubjectKind::Production => {
            management
                .update_production(ProductionId::from_uuid(id), &parse(&body)?)
                .await?
        }
        SubjectKind::Venue => {
            management
                .update_venue(VenueId::from_uuid(id), &parse(&body)?)
                .await?
        }
        SubjectKind::AwardCeremony => {
            management
                .update_ceremony(AwardCeremonyId::from_uuid(id), &parse(&body)?)
                .await?
        }
        SubjectKind::Person
        | SubjectKind::Company
        | SubjectKind::Character
        | SubjectKind::Award => {
            let subject = keyed(kind)?;
            management
                .update_keyed_subject(subject, id, &parse(&body)?)
                .await?
        }
    };
    respond(&page)
}

async fn delete(app: Arc<App>, kind: SubjectKind, id: Uuid) -> Result<Response, ApiError> {
    let management = &app.management;
    let deleted: EntityView = match kind {
        SubjectKind::Material => management.delete_material(MaterialId::from_uuid(id)).await?,
        SubjectKind::Production => {
            management
                .delete_production(ProductionId::from_uuid(id))
                .await?
        }
        SubjectKind::Venue => management.delete_venue(VenueId::from_uuid(id)).await?,
        SubjectKind::AwardCeremony => {
            management
                .delete_ceremony(AwardCeremonyId::from_uuid(id))
                .await?
        }
        SubjectKind::Person
        | SubjectKind::Company
        | SubjectKind::Character
        | SubjectKind::Award => management.delete_keyed_subject(keyed(kind)?, id).await?,
    };
    respond(&deleted)
}

fn keyed(kind: SubjectKind) -> Result<KeyedSubject, ApiError> {
    KeyedSubject::from_kind(kind)
        .ok_or_else(|| ApiError::Internal(format!("{kind} is not a keyed subject")))
}
