// ABOUTME: HTTP handlers and router for users, role profiles, social links and packages
// ABOUTME: Validates inputs, calls storage and projects results into wire representations

use axum::{
    extract::{multipart::Field, rejection::JsonRejection, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use uuid::Uuid;

use crate::error::Result;
use crate::media::{Upload, AVATAR_UPLOAD_TO, COMPANY_LOGO_UPLOAD_TO};
use crate::representation::{
    CustomerProfileRepresentation, HostProfileRepresentation, PackageRepresentation,
    UserRepresentation,
};
use crate::types::{
    CustomerProfileChanges, HostProfileChanges, PackageInput, ProfileLinksInput, UserInput,
};
use crate::validation::{
    self, ValidationErrors, COMPANY_NAME_MAX_LENGTH, DATE_FORMAT_MESSAGE, PHONE_NUMBER_MAX_LENGTH,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user).get(list_users))
        .route("/api/users/:user_id", get(get_user).delete(delete_user))
        .route("/api/users/:user_id/links", put(set_profile_links))
        .route(
            "/api/users/:user_id/customer-profile",
            get(get_customer_profile).patch(update_customer_profile),
        )
        .route(
            "/api/users/:user_id/host-profile",
            get(get_host_profile).patch(update_host_profile),
        )
        .route("/api/users/:user_id/packages", get(list_host_packages))
        .route("/api/packages", post(create_package))
}

async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<UserRepresentation>)> {
    let Json(body) = payload?;
    let (input, errors) = UserInput::from_json(&body);
    let new_user = input.validate_with(errors)?;
    let user = state.storage.create_user(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserRepresentation::project(&user, None)),
    ))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRepresentation>>> {
    let users = state.storage.list_users().await?;

    Ok(Json(
        users
            .iter()
            .map(|(user, links)| UserRepresentation::project(user, links.as_ref()))
            .collect(),
    ))
}

async fn get_user(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<UserRepresentation>> {
    let (user, links) = state.storage.get_user(user_id).await?;
    Ok(Json(UserRepresentation::project(&user, links.as_ref())))
}

async fn delete_user(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.storage.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_profile_links(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProfileLinksInput>, JsonRejection>,
) -> Result<Json<UserRepresentation>> {
    let Json(links) = payload?;
    state.storage.set_profile_links(user_id, links).await?;
    let (user, links) = state.storage.get_user(user_id).await?;
    Ok(Json(UserRepresentation::project(&user, links.as_ref())))
}

async fn get_customer_profile(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<CustomerProfileRepresentation>> {
    let profile = state.storage.get_customer_profile(user_id).await?;
    customer_profile_response(&state, user_id, profile).await
}

async fn update_customer_profile(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CustomerProfileRepresentation>> {
    // Fail before touching the media root when the profile is missing
    state.storage.get_customer_profile(user_id).await?;

    let mut changes = CustomerProfileChanges::default();
    let mut errors = ValidationErrors::new();
    let mut avatar = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "date_of_birth" => {
                let value = field.text().await?;
                match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
                    Ok(date) => changes.date_of_birth = Some(date),
                    Err(_) => errors.add("date_of_birth", DATE_FORMAT_MESSAGE),
                }
            }
            "phone_number" => {
                let value = field.text().await?;
                validation::check_max_length(
                    &mut errors,
                    "phone_number",
                    &value,
                    PHONE_NUMBER_MAX_LENGTH,
                );
                changes.phone_number = Some(value);
            }
            "avatar" => avatar = read_upload(field).await?,
            other => tracing::debug!(field = other, "Ignoring read-only or unknown profile field"),
        }
    }

    let mut changes = errors.into_result(changes)?;

    // Nothing is written to the media root until every field is valid
    changes.avatar = state.media.save_upload(AVATAR_UPLOAD_TO, avatar).await?;
    let stored = changes.avatar.clone();

    match state.storage.update_customer_profile(user_id, changes).await {
        Ok(profile) => customer_profile_response(&state, user_id, profile).await,
        Err(err) => {
            discard_upload(&state, stored).await;
            Err(err)
        }
    }
}

async fn get_host_profile(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<HostProfileRepresentation>> {
    let profile = state.storage.get_host_profile(user_id).await?;
    host_profile_response(&state, user_id, profile).await
}

async fn update_host_profile(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<HostProfileRepresentation>> {
    state.storage.get_host_profile(user_id).await?;

    let mut changes = HostProfileChanges::default();
    let mut errors = ValidationErrors::new();
    let mut company_logo = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "company_name" => {
                let value = field.text().await?;
                validation::check_max_length(
                    &mut errors,
                    "company_name",
                    &value,
                    COMPANY_NAME_MAX_LENGTH,
                );
                changes.company_name = Some(value);
            }
            "phone_number" => {
                let value = field.text().await?;
                validation::check_max_length(
                    &mut errors,
                    "phone_number",
                    &value,
                    PHONE_NUMBER_MAX_LENGTH,
                );
                changes.phone_number = Some(value);
            }
            "company_logo" => company_logo = read_upload(field).await?,
            other => tracing::debug!(field = other, "Ignoring read-only or unknown profile field"),
        }
    }

    let mut changes = errors.into_result(changes)?;

    changes.company_logo = state
        .media
        .save_upload(COMPANY_LOGO_UPLOAD_TO, company_logo)
        .await?;
    let stored = changes.company_logo.clone();

    match state.storage.update_host_profile(user_id, changes).await {
        Ok(profile) => host_profile_response(&state, user_id, profile).await,
        Err(err) => {
            discard_upload(&state, stored).await;
            Err(err)
        }
    }
}

async fn create_package(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PackageInput>, JsonRejection>,
) -> Result<(StatusCode, Json<PackageRepresentation>)> {
    let Json(input) = payload?;
    let new_package = input.validate()?;
    let package = state.storage.create_package(new_package).await?;

    Ok((StatusCode::CREATED, Json(PackageRepresentation::from(&package))))
}

async fn list_host_packages(
    Path(user_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Vec<PackageRepresentation>>> {
    let packages = state.storage.get_packages_for_host(user_id).await?;
    Ok(Json(packages.iter().map(PackageRepresentation::from).collect()))
}

/// Buffers an image part; an empty part leaves the stored image unchanged.
async fn read_upload(field: Field<'_>) -> Result<Option<Upload>> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let bytes = field.bytes().await?;

    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(Upload { file_name, bytes }))
}

async fn discard_upload(state: &AppState, reference: Option<String>) {
    if let Some(reference) = reference {
        state.media.discard(&reference).await;
    }
}

async fn customer_profile_response(
    state: &AppState,
    user_id: Uuid,
    profile: crate::entities::customer_profile::Model,
) -> Result<Json<CustomerProfileRepresentation>> {
    let (user, links) = state.storage.get_user(user_id).await?;
    Ok(Json(CustomerProfileRepresentation::project(
        &profile,
        UserRepresentation::project(&user, links.as_ref()),
    )))
}

async fn host_profile_response(
    state: &AppState,
    user_id: Uuid,
    profile: crate::entities::host_profile::Model,
) -> Result<Json<HostProfileRepresentation>> {
    let (user, links) = state.storage.get_user(user_id).await?;
    Ok(Json(HostProfileRepresentation::project(
        &profile,
        UserRepresentation::project(&user, links.as_ref()),
    )))
}
