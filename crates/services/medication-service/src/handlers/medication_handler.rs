//! Medication handlers.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::{AppError, AppResult, ValidatedJson};

use crate::models::{ImageUpload, Medication, MedicationImage, NewMedication};
use crate::state::AppState;

/// Largest accepted image upload.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMedicationRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Paracetamol 500mg")]
    pub name: String,
    #[schema(example = "Analgesic and antipyretic")]
    pub description: String,
    /// Minor units
    #[validate(range(min = 0, message = "Purchase price must not be negative"))]
    #[schema(example = 1250)]
    pub purchase_price: i64,
    pub manufacturer_id: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MedicationFilter {
    /// Comma separated ids, e.g. `1,2,3`
    pub ids: Option<String>,
}

impl MedicationFilter {
    fn ids(&self) -> AppResult<Option<Vec<i32>>> {
        let Some(raw) = self.ids.as_deref() else {
            return Ok(None);
        };

        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i32>()
                    .map_err(|_| AppError::bad_request(format!("Invalid medication id: {}", part)))
            })
            .collect::<AppResult<Vec<_>>>()
            .map(Some)
    }
}

/// Multipart form of an image upload.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    alt_text: String,
}

pub fn public_medication_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_medications))
        .route("/:id", get(get_medication))
}

/// Manager routes; the caller guards them.
pub fn manager_medication_routes() -> Router<AppState> {
    Router::new().route("/", post(create_medication)).route(
        "/:id/images",
        post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
    )
}

/// List medications
#[utoipa::path(
    get,
    path = "/api/medications",
    tag = "Medications",
    params(MedicationFilter),
    responses(
        (status = 200, description = "Medications", body = Vec<Medication>),
        (status = 400, description = "Malformed id list")
    )
)]
pub async fn get_medications(
    State(state): State<AppState>,
    Query(filter): Query<MedicationFilter>,
) -> AppResult<Json<Vec<Medication>>> {
    let medications = state.medication_service.get_medications(filter.ids()?).await?;
    Ok(Json(medications))
}

/// Get one medication
#[utoipa::path(
    get,
    path = "/api/medications/{id}",
    tag = "Medications",
    params(("id" = i32, Path, description = "Medication ID")),
    responses(
        (status = 200, description = "Medication", body = Medication),
        (status = 404, description = "Medication not found")
    )
)]
pub async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Medication>> {
    Ok(Json(state.medication_service.get_medication(id).await?))
}

/// Create a medication
#[utoipa::path(
    post,
    path = "/api/medications",
    tag = "Medications",
    security(("bearer_auth" = [])),
    request_body = CreateMedicationRequest,
    responses(
        (status = 201, description = "Medication created", body = Medication),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not a manager"),
        (status = 404, description = "Manufacturer not found")
    )
)]
pub async fn create_medication(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMedicationRequest>,
) -> AppResult<(StatusCode, Json<Medication>)> {
    let medication = state
        .medication_service
        .save_medication(NewMedication {
            name: payload.name,
            description: payload.description,
            purchase_price: payload.purchase_price,
            manufacturer_id: payload.manufacturer_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(medication)))
}

/// Upload a medication image
#[utoipa::path(
    post,
    path = "/api/medications/{id}/images",
    tag = "Medications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Medication ID")),
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = MedicationImage),
        (status = 400, description = "Invalid filename or form"),
        (status = 401, description = "Not a manager"),
        (status = 404, description = "Medication not found")
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MedicationImage>)> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut alt_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(e.body_text()))?
    {
        match field.name() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::bad_request("File name is missing"))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("alt_text") => {
                alt_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::bad_request(e.body_text()))?;
            }
            _ => {}
        }
    }

    let (filename, content) = file.ok_or_else(|| AppError::bad_request("Missing `file` field"))?;
    let image = state
        .medication_service
        .save_medication_image(
            id,
            ImageUpload {
                filename,
                alt_text,
                content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(image)))
}
