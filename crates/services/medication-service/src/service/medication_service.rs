//! Medication service - catalogue reads, creation and image uploads.

use std::sync::Arc;

use async_trait::async_trait;
use dbx::{
    non_transactional, transactional, transactional_service, HasUnitOfWork, RollbackPolicy, UnitOfWork,
};

use common::{AppError, AppResult};
use domain::validation::validate_image_filename;

use crate::infra::MediaStore;
use crate::models::{ImageUpload, Medication, MedicationImage, NewMedication};
use crate::repository::{ManufacturerRepository, MedicationRepository};

#[async_trait]
pub trait MedicationService: Send + Sync {
    /// All medications, or only `ids`
    async fn get_medications(&self, ids: Option<Vec<i32>>) -> AppResult<Vec<Medication>>;

    async fn get_medication(&self, id: i32) -> AppResult<Medication>;

    async fn save_medication(&self, medication: NewMedication) -> AppResult<Medication>;

    /// Store an image file and attach it to a medication
    /// The file is written before the row; it is removed again unless the
    /// row is committed.
    #[non_transactional]
    async fn save_medication_image(
        &self,
        medication_id: i32,
        upload: ImageUpload,
    ) -> AppResult<MedicationImage> {
        let extension = validate_image_filename(&upload.filename)?.to_string();
        let exists = self
            .uow
            .run(RollbackPolicy::always(), async {
                self.medications.exists(medication_id).await
            })
            .await?;
        if !exists {
            return Err(AppError::NotFound);
        }

        let stored = self.media.save(&extension, &upload.content).await?;
        let url = stored.url.clone();
        let saved = self
            .uow
            .run(RollbackPolicy::always(), async {
                self.medications
                    .add_image(medication_id, url, upload.alt_text)
                    .await
            })
            .await;

        match saved {
            Ok(image) => {
                tracing::info!(medication_id, image = %stored.name, "Medication image stored");
                Ok(image)
            }
            Err(err) => {
                if let Err(cleanup) = self.media.remove(&stored.name).await {
                    tracing::error!("Orphaned media file {}: {}", stored.name, cleanup);
                }
                Err(err)
            }
        }
    }
}
