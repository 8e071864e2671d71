//! Medication and manufacturer services against an in-memory database.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppError, AppResult};
use dbx::SessionContext;
use medication_service_lib::models::{
    ImageUpload, Medication, MedicationImage, NewManufacturer, NewMedication,
};
use medication_service_lib::repository::{
    MedicationRepository, MedicationStore, MockMedicationRepository,
};
use medication_service_lib::service::{ManufacturerService, MedicationService};
use support::{files_in, Fixture};
use tokio_test::assert_err;

fn paracetamol(manufacturer_id: Option<i32>) -> NewMedication {
    NewMedication {
        name: "Paracetamol 500mg".to_string(),
        description: "Analgesic".to_string(),
        purchase_price: 1250,
        manufacturer_id,
    }
}

fn upload(filename: &str) -> ImageUpload {
    ImageUpload {
        filename: filename.to_string(),
        alt_text: "Box front".to_string(),
        content: b"\x89PNG\r\n".to_vec(),
    }
}

#[tokio::test]
async fn test_create_and_read_medications() {
    let fx = Fixture::new().await;
    let maker = fx
        .manufacturers
        .save_manufacturer(NewManufacturer {
            name: "Antibiotice".to_string(),
            contact_info: "office@antibiotice.ro".to_string(),
        })
        .await
        .unwrap();

    let first = fx.medications.save_medication(paracetamol(Some(maker.id))).await.unwrap();
    let second = fx.medications.save_medication(paracetamol(None)).await.unwrap();

    assert_eq!(first.manufacturer.as_ref().map(|m| m.id), Some(maker.id));
    assert!(second.manufacturer.is_none());
    assert_eq!(first.purchase_price, 1250);

    assert_eq!(fx.medications.get_medications(None).await.unwrap().len(), 2);
    let only_second = fx
        .medications
        .get_medications(Some(vec![second.id, 999]))
        .await
        .unwrap();
    assert_eq!(only_second.len(), 1);
    assert_eq!(only_second[0].id, second.id);

    assert_eq!(fx.medications.get_medication(first.id).await.unwrap(), first);
    assert!(matches!(
        fx.medications.get_medication(999).await.unwrap_err(),
        AppError::NotFound
    ));
    assert_eq!(fx.manufacturers.get_manufacturers().await.unwrap(), vec![maker]);
}

#[tokio::test]
async fn test_unknown_manufacturer_is_not_found() {
    let fx = Fixture::new().await;

    let err = assert_err!(fx.medications.save_medication(paracetamol(Some(42))).await);
    assert!(matches!(err, AppError::NotFound));
    assert!(fx.medications.get_medications(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_negative_price_is_rejected() {
    let fx = Fixture::new().await;
    let mut medication = paracetamol(None);
    medication.purchase_price = -1;

    let err = assert_err!(fx.medications.save_medication(medication).await);
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_image_is_stored_and_listed() {
    let fx = Fixture::new().await;
    let medication = fx.medications.save_medication(paracetamol(None)).await.unwrap();

    let image = fx
        .medications
        .save_medication_image(medication.id, upload("box-front.png"))
        .await
        .unwrap();

    assert!(image.image_url.starts_with("media/"));
    assert!(image.image_url.ends_with(".png"));
    let stored = files_in(&fx.media_dir);
    assert_eq!(stored.len(), 1);
    assert_eq!(format!("media/{}", stored[0]), image.image_url);

    let reloaded = fx.medications.get_medication(medication.id).await.unwrap();
    assert_eq!(reloaded.images, vec![image]);
}

#[tokio::test]
async fn test_invalid_filenames_store_nothing() {
    let fx = Fixture::new().await;
    let medication = fx.medications.save_medication(paracetamol(None)).await.unwrap();

    for name in ["report.pdf", ".hidden.png", "_x.png", "my photo.png", "poză.jpg"] {
        let err = fx
            .medications
            .save_medication_image(medication.id, upload(name))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{} accepted", name);
    }

    let err = fx
        .medications
        .save_medication_image(404, upload("box.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
    assert!(files_in(&fx.media_dir).is_empty());
}

#[tokio::test]
async fn test_failed_image_row_removes_the_file() {
    let mut repo = MockMedicationRepository::new();
    repo.expect_exists().returning(|_| Ok(true));
    repo.expect_add_image()
        .times(1)
        .returning(|_, _, _| Err(AppError::internal("disk full")));
    let fx = Fixture::with_repository(Arc::new(repo)).await;

    let err = fx
        .medications
        .save_medication_image(1, upload("box.jpeg"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(files_in(&fx.media_dir).is_empty());
}

/// Stores the image row, then finishes the transaction early so the
/// surrounding commit fails.
struct ClosingRepository(MedicationStore);

#[async_trait]
impl MedicationRepository for ClosingRepository {
    async fn find_detailed(&self, ids: Option<Vec<i32>>) -> AppResult<Vec<Medication>> {
        self.0.find_detailed(ids).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Medication>> {
        self.0.find_by_id(id).await
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        self.0.exists(id).await
    }

    async fn create(&self, medication: NewMedication) -> AppResult<Medication> {
        self.0.create(medication).await
    }

    async fn add_image(
        &self,
        medication_id: i32,
        image_url: String,
        alt_text: String,
    ) -> AppResult<MedicationImage> {
        let image = self.0.add_image(medication_id, image_url, alt_text).await?;
        SessionContext::require()?.rollback().await?;
        Ok(image)
    }
}

#[tokio::test]
async fn test_failed_commit_removes_the_file() {
    let fx = Fixture::with_repository(Arc::new(ClosingRepository(MedicationStore::new()))).await;
    let medication = fx.medications.save_medication(paracetamol(None)).await.unwrap();

    let err = fx
        .medications
        .save_medication_image(medication.id, upload("box.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Internal(_)));
    assert!(files_in(&fx.media_dir).is_empty());
    let reloaded = fx.medications.get_medication(medication.id).await.unwrap();
    assert!(reloaded.images.is_empty());
}
