//! Medication repository executing on the current unit of work.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use dbx::CrudRepository;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::entities::{manufacturer, medication, medication_image};
use common::AppResult;

use crate::models::{Manufacturer, Medication, MedicationImage, NewMedication};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Medication repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MedicationRepository: Send + Sync {
    /// All medications, or only `ids`, with manufacturer and images
    async fn find_detailed(&self, ids: Option<Vec<i32>>) -> AppResult<Vec<Medication>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Medication>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;

    async fn create(&self, medication: NewMedication) -> AppResult<Medication>;

    async fn add_image(
        &self,
        medication_id: i32,
        image_url: String,
        alt_text: String,
    ) -> AppResult<MedicationImage>;
}

/// SeaORM implementation of MedicationRepository
#[derive(Clone, Default)]
pub struct MedicationStore {
    medications: CrudRepository<medication::Entity>,
    images: CrudRepository<medication_image::Entity>,
}

impl MedicationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn assemble(
    model: medication::Model,
    manufacturer: Option<manufacturer::Model>,
    images: Vec<MedicationImage>,
) -> Medication {
    Medication {
        id: model.id,
        name: model.name,
        description: model.description,
        purchase_price: model.purchase_price,
        created_at: model.created_at,
        manufacturer: manufacturer.map(Manufacturer::from),
        images,
    }
}

#[async_trait]
impl MedicationRepository for MedicationStore {
    async fn find_detailed(&self, ids: Option<Vec<i32>>) -> AppResult<Vec<Medication>> {
        let session = self.medications.session()?;
        let conn = session.connection().await?;

        let mut query = medication::Entity::find()
            .find_also_related(manufacturer::Entity)
            .order_by_asc(medication::Column::Id);
        if let Some(ids) = ids {
            query = query.filter(medication::Column::Id.is_in(ids));
        }
        let rows = query.all(&*conn).await?;

        let medication_ids: Vec<i32> = rows.iter().map(|(m, _)| m.id).collect();
        let mut images: HashMap<i32, Vec<MedicationImage>> = HashMap::new();
        for image in medication_image::Entity::find()
            .filter(medication_image::Column::MedicationId.is_in(medication_ids))
            .order_by_asc(medication_image::Column::Id)
            .all(&*conn)
            .await?
        {
            images
                .entry(image.medication_id)
                .or_default()
                .push(MedicationImage::from(image));
        }

        Ok(rows
            .into_iter()
            .map(|(model, manufacturer)| {
                let own_images = images.remove(&model.id).unwrap_or_default();
                assemble(model, manufacturer, own_images)
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Medication>> {
        Ok(self.find_detailed(Some(vec![id])).await?.into_iter().next())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.medications.find_by_id(id).await?.is_some())
    }

    async fn create(&self, new: NewMedication) -> AppResult<Medication> {
        let model = self
            .medications
            .insert(medication::ActiveModel {
                name: Set(new.name),
                description: Set(new.description),
                purchase_price: Set(new.purchase_price),
                created_at: Set(Utc::now()),
                manufacturer_id: Set(new.manufacturer_id),
                ..Default::default()
            })
            .await?;

        self.find_by_id(model.id)
            .await?
            .ok_or_else(|| common::AppError::internal("Created medication not readable"))
    }

    async fn add_image(
        &self,
        medication_id: i32,
        image_url: String,
        alt_text: String,
    ) -> AppResult<MedicationImage> {
        let model = self
            .images
            .insert(medication_image::ActiveModel {
                image_url: Set(image_url),
                alt_text: Set(alt_text),
                medication_id: Set(medication_id),
                ..Default::default()
            })
            .await?;
        Ok(model.into())
    }
}
