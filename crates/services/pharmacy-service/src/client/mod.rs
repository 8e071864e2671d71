//! Clients of other services.

mod medication_client;

pub use medication_client::{MedicationApiClient, MedicationClient, StubMedicationClient};

#[cfg(any(test, feature = "test-utils"))]
pub use medication_client::MockMedicationClient;
