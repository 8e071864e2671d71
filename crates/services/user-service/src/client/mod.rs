//! Clients for other services.

mod pharmacy_client;

pub use pharmacy_client::{PharmacyApiClient, PharmacyClient, StubPharmacyClient};

#[cfg(any(test, feature = "test-utils"))]
pub use pharmacy_client::MockPharmacyClient;
