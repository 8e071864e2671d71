//! Shared fixtures: migrated in-memory database and wired services.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use dbx::{Datasource, UnitOfWork};
use jwt_guard::{Jwt, TokenIssuer};
use sea_orm::{ConnectOptions, EntityTrait};
use sea_orm_migration::MigratorTrait;

use common::AppResult;
use user_service_lib::client::{MockPharmacyClient, PharmacyClient};
use user_service_lib::infra::Migrator;
use user_service_lib::notification::{NotificationAction, Notifications, Notifier};
use user_service_lib::repository::{entities::user, UserStore};
use user_service_lib::service::UserManager;
use user_service_lib::state::AppState;

pub const SECRET: &[u8] = b"user-service-test-secret-32bytes!";
pub const FRONTEND_URL: &str = "http://localhost:3000";

pub async fn datasource() -> Datasource {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let datasource = Datasource::connect(options)
        .await
        .expect("in-memory database should open");
    Migrator::up(datasource.connection(), None)
        .await
        .expect("migrations should apply");
    datasource
}

pub fn jwt() -> Arc<Jwt> {
    Arc::new(Jwt::new(SECRET, Duration::hours(1)))
}

/// Keeps every delivered notification.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, NotificationAction)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, NotificationAction)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, to: &str, action: &NotificationAction) -> AppResult<()> {
        self.sent.lock().unwrap().push((to.to_string(), action.clone()));
        Ok(())
    }
}

pub struct Fixture {
    pub datasource: Datasource,
    pub jwt: Arc<Jwt>,
    pub manager: Arc<UserManager>,
    pub email: Arc<RecordingNotifier>,
    pub sms: Arc<RecordingNotifier>,
}

impl Fixture {
    pub async fn new(pharmacies: MockPharmacyClient) -> Self {
        Self::with_client(Arc::new(pharmacies)).await
    }

    pub async fn with_client(pharmacies: Arc<dyn PharmacyClient>) -> Self {
        let datasource = datasource().await;
        let jwt = jwt();
        let email = Arc::new(RecordingNotifier::default());
        let sms = Arc::new(RecordingNotifier::default());

        let manager = Arc::new(UserManager::new(
            UnitOfWork::new(datasource.clone()),
            Arc::new(UserStore::new()),
            pharmacies,
            Notifications::new(email.clone(), sms.clone()),
            jwt.clone(),
            FRONTEND_URL,
        ));

        Self {
            datasource,
            jwt,
            manager,
            email,
            sms,
        }
    }

    pub fn state(&self) -> AppState {
        let issuer = TokenIssuer::new(self.manager.clone(), self.jwt.clone());
        AppState::new(
            self.manager.clone(),
            issuer,
            self.jwt.clone(),
            self.datasource.clone(),
        )
    }

    /// Rows of the user table, read outside any unit of work.
    pub async fn stored_users(&self) -> Vec<user::Model> {
        user::Entity::find()
            .all(self.datasource.connection())
            .await
            .expect("users should be readable")
    }

    /// Token found in the last invitation e-mail.
    pub fn last_invite_token(&self) -> String {
        let sent = self.email.sent();
        let (_, action) = sent.last().expect("an invitation should be sent");
        match action {
            NotificationAction::AccountInvite { link } => link
                .split("token=")
                .nth(1)
                .expect("link should carry a token")
                .to_string(),
            other => panic!("unexpected notification {:?}", other),
        }
    }
}
