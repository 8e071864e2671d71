//! UserManager against an in-memory database.

mod support;

use std::sync::Arc;

use common::AppError;
use domain::{NotificationPreference, Password, Role};
use jwt_guard::PrincipalStore;
use support::Fixture;
use tokio_test::assert_err;
use user_service_lib::client::{MockPharmacyClient, StubPharmacyClient};
use user_service_lib::models::{InviteClaims, Invitation, Registration, UserChanges};
use user_service_lib::notification::NotificationAction;
use user_service_lib::service::UserService;

fn invitation(email: &str, role: Role, pharmacy_id: Option<i32>) -> Invitation {
    Invitation {
        email: email.to_string(),
        name: "Ana Popescu".to_string(),
        role,
        pharmacy_id,
    }
}

fn registration(token: String) -> Registration {
    Registration {
        invite_token: token,
        password: "SecurePass123".to_string(),
        phone_number: "+40712345678".to_string(),
    }
}

#[tokio::test]
async fn test_invite_emails_completion_link() {
    let fx = Fixture::new(MockPharmacyClient::new()).await;

    let email = fx
        .manager
        .invite_user(invitation("ana@pharmacy.ro", Role::Employee, Some(4)))
        .await
        .unwrap();
    assert_eq!(email, "ana@pharmacy.ro");

    let sent = fx.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "ana@pharmacy.ro");
    match &sent[0].1 {
        NotificationAction::AccountInvite { link } => {
            assert!(link.starts_with("http://localhost:3000/complete-account?token="));
        }
        other => panic!("unexpected notification {:?}", other),
    }

    let claims: InviteClaims = fx.jwt.decode(&fx.last_invite_token()).unwrap();
    assert_eq!(claims.email, "ana@pharmacy.ro");
    assert_eq!(claims.role, Role::Employee);
    assert_eq!(claims.pharmacy_id, Some(4));
}

#[tokio::test]
async fn test_completing_invitation_creates_user_and_syncs_pharmacy() {
    let mut pharmacies = MockPharmacyClient::new();
    pharmacies
        .expect_set_user_at_pharmacy()
        .withf(|_, pharmacy_id, role| *pharmacy_id == 4 && *role == Role::Manager)
        .times(1)
        .returning(|_, _, _| Ok(()));
    let fx = Fixture::new(pharmacies).await;

    fx.manager
        .invite_user(invitation("mara@pharmacy.ro", Role::Manager, Some(4)))
        .await
        .unwrap();
    let user = fx
        .manager
        .save_invited_user(registration(fx.last_invite_token()))
        .await
        .unwrap();

    assert_eq!(user.email, "mara@pharmacy.ro");
    assert_eq!(user.role, Role::Manager);
    assert_eq!(user.notification_preference, NotificationPreference::Email);
    assert!(Password::from_hash(user.password_hash.clone()).verify("SecurePass123"));

    let stored = fx.stored_users().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].role, "MANAGER");
}

#[tokio::test]
async fn test_failed_pharmacy_sync_rolls_back_the_new_user() {
    let mut pharmacies = MockPharmacyClient::new();
    pharmacies
        .expect_set_user_at_pharmacy()
        .returning(|_, _, _| Err(AppError::service_unavailable("pharmacy-service")));
    let fx = Fixture::new(pharmacies).await;

    fx.manager
        .invite_user(invitation("ion@pharmacy.ro", Role::Employee, Some(9)))
        .await
        .unwrap();
    let err = fx
        .manager
        .save_invited_user(registration(fx.last_invite_token()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ServiceUnavailable(_)));
    assert!(fx.stored_users().await.is_empty());
}

#[tokio::test]
async fn test_invitation_without_pharmacy_skips_sync() {
    let fx = Fixture::new(MockPharmacyClient::new()).await;

    fx.manager
        .invite_user(invitation("admin2@pharmacy.ro", Role::Admin, None))
        .await
        .unwrap();
    fx.manager
        .save_invited_user(registration(fx.last_invite_token()))
        .await
        .unwrap();

    assert_eq!(fx.stored_users().await.len(), 1);
}

#[tokio::test]
async fn test_registration_rejects_bad_token_and_duplicates() {
    let fx = Fixture::with_client(Arc::new(StubPharmacyClient)).await;

    let err = fx
        .manager
        .save_invited_user(registration("not-a-token".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    fx.manager
        .invite_user(invitation("dup@pharmacy.ro", Role::Employee, None))
        .await
        .unwrap();
    let token = fx.last_invite_token();
    fx.manager.save_invited_user(registration(token.clone())).await.unwrap();

    let err = assert_err!(fx.manager.save_invited_user(registration(token)).await);
    assert!(matches!(err, AppError::Conflict(_)));

    let err = fx
        .manager
        .invite_user(invitation("dup@pharmacy.ro", Role::Employee, None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(fx.stored_users().await.len(), 1);
}

#[tokio::test]
async fn test_registration_validates_phone_and_password() {
    let fx = Fixture::with_client(Arc::new(StubPharmacyClient)).await;
    fx.manager
        .invite_user(invitation("val@pharmacy.ro", Role::Employee, None))
        .await
        .unwrap();
    let token = fx.last_invite_token();

    let mut bad_phone = registration(token.clone());
    bad_phone.phone_number = "0712345678".to_string();
    let err = fx.manager.save_invited_user(bad_phone).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let mut short_password = registration(token);
    short_password.password = "short".to_string();
    assert!(fx.manager.save_invited_user(short_password).await.is_err());

    assert!(fx.stored_users().await.is_empty());
}

#[tokio::test]
async fn test_list_update_and_delete() {
    let fx = Fixture::with_client(Arc::new(StubPharmacyClient)).await;
    let admin = fx
        .manager
        .save_admin("root@pharmacy.ro", "RootPass123", "+40700000000")
        .await
        .unwrap();
    fx.manager
        .invite_user(invitation("emp@pharmacy.ro", Role::Employee, None))
        .await
        .unwrap();
    let employee = fx
        .manager
        .save_invited_user(registration(fx.last_invite_token()))
        .await
        .unwrap();

    assert_eq!(fx.manager.list_users(None).await.unwrap().len(), 2);
    let admins = fx.manager.list_users(Some(Role::Admin)).await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].id, admin.id);

    let updated = fx
        .manager
        .update_user(
            employee.id,
            UserChanges {
                role: Some(Role::Manager),
                notification_preference: Some(NotificationPreference::Sms),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.role, Role::Manager);
    assert_eq!(updated.notification_preference, NotificationPreference::Sms);
    assert_eq!(updated.phone_number, "+40712345678");

    let err = fx
        .manager
        .update_user(employee.id, UserChanges::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let err = fx
        .manager
        .update_user(
            999,
            UserChanges {
                phone_number: Some("+40799999999".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    let deleted = fx.manager.delete_user(employee.id).await.unwrap();
    assert_eq!(deleted.email, "emp@pharmacy.ro");
    assert!(matches!(
        fx.manager.delete_user(employee.id).await.unwrap_err(),
        AppError::NotFound
    ));
    assert_eq!(fx.stored_users().await.len(), 1);
}

#[tokio::test]
async fn test_notify_uses_preferred_channel() {
    let fx = Fixture::with_client(Arc::new(StubPharmacyClient)).await;
    let admin = fx
        .manager
        .save_admin("root@pharmacy.ro", "RootPass123", "+40700000000")
        .await
        .unwrap();
    let admin = fx
        .manager
        .update_user(
            admin.id,
            UserChanges {
                notification_preference: Some(NotificationPreference::Sms),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    fx.manager
        .notify_user(&admin, NotificationAction::AccountDeleted)
        .await
        .unwrap();

    assert!(fx.email.sent().is_empty());
    assert_eq!(
        fx.sms.sent(),
        vec![("+40700000000".to_string(), NotificationAction::AccountDeleted)]
    );
}

#[tokio::test]
async fn test_user_pharmacies_come_from_client() {
    let mut pharmacies = MockPharmacyClient::new();
    pharmacies
        .expect_set_user_at_pharmacy()
        .returning(|_, _, _| Ok(()));
    pharmacies
        .expect_get_pharmacies_by_user_and_role()
        .withf(|_, role| *role == Role::Employee)
        .times(1)
        .returning(|_, _| Ok(vec![2, 5]));
    let fx = Fixture::new(pharmacies).await;

    let admin = fx
        .manager
        .save_admin("root@pharmacy.ro", "RootPass123", "+40700000000")
        .await
        .unwrap();
    fx.manager
        .invite_user(invitation("emp@pharmacy.ro", Role::Employee, Some(2)))
        .await
        .unwrap();
    let employee = fx
        .manager
        .save_invited_user(registration(fx.last_invite_token()))
        .await
        .unwrap();

    assert_eq!(
        fx.manager.get_user_pharmacies(employee.id).await.unwrap(),
        vec![2, 5]
    );
    assert!(fx.manager.get_user_pharmacies(admin.id).await.unwrap().is_empty());
    assert!(matches!(
        fx.manager.get_user_pharmacies(404).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn test_principal_lookup_by_email() {
    let fx = Fixture::with_client(Arc::new(StubPharmacyClient)).await;
    let admin = fx
        .manager
        .save_admin("root@pharmacy.ro", "RootPass123", "+40700000000")
        .await
        .unwrap();

    let principal = fx
        .manager
        .find_by_principal("root@pharmacy.ro")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(principal.id, admin.id);
    assert_eq!(principal.role, Role::Admin);

    assert!(fx.manager.find_by_principal("nobody@pharmacy.ro").await.unwrap().is_none());
}
