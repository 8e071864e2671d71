mod common;

use common::{item, TestError};
use dbx::{CrudRepository, DbxError, RollbackPolicy, UnitOfWork};
use sea_orm::Set;

#[tokio::test]
async fn test_repository_requires_active_session() {
    let _datasource = common::datasource().await;
    let repo = CrudRepository::<item::Entity>::new();

    assert!(matches!(repo.find_all().await, Err(DbxError::NoActiveSession)));
    assert!(matches!(repo.find_by_id(1).await, Err(DbxError::NoActiveSession)));
    assert!(matches!(repo.delete_by_id(1).await, Err(DbxError::NoActiveSession)));
}

#[tokio::test]
async fn test_crud_inside_unit_of_work() {
    let uow = UnitOfWork::new(common::datasource().await);
    let repo = CrudRepository::<item::Entity>::new();

    let result: Result<_, TestError> = uow
        .run(RollbackPolicy::always(), async {
            let created = repo
                .insert(item::ActiveModel {
                    name: Set("syringe".to_string()),
                    ..Default::default()
                })
                .await?;

            let found = repo.find_by_id(created.id).await?;
            assert_eq!(found.as_ref().map(|m| m.name.as_str()), Some("syringe"));

            let mut active: item::ActiveModel = created.clone().into();
            active.name = Set("bandage".to_string());
            let updated = repo.update(active).await?;
            assert_eq!(updated.name, "bandage");

            assert!(repo.delete_by_id(created.id).await?);
            assert!(!repo.delete_by_id(created.id).await?);
            assert!(repo.find_by_id(created.id).await?.is_none());

            Ok(repo.find_all().await?.len())
        })
        .await;

    assert_eq!(result.unwrap(), 0);
}

#[tokio::test]
async fn test_finished_session_reports_closed() {
    let datasource = common::datasource().await;
    let session = datasource.begin().await.unwrap();

    session.commit().await.unwrap();

    assert!(session.is_finished().await);
    assert!(matches!(
        session.connection().await,
        Err(DbxError::SessionClosed(id)) if id == session.id()
    ));
    assert!(matches!(session.rollback().await, Err(DbxError::SessionClosed(_))));
}

#[tokio::test]
async fn test_datasource_ping() {
    let datasource = common::datasource().await;
    assert!(datasource.ping().await.is_ok());
}
