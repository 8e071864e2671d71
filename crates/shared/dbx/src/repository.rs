//! Generic CRUD repository executing on the current session.
//!
//! Every method needs an active unit of work; outside one it fails with
//! `DbxError::NoActiveSession`.

use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
};

use crate::context::SessionContext;
use crate::error::DbxError;
use crate::session::Session;

type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Basic operations for entity `E`.
pub struct CrudRepository<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for CrudRepository<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> Default for CrudRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> CrudRepository<E> {
    pub fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }

    /// The session of the current unit of work.
    pub fn session(&self) -> Result<Session, DbxError> {
        SessionContext::require()
    }
}

impl<E> CrudRepository<E>
where
    E: EntityTrait,
{
    pub async fn find_all(&self) -> Result<Vec<E::Model>, DbxError> {
        let session = self.session()?;
        let conn = session.connection().await?;
        Ok(E::find().all(&*conn).await?)
    }

    pub async fn find_by_id<K>(&self, id: K) -> Result<Option<E::Model>, DbxError>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        let session = self.session()?;
        let conn = session.connection().await?;
        Ok(E::find_by_id(id).one(&*conn).await?)
    }

    /// Insert a new row and return it.
    pub async fn insert<A>(&self, model: A) -> Result<E::Model, DbxError>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let session = self.session()?;
        let conn = session.connection().await?;
        Ok(model.insert(&*conn).await?)
    }

    /// Write the changed columns of an existing row and return it.
    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbxError>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let session = self.session()?;
        let conn = session.connection().await?;
        Ok(model.update(&*conn).await?)
    }

    /// Delete by primary key. Returns whether exactly one row was removed.
    pub async fn delete_by_id<K>(&self, id: K) -> Result<bool, DbxError>
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        let session = self.session()?;
        let conn = session.connection().await?;
        let result = E::delete_by_id(id).exec(&*conn).await?;
        Ok(result.rows_affected == 1)
    }
}
