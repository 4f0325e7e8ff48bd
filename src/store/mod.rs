//! Data access: one repository per entity, each operation a single autocommit statement.

mod postgres;
#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgStore;

use crate::error::AppError;
use crate::models::{Course, Enrollment, Resource, Student};
use async_trait::async_trait;

#[async_trait]
pub trait Repository<E: Resource>: Send + Sync {
    /// Every row, in whatever order the database returns them.
    async fn list(&self) -> Result<Vec<E>, AppError>;

    /// Insert one row and return it as stored.
    async fn create(&self, input: E::Create) -> Result<E, AppError>;

    /// `AppError::NotFound` when no row has `id`.
    async fn update(&self, id: i32, input: E::Update) -> Result<(), AppError>;

    /// `AppError::NotFound` when no row has `id`.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}

/// Everything the HTTP layer needs from a backing store.
pub trait Store:
    Repository<Student> + Repository<Course> + Repository<Enrollment> + HealthCheck
{
}

impl<T> Store for T where
    T: Repository<Student> + Repository<Course> + Repository<Enrollment> + HealthCheck
{
}

/// Zero affected rows means the id did not exist.
pub(crate) fn expect_one_row(affected: u64, resource: &'static str, id: i32) -> Result<(), AppError> {
    if affected == 0 {
        return Err(AppError::NotFound { resource, id });
    }
    Ok(())
}
