//! Repositories over a PostgreSQL pool with fixed, parameterized statements.

use super::{expect_one_row, HealthCheck, Repository};
use crate::error::AppError;
use crate::models::{
    Course, CourseInput, Enrollment, EnrollmentUpdate, NewEnrollment, Student, StudentInput,
};
use async_trait::async_trait;
use sqlx::PgPool;

// enrolled_at may be declared TIMESTAMP or TIMESTAMPTZ; always read it as TIMESTAMPTZ.
const ENROLLMENT_COLUMNS: &str =
    "id, student_id, course_id, enrolled_at::timestamptz AS enrolled_at";

/// Store backed by a shared connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn delete_by_id(&self, table: &str, resource: &'static str, id: i32) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        expect_one_row(result.rows_affected(), resource, id)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Student> for PgStore {
    async fn list(&self) -> Result<Vec<Student>, AppError> {
        let sql = "SELECT id, name, email FROM students";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create(&self, input: StudentInput) -> Result<Student, AppError> {
        let sql = "INSERT INTO students (name, email) VALUES ($1, $2) RETURNING id, name, email";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(sql)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, input: StudentInput) -> Result<(), AppError> {
        let sql = "UPDATE students SET name = $1, email = $2 WHERE id = $3";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&input.name)
            .bind(&input.email)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result.rows_affected(), "student", id)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.delete_by_id("students", "student", id).await
    }
}

#[async_trait]
impl Repository<Course> for PgStore {
    async fn list(&self) -> Result<Vec<Course>, AppError> {
        let sql = "SELECT id, title, description FROM courses";
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Course>(sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create(&self, input: CourseInput) -> Result<Course, AppError> {
        let sql =
            "INSERT INTO courses (title, description) VALUES ($1, $2) RETURNING id, title, description";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Course>(sql)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, input: CourseInput) -> Result<(), AppError> {
        let sql = "UPDATE courses SET title = $1, description = $2 WHERE id = $3";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(&input.title)
            .bind(&input.description)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result.rows_affected(), "course", id)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.delete_by_id("courses", "course", id).await
    }
}

#[async_trait]
impl Repository<Enrollment> for PgStore {
    async fn list(&self) -> Result<Vec<Enrollment>, AppError> {
        let sql = format!("SELECT {} FROM enrollments", ENROLLMENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Enrollment>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn create(&self, input: NewEnrollment) -> Result<Enrollment, AppError> {
        let sql = format!(
            "INSERT INTO enrollments (student_id, course_id, enrolled_at) VALUES ($1, $2, NOW()) RETURNING {}",
            ENROLLMENT_COLUMNS
        );
        tracing::debug!(sql = %sql, student_id = input.student_id, course_id = input.course_id, "query");
        let row = sqlx::query_as::<_, Enrollment>(&sql)
            .bind(input.student_id)
            .bind(input.course_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    student_id = input.student_id,
                    course_id = input.course_id,
                    "enrollment insert failed"
                );
                e
            })?;
        Ok(row)
    }

    async fn update(&self, id: i32, input: EnrollmentUpdate) -> Result<(), AppError> {
        let sql = "UPDATE enrollments \
                   SET student_id = $1, course_id = $2, enrolled_at = COALESCE($3, enrolled_at) \
                   WHERE id = $4";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(input.student_id)
            .bind(input.course_id)
            .bind(input.enrolled_at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        expect_one_row(result.rows_affected(), "enrollment", id)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.delete_by_id("enrollments", "enrollment", id).await
    }
}
