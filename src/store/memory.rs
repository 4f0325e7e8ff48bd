//! In-process store for handler tests. Mirrors the Postgres semantics: generated ids,
//! server-side enrollment timestamps, not-found on zero affected rows.

use super::{expect_one_row, HealthCheck, Repository};
use crate::error::AppError;
use crate::models::{
    Course, CourseInput, Enrollment, EnrollmentUpdate, NewEnrollment, Student, StudentInput,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

struct Table<E> {
    rows: Vec<E>,
    next_id: i32,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Table { rows: Vec::new(), next_id: 1 }
    }
}

impl<E> Table<E> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    students: Mutex<Table<Student>>,
    courses: Mutex<Table<Course>>,
    enrollments: Mutex<Table<Enrollment>>,
    offline: AtomicBool,
    latency_ms: AtomicU64,
}

impl MemoryStore {
    /// Make every operation fail as if the database connection were lost.
    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Delay every operation, standing in for a slow database round trip.
    pub(crate) fn set_latency(&self, latency: Duration) {
        self.latency_ms.store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    async fn check_online(&self) -> Result<(), AppError> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Db(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.check_online().await
    }
}

#[async_trait]
impl Repository<Student> for MemoryStore {
    async fn list(&self) -> Result<Vec<Student>, AppError> {
        self.check_online().await?;
        Ok(self.students.lock().unwrap().rows.clone())
    }

    async fn create(&self, input: StudentInput) -> Result<Student, AppError> {
        self.check_online().await?;
        let mut table = self.students.lock().unwrap();
        let row = Student { id: table.allocate_id(), name: input.name, email: input.email };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, input: StudentInput) -> Result<(), AppError> {
        self.check_online().await?;
        let mut table = self.students.lock().unwrap();
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|r| r.id == id) {
            row.name = input.name.clone();
            row.email = input.email.clone();
            affected += 1;
        }
        expect_one_row(affected, "student", id)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.check_online().await?;
        let mut table = self.students.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        expect_one_row((before - table.rows.len()) as u64, "student", id)
    }
}

#[async_trait]
impl Repository<Course> for MemoryStore {
    async fn list(&self) -> Result<Vec<Course>, AppError> {
        self.check_online().await?;
        Ok(self.courses.lock().unwrap().rows.clone())
    }

    async fn create(&self, input: CourseInput) -> Result<Course, AppError> {
        self.check_online().await?;
        let mut table = self.courses.lock().unwrap();
        let row = Course {
            id: table.allocate_id(),
            title: input.title,
            description: input.description,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, input: CourseInput) -> Result<(), AppError> {
        self.check_online().await?;
        let mut table = self.courses.lock().unwrap();
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|r| r.id == id) {
            row.title = input.title.clone();
            row.description = input.description.clone();
            affected += 1;
        }
        expect_one_row(affected, "course", id)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.check_online().await?;
        let mut table = self.courses.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        expect_one_row((before - table.rows.len()) as u64, "course", id)
    }
}

#[async_trait]
impl Repository<Enrollment> for MemoryStore {
    async fn list(&self) -> Result<Vec<Enrollment>, AppError> {
        self.check_online().await?;
        Ok(self.enrollments.lock().unwrap().rows.clone())
    }

    async fn create(&self, input: NewEnrollment) -> Result<Enrollment, AppError> {
        self.check_online().await?;
        let mut table = self.enrollments.lock().unwrap();
        let row = Enrollment {
            id: table.allocate_id(),
            student_id: input.student_id,
            course_id: input.course_id,
            enrolled_at: Utc::now(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, input: EnrollmentUpdate) -> Result<(), AppError> {
        self.check_online().await?;
        let mut table = self.enrollments.lock().unwrap();
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|r| r.id == id) {
            row.student_id = input.student_id;
            row.course_id = input.course_id;
            if let Some(at) = input.enrolled_at {
                row.enrolled_at = at;
            }
            affected += 1;
        }
        expect_one_row(affected, "enrollment", id)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.check_online().await?;
        let mut table = self.enrollments.lock().unwrap();
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        expect_one_row((before - table.rows.len()) as u64, "enrollment", id)
    }
}
