use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;

const DEMO_TEACHER_EMAIL: &str = "teacher@demo.com";
const DEMO_STUDENT_EMAIL: &str = "student@demo.com";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

// 写入演示数据：一名教师、一名学生、一门课程及其模块与作业
async fn seed_demo_data(storage: &Arc<dyn Storage>) -> Result<()> {
    let teacher_password =
        std::env::var("DEMO_TEACHER_PASSWORD").unwrap_or_else(|_| "Teacher123!".to_string());
    let student_password =
        std::env::var("DEMO_STUDENT_PASSWORD").unwrap_or_else(|_| "Student123!".to_string());

    let teacher = storage
        .create_user(CreateUserRequest {
            email: DEMO_TEACHER_EMAIL.to_string(),
            password_hash: hash_password(&teacher_password)?,
            role: UserRole::Teacher,
        })
        .await?;
    let student = storage
        .create_user(CreateUserRequest {
            email: DEMO_STUDENT_EMAIL.to_string(),
            password_hash: hash_password(&student_password)?,
            role: UserRole::Student,
        })
        .await?;

    let course = storage
        .create_course(
            teacher.id,
            CreateCourseRequest {
                title: "Intro to Canvas-Lite".to_string(),
                description: Some("A demo course created on first startup.".to_string()),
            },
        )
        .await?;
    storage
        .create_module(course.id, "Week 1: Getting Started")
        .await?;
    storage
        .create_assignment(
            course.id,
            CreateAssignmentRequest {
                title: "First Submission".to_string(),
                instructions: Some("Introduce yourself in a few sentences.".to_string()),
                due_at: None,
                points: Some(10),
            },
        )
        .await?;
    storage.enroll_student(student.id, course.id).await?;

    info!(
        "Demo data created (teacher: {}, student: {}, course ID: {})",
        teacher.email, student.email, course.id
    );
    Ok(())
}

/// 空库时按配置写入演示数据
async fn seed_demo(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Database already has {} user(s), skipping demo seed", count);
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating demo data...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping demo seed", e);
            return;
        }
    }

    if let Err(e) = seed_demo_data(storage).await {
        warn!("Failed to create demo data: {}", e);
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if config.app.seed_demo {
        seed_demo(&storage).await;
    }

    Ok(StartupContext { storage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::policy::{AccessFacts, AccessPolicy, Actor};
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn memory_storage() -> Arc<dyn Storage> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        let storage = SeaOrmStorage::connect(&config.url, &config)
            .await
            .expect("in-memory sqlite");
        Arc::new(storage)
    }

    #[tokio::test]
    async fn test_seed_demo_creates_enrolled_student() {
        let storage = memory_storage().await;
        seed_demo(&storage).await;

        let teacher = storage
            .get_user_by_email(DEMO_TEACHER_EMAIL)
            .await
            .unwrap()
            .expect("demo teacher");
        let student = storage
            .get_user_by_email(DEMO_STUDENT_EMAIL)
            .await
            .unwrap()
            .expect("demo student");
        assert_eq!(teacher.role, UserRole::Teacher);
        assert_eq!(student.role, UserRole::Student);

        let courses = storage.list_courses_enrolled(student.id).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].teacher_id, teacher.id);

        let access = storage
            .course_owner_and_enrollment(courses[0].id, student.id)
            .await
            .unwrap()
            .expect("course exists");
        assert!(access.enrolled);

        let decision = AccessPolicy::new(storage.as_ref())
            .can_read_modules(&Actor::from(&student), courses[0].id)
            .await
            .unwrap();
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn test_seed_demo_skips_non_empty_database() {
        let storage = memory_storage().await;
        seed_demo(&storage).await;
        seed_demo(&storage).await;
        assert_eq!(storage.count_users().await.unwrap(), 2);
    }
}
