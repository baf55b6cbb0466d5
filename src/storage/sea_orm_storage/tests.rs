use std::path::{Path, PathBuf};

use futures_util::future::join_all;

use super::SeaOrmStorage;
use super::modules::count_modules_matching;
use crate::config::DatabaseConfig;
use crate::errors::LmsError;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::policy::{AccessFacts, CourseAccess, SubmissionOwnerChain};
use crate::storage::Storage;

// 内存库在连接关闭后即消失，必须只用一个连接
async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config.url, &config)
        .await
        .expect("in-memory sqlite should migrate")
}

// 并发用例需要多个连接，只能用文件库
async fn file_storage(name: &str) -> (SeaOrmStorage, PathBuf) {
    let path = std::env::temp_dir().join(format!(
        "canvas-lite-{name}-{}.db",
        std::process::id()
    ));
    remove_database(&path);
    let config = DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        pool_size: 8,
        timeout: 10,
    };
    let storage = SeaOrmStorage::connect(&config.url, &config)
        .await
        .expect("file sqlite should migrate");
    (storage, path)
}

fn remove_database(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

async fn user(storage: &SeaOrmStorage, email: &str, role: UserRole) -> i64 {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role,
        })
        .await
        .unwrap()
        .id
}

async fn course(storage: &SeaOrmStorage, teacher_id: i64) -> i64 {
    storage
        .create_course(
            teacher_id,
            CreateCourseRequest {
                title: "Intro".to_string(),
                description: None,
            },
        )
        .await
        .unwrap()
        .id
}

async fn assignment(storage: &SeaOrmStorage, course_id: i64) -> i64 {
    storage
        .create_assignment(
            course_id,
            CreateAssignmentRequest {
                title: "First Submission".to_string(),
                instructions: None,
                due_at: None,
                points: Some(10),
            },
        )
        .await
        .unwrap()
        .id
}

fn orders(modules: &[crate::models::modules::entities::Module]) -> Vec<(i64, i32)> {
    modules.iter().map(|m| (m.id, m.order)).collect()
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let storage = memory_storage().await;
    user(&storage, "a@demo.com", UserRole::Student).await;

    let err = storage
        .create_user(CreateUserRequest {
            email: "a@demo.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Teacher,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::Conflict(_)));
    assert_eq!(storage.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_enrollment_is_idempotent() {
    let storage = memory_storage().await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let student = user(&storage, "s@demo.com", UserRole::Student).await;
    let course_id = course(&storage, teacher).await;

    let first = storage.enroll_student(student, course_id).await.unwrap();
    let second = storage.enroll_student(student, course_id).await.unwrap();
    assert_eq!(first.id, second.id);

    let students = storage.list_enrolled_students(course_id).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].email, "s@demo.com");

    let enrolled = storage.list_courses_enrolled(student).await.unwrap();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].id, course_id);
}

#[tokio::test]
async fn test_course_facts() {
    let storage = memory_storage().await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let student = user(&storage, "s@demo.com", UserRole::Student).await;
    let course_id = course(&storage, teacher).await;

    assert_eq!(
        storage
            .course_owner_and_enrollment(course_id, student)
            .await
            .unwrap(),
        Some(CourseAccess {
            teacher_id: teacher,
            enrolled: false
        })
    );

    storage.enroll_student(student, course_id).await.unwrap();
    assert_eq!(
        storage
            .course_owner_and_enrollment(course_id, student)
            .await
            .unwrap()
            .map(|c| c.enrolled),
        Some(true)
    );
    assert_eq!(
        storage
            .course_owner_and_enrollment(course_id + 100, student)
            .await
            .unwrap(),
        None
    );

    let assignment_id = assignment(&storage, course_id).await;
    assert_eq!(
        storage.assignment_course_id(assignment_id).await.unwrap(),
        Some(course_id)
    );
    assert_eq!(storage.assignment_course_id(9999).await.unwrap(), None);
}

#[tokio::test]
async fn test_modules_append_in_order() {
    let storage = memory_storage().await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let course_id = course(&storage, teacher).await;

    let a = storage.create_module(course_id, "A").await.unwrap();
    let b = storage.create_module(course_id, "B").await.unwrap();
    let c = storage.create_module(course_id, "C").await.unwrap();
    assert_eq!((a.order, b.order, c.order), (1, 2, 3));

    let listed = storage.list_modules(course_id).await.unwrap();
    assert_eq!(orders(&listed), vec![(a.id, 1), (b.id, 2), (c.id, 3)]);
}

#[tokio::test]
async fn test_reorder_assigns_positions() {
    let storage = memory_storage().await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let course_id = course(&storage, teacher).await;

    let a = storage.create_module(course_id, "A").await.unwrap().id;
    let b = storage.create_module(course_id, "B").await.unwrap().id;
    let c = storage.create_module(course_id, "C").await.unwrap().id;

    let reordered = storage
        .apply_module_order_atomically(course_id, &[c, a, b])
        .await
        .unwrap();
    assert_eq!(orders(&reordered), vec![(c, 1), (a, 2), (b, 3)]);
    assert_eq!(
        orders(&storage.list_modules(course_id).await.unwrap()),
        vec![(c, 1), (a, 2), (b, 3)]
    );
}

#[tokio::test]
async fn test_reorder_with_foreign_id_changes_nothing() {
    let storage = memory_storage().await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let course_id = course(&storage, teacher).await;
    let other_course = course(&storage, teacher).await;

    let a = storage.create_module(course_id, "A").await.unwrap().id;
    let b = storage.create_module(course_id, "B").await.unwrap().id;
    let foreign = storage.create_module(other_course, "X").await.unwrap().id;
    let before = orders(&storage.list_modules(course_id).await.unwrap());

    assert_eq!(
        count_modules_matching(&storage.db, course_id, &[b, foreign])
            .await
            .unwrap(),
        1
    );

    for list in [vec![b, foreign], vec![b, a, foreign], vec![b], vec![b, b], vec![a, a]] {
        let err = storage
            .apply_module_order_atomically(course_id, &list)
            .await
            .unwrap_err();
        assert!(matches!(err, LmsError::Conflict(_)), "list {list:?}");
        assert_eq!(orders(&storage.list_modules(course_id).await.unwrap()), before);
    }

    // 其他课程不受影响
    assert_eq!(
        orders(&storage.list_modules(other_course).await.unwrap()),
        vec![(foreign, 1)]
    );
}

#[tokio::test]
async fn test_resubmission_preserves_grade() {
    let storage = memory_storage().await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let student = user(&storage, "s@demo.com", UserRole::Student).await;
    let course_id = course(&storage, teacher).await;
    let assignment_id = assignment(&storage, course_id).await;

    let first = storage
        .upsert_submission(assignment_id, student, "hello")
        .await
        .unwrap();
    assert_eq!(first.grade, None);

    let graded = storage
        .grade_submission(first.id, 9, Some("Nice".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(graded.grade, Some(9));
    assert!(graded.graded_at.is_some());

    let resubmitted = storage
        .upsert_submission(assignment_id, student, "world")
        .await
        .unwrap();
    assert_eq!(resubmitted.id, first.id);
    assert_eq!(resubmitted.content, "world");
    assert_eq!(resubmitted.grade, Some(9));
    assert_eq!(resubmitted.feedback.as_deref(), Some("Nice"));
    assert_eq!(resubmitted.graded_at, graded.graded_at);

    // 不带反馈的重新评分保留原反馈
    let regraded = storage
        .grade_submission(first.id, 7, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(regraded.grade, Some(7));
    assert_eq!(regraded.feedback.as_deref(), Some("Nice"));

    let listed = storage
        .list_submissions_for_assignment(assignment_id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].student.email, "s@demo.com");

    assert_eq!(
        storage.submission_owner_chain(first.id).await.unwrap(),
        Some(SubmissionOwnerChain {
            student_id: student,
            course_teacher_id: teacher,
        })
    );
    assert!(storage.grade_submission(9999, 1, None).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_submissions_merge() {
    let (storage, path) = file_storage("concurrent-submit").await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let course_id = course(&storage, teacher).await;

    for i in 0..20 {
        let student = user(&storage, &format!("s{i}@demo.com"), UserRole::Student).await;
        let assignment_id = assignment(&storage, course_id).await;

        let (a, b) = tokio::join!(
            storage.upsert_submission(assignment_id, student, "from tab A"),
            storage.upsert_submission(assignment_id, student, "from tab B"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_eq!(a.id, b.id, "pair {i} produced two rows");

        let listed = storage
            .list_submissions_for_assignment(assignment_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }

    remove_database(&path);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resubmission_keeps_grade() {
    let (storage, path) = file_storage("concurrent-regrade").await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let student = user(&storage, "s@demo.com", UserRole::Student).await;
    let course_id = course(&storage, teacher).await;
    let assignment_id = assignment(&storage, course_id).await;

    let first = storage
        .upsert_submission(assignment_id, student, "v1")
        .await
        .unwrap();
    storage
        .grade_submission(first.id, 7, Some("ok".to_string()))
        .await
        .unwrap();

    let contents: Vec<String> = (2..10).map(|i| format!("v{i}")).collect();
    let results = join_all(
        contents
            .iter()
            .map(|c| storage.upsert_submission(assignment_id, student, c)),
    )
    .await;
    for result in results {
        let saved = result.unwrap();
        assert_eq!(saved.id, first.id);
        assert_eq!(saved.grade, Some(7));
        assert_eq!(saved.feedback.as_deref(), Some("ok"));
    }

    remove_database(&path);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_module_appends_stay_dense() {
    let (storage, path) = file_storage("concurrent-modules").await;
    let teacher = user(&storage, "t@demo.com", UserRole::Teacher).await;
    let course_id = course(&storage, teacher).await;

    let titles: Vec<String> = (0..12).map(|i| format!("Week {i}")).collect();
    let results = join_all(titles.iter().map(|t| storage.create_module(course_id, t))).await;
    for result in results {
        result.unwrap();
    }

    let mut positions: Vec<i32> = storage
        .list_modules(course_id)
        .await
        .unwrap()
        .iter()
        .map(|m| m.order)
        .collect();
    positions.sort_unstable();
    assert_eq!(positions, (1..=12).collect::<Vec<i32>>());

    remove_database(&path);
}

#[tokio::test]
async fn test_module_write_on_missing_course_is_not_found() {
    let storage = memory_storage().await;
    let err = storage.create_module(404, "Lost").await.unwrap_err();
    assert!(matches!(err, LmsError::NotFound(_)));

    let err = storage
        .apply_module_order_atomically(404, &[1])
        .await
        .unwrap_err();
    assert!(matches!(err, LmsError::NotFound(_)));
}
