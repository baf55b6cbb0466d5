use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use super::configure_api;
use crate::config::DatabaseConfig;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::json_error_handler;

async fn memory_storage() -> Arc<dyn Storage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config.url, &config)
        .await
        .expect("in-memory sqlite should migrate");
    Arc::new(storage)
}

macro_rules! test_app {
    () => {{
        let storage = memory_storage().await;
        test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new(storage))
                .configure(configure_api),
        )
        .await
    }};
}

// 发送请求并解析 JSON 响应
macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! register {
    ($app:expr, $email:expr, $role:expr) => {{
        let (status, body) = call!(
            $app,
            test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .set_json(json!({ "email": $email, "password": "Password123", "role": $role }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string()
    }};
}

#[actix_web::test]
async fn test_health_needs_no_token() {
    let app = test_app!();
    let (status, body) = call!(app, test::TestRequest::get().uri("/api/v1/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = test_app!();
    let (status, _) = call!(app, test::TestRequest::get().uri("/api/v1/courses"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/me")
            .insert_header(bearer("not-a-jwt"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_authentication_precedes_path_validation() {
    let app = test_app!();
    let (status, _) = call!(app, test::TestRequest::get().uri("/api/v1/courses/abc"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let teacher = register!(app, "t@example.com", "teacher");
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/courses/abc")
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_login_failure_is_generic() {
    let app = test_app!();
    register!(app, "someone@example.com", "student");

    let (wrong_password, body_a) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "someone@example.com", "password": "WrongPass1" }))
    );
    let (unknown_email, body_b) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": "nobody@example.com", "password": "Password123" }))
    );
    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email, StatusCode::UNAUTHORIZED);
    assert_eq!(body_a["message"], body_b["message"]);
}

#[actix_web::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app!();
    register!(app, "dup@example.com", "student");
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({ "email": "dup@example.com", "password": "Password123" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_invalid_path_id_is_bad_request() {
    let app = test_app!();
    let teacher = register!(app, "t@example.com", "teacher");
    for uri in ["/api/v1/courses/abc", "/api/v1/courses/0", "/api/v1/courses/-4"] {
        let (status, _) = call!(
            app,
            test::TestRequest::get().uri(uri).insert_header(bearer(&teacher))
        );
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[actix_web::test]
async fn test_student_cannot_create_course() {
    let app = test_app!();
    let student = register!(app, "s@example.com", "student");
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .insert_header(bearer(&student))
            .set_json(json!({ "title": "Nope" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Requires role TEACHER");

    // 拒绝的请求不能留下课程行
    let teacher = register!(app, "t@example.com", "teacher");
    for token in [&student, &teacher] {
        let (status, body) = call!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/courses")
                .insert_header(bearer(token))
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["taught"], json!([]));
        assert_eq!(body["data"]["enrolled"], json!([]));
    }
}

#[actix_web::test]
async fn test_missing_course_is_not_found_for_everyone() {
    let app = test_app!();
    let teacher = register!(app, "t@example.com", "teacher");
    let student = register!(app, "s@example.com", "student");
    for token in [&teacher, &student] {
        let (status, _) = call!(
            app,
            test::TestRequest::get()
                .uri("/api/v1/courses/999/modules")
                .insert_header(bearer(token))
        );
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[actix_web::test]
async fn test_course_lifecycle() {
    let app = test_app!();
    let teacher = register!(app, "teacher@example.com", "teacher");
    let other_teacher = register!(app, "other@example.com", "teacher");
    let student = register!(app, "student@example.com", "student");
    let outsider = register!(app, "outsider@example.com", "student");

    // 创建课程
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({ "title": "Systems 101", "description": "Intro" }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let course_id = body["data"]["id"].as_i64().expect("course id");

    // 未选课学生无法读取
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 其他教师不能选课
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/enroll"))
            .insert_header(bearer(&other_teacher))
            .set_json(json!({ "student_email": "student@example.com" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/enroll"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "student_email": "student@example.com" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/enrollments"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["students"][0]["email"], "student@example.com");

    // 模块追加后重排
    let mut module_ids = Vec::new();
    for title in ["Week 1", "Week 2", "Week 3"] {
        let (status, body) = call!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{course_id}/modules"))
                .insert_header(bearer(&teacher))
                .set_json(json!({ "title": title }))
        );
        assert_eq!(status, StatusCode::CREATED);
        module_ids.push(body["data"]["id"].as_i64().expect("module id"));
    }
    let reversed: Vec<i64> = module_ids.iter().rev().copied().collect();
    let (status, _) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/courses/{course_id}/modules/reorder"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "module_ids_in_order": reversed }))
    );
    assert_eq!(status, StatusCode::OK);

    // 部分列表被拒绝，顺序保持不变
    let (status, _) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/courses/{course_id}/modules/reorder"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "module_ids_in_order": [module_ids[0]] }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/modules"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<i64> = body["data"]["modules"]
        .as_array()
        .expect("modules")
        .iter()
        .filter_map(|m| m["id"].as_i64())
        .collect();
    assert_eq!(listed, reversed);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/courses/{course_id}/modules"))
            .insert_header(bearer(&outsider))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 学生的课程列表
    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/courses/me")
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["courses"][0]["id"], course_id);
}

#[actix_web::test]
async fn test_submission_and_grading() {
    let app = test_app!();
    let teacher = register!(app, "teacher@example.com", "teacher");
    let student = register!(app, "student@example.com", "student");
    let classmate = register!(app, "classmate@example.com", "student");

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/courses")
            .insert_header(bearer(&teacher))
            .set_json(json!({ "title": "Writing" }))
    );
    let course_id = body["data"]["id"].as_i64().expect("course id");
    for email in ["student@example.com", "classmate@example.com"] {
        let (status, _) = call!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/v1/courses/{course_id}/enroll"))
                .insert_header(bearer(&teacher))
                .set_json(json!({ "student_email": email }))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/courses/{course_id}/assignments"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "title": "Essay", "points": 100 }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let assignment_id = body["data"]["id"].as_i64().expect("assignment id");

    // 尚未提交
    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/assignments/{assignment_id}/my-submission"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["submission"].is_null());

    // 教师不能提交
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/{assignment_id}/submissions"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "content": "teacher answer" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/{assignment_id}/submissions"))
            .insert_header(bearer(&student))
            .set_json(json!({ "content": "   " }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/{assignment_id}/submissions"))
            .insert_header(bearer(&student))
            .set_json(json!({ "content": "first draft" }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let submission_id = body["data"]["id"].as_i64().expect("submission id");

    let (status, body) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/submissions/{submission_id}/grade"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "grade": 88, "feedback": "Good structure" }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["grade"], 88);

    // 重新提交只覆盖内容，保留评分
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/assignments/{assignment_id}/submissions"))
            .insert_header(bearer(&student))
            .set_json(json!({ "content": "final draft" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], submission_id);
    assert_eq!(body["data"]["content"], "final draft");
    assert_eq!(body["data"]["grade"], 88);
    assert_eq!(body["data"]["feedback"], "Good structure");

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/assignments/{assignment_id}/submissions"))
            .insert_header(bearer(&teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["submissions"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        body["data"]["submissions"][0]["student"]["email"],
        "student@example.com"
    );

    // 只有提交者本人可以读取单个提交
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/submissions/{submission_id}"))
            .insert_header(bearer(&student))
    );
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/submissions/{submission_id}"))
            .insert_header(bearer(&classmate))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call!(
        app,
        test::TestRequest::patch()
            .uri(&format!("/api/v1/submissions/{submission_id}/grade"))
            .insert_header(bearer(&teacher))
            .set_json(json!({ "grade": -1 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call!(
        app,
        test::TestRequest::patch()
            .uri("/api/v1/submissions/9999/grade")
            .insert_header(bearer(&teacher))
            .set_json(json!({ "grade": 50 }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}
