//! HTTP 流程测试
//!
//! 使用内存 SQLite 和内存 Blob 存储，覆盖登录、班级创建、名单导入、讲义上传和下载。

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;
use std::sync::Arc;

use rust_oes_next::blobs::{BlobStore, MemoryBlobStore};
use rust_oes_next::config::AppConfig;
use rust_oes_next::models::classes::entities::Class;
use rust_oes_next::models::classes::requests::CreateClassRequest;
use rust_oes_next::models::modules::requests::CreateModuleRequest;
use rust_oes_next::models::students::entities::Student;
use rust_oes_next::models::students::requests::CreateStudentRequest;
use rust_oes_next::models::users::entities::{User, UserType};
use rust_oes_next::models::users::requests::CreateUserRequest;
use rust_oes_next::routes;
use rust_oes_next::storage::{Storage, create_storage};
use rust_oes_next::utils::flash::FLASH_COOKIE;
use rust_oes_next::utils::session::SESSION_COOKIE;
use rust_oes_next::utils::{
    SessionIdentity, SessionUtils, form_error_handler, path_error_handler,
};
use rust_oes_next::views::{JsonViewRenderer, ViewRenderer};

const TEST_SECRET: &str = "integration-test-secret";
const BOUNDARY: &str = "----oes-test-boundary";
const MAX_PDF: usize = 5 * 1024 * 1024;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestContext {
    storage: Arc<dyn Storage>,
    blobs: Arc<MemoryBlobStore>,
    config: AppConfig,
}

async fn setup_with(enforce: bool) -> TestContext {
    let mut config = AppConfig::default();
    config.database.url = ":memory:".to_string();
    config.database.pool_size = 1;
    config.upload.backend = "memory".to_string();
    config.session.secret = TEST_SECRET.to_string();
    config.session.enforce = enforce;

    let storage = create_storage(&config.database)
        .await
        .expect("Failed to create test storage");

    TestContext {
        storage,
        blobs: Arc::new(MemoryBlobStore::new()),
        config,
    }
}

async fn setup() -> TestContext {
    setup_with(true).await
}

macro_rules! init_app {
    ($ctx:expr) => {{
        let blobs: Arc<dyn BlobStore> = $ctx.blobs.clone();
        let renderer: Arc<dyn ViewRenderer> = Arc::new(JsonViewRenderer);
        test::init_service(
            App::new()
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .app_data(web::FormConfig::default().error_handler(form_error_handler))
                .app_data(web::Data::new($ctx.storage.clone()))
                .app_data(web::Data::new(blobs))
                .app_data(web::Data::new(renderer))
                .app_data(web::Data::new($ctx.config.clone()))
                .configure(routes::configure_routes),
        )
        .await
    }};
}

async fn create_teacher(ctx: &TestContext, username: &str) -> User {
    ctx.storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            user_type: UserType::Teacher,
        })
        .await
        .unwrap()
}

async fn create_class(ctx: &TestContext, teacher: &User, name: &str) -> Class {
    ctx.storage
        .create_class(CreateClassRequest {
            name: name.to_string(),
            subject: "Physics".to_string(),
            teacher_id: teacher.id,
        })
        .await
        .unwrap()
}

async fn create_student(ctx: &TestContext, class: &Class, name: &str) -> Student {
    ctx.storage
        .create_student(CreateStudentRequest {
            name: name.to_string(),
            email: format!("{}@student.test", name.to_lowercase()),
            class_id: class.id,
        })
        .await
        .unwrap()
}

fn session_cookie(ctx: &TestContext, identity: SessionIdentity) -> Cookie<'static> {
    let token = SessionUtils::issue(identity, &ctx.config).unwrap();
    SessionUtils::create_session_cookie(&token, &ctx.config)
}

fn teacher_cookie(ctx: &TestContext, user: &User) -> Cookie<'static> {
    session_cookie(ctx, SessionIdentity::Teacher { user_id: user.id })
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// 构造 multipart/form-data 请求体
fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> test::TestRequest {
    let (content_type, body) = multipart_body(parts);
    test::TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(body)
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn response_cookie<B>(
    resp: &actix_web::dev::ServiceResponse<B>,
    name: &str,
) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

fn flashes(view: &Value) -> Vec<String> {
    view["flashes"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Teacher Flow
// =============================================================================

#[actix_web::test]
async fn test_index_renders_landing_view() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/").to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["template"], "index");
    assert_eq!(view["context"]["system_name"], "OES");
}

#[actix_web::test]
async fn test_teacher_login_redirects_to_dashboard() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/teacher_login")
        .set_form([("username", "alice"), ("email", "alice@school.test")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/teacher_dashboard/{}", teacher.id));
    let cookie = response_cookie(&resp, SESSION_COOKIE).expect("session cookie");
    assert!(cookie.http_only().unwrap_or(false));
    assert_eq!(
        SessionUtils::verify(cookie.value(), &ctx.config).unwrap(),
        SessionIdentity::Teacher {
            user_id: teacher.id
        }
    );
}

#[actix_web::test]
async fn test_teacher_login_mismatch_rerenders_form() {
    let ctx = setup().await;
    create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    for (username, email) in [
        ("alice", "wrong@school.test"),
        ("mallory", "alice@school.test"),
        ("", ""),
    ] {
        let req = test::TestRequest::post()
            .uri("/teacher_login")
            .set_form([("username", username), ("email", email)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(response_cookie(&resp, SESSION_COOKIE).is_none());

        let view: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(view["template"], "teacher_login");
        assert_eq!(flashes(&view), vec!["Invalid username or email."]);
    }

    assert_eq!(ctx.storage.count_users().await.unwrap(), 1);
}

#[actix_web::test]
async fn test_dashboard_requires_session() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/teacher_dashboard/{}", teacher.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/teacher_login");

    // 提示消息在下一次渲染时出现，并被清除
    let flash = response_cookie(&resp, FLASH_COOKIE).expect("flash cookie");
    let req = test::TestRequest::get()
        .uri("/teacher_login")
        .cookie(flash)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cleared = response_cookie(&resp, FLASH_COOKIE).expect("flash removal cookie");
    assert!(cleared.value().is_empty());
    let view: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(flashes(&view), vec!["Please log in first."]);
}

#[actix_web::test]
async fn test_dashboard_rejects_other_teacher() {
    let ctx = setup().await;
    let alice = create_teacher(&ctx, "alice").await;
    let bob = create_teacher(&ctx, "bob").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/teacher_dashboard/{}", alice.id))
        .cookie(teacher_cookie(&ctx, &bob))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let view: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(view["template"], "error");
    assert_eq!(view["context"]["code"], "E013");
}

#[actix_web::test]
async fn test_dashboard_is_stable_across_reads() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    create_class(&ctx, &teacher, "Physics A").await;
    create_class(&ctx, &teacher, "Physics B").await;
    let app = init_app!(ctx);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri(&format!("/teacher_dashboard/{}", teacher.id))
            .cookie(teacher_cookie(&ctx, &teacher))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        bodies.push(test::read_body(resp).await);
    }
    assert_eq!(bodies[0], bodies[1]);

    let view: Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(view["template"], "teacher_dashboard");
    let names: Vec<_> = view["context"]["classes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Physics A", "Physics B"]);
}

#[actix_web::test]
async fn test_non_numeric_id_is_not_found() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    for uri in [
        "/teacher_dashboard/abc",
        "/student_dashboard/1/xyz",
        "/module_pdf/none",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        // module_pdf 需要先登录
        if uri.starts_with("/module_pdf") {
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        } else {
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }
}

#[actix_web::test]
async fn test_unenforced_sessions_trust_path() {
    let ctx = setup_with(false).await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/teacher_dashboard/{}", teacher.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_clears_session() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let cookie = response_cookie(&resp, SESSION_COOKIE).expect("session removal cookie");
    assert!(cookie.value().is_empty());
}

// =============================================================================
// Class Creation
// =============================================================================

#[actix_web::test]
async fn test_create_class_imports_roster() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let roster = b"name,email,notes\nAda,ada@x.org,first\nBob,bob@x.org,\nCyd,cyd@x.org,x\n";
    let req = multipart_request(
        &format!("/create_class/{}", teacher.id),
        &[
            Part::Text("name", "Physics 101"),
            Part::Text("subject", "Physics"),
            Part::File("csv_file", "roster.csv", roster),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/teacher_dashboard/{}", teacher.id));

    let class = ctx
        .storage
        .find_class_by_name("Physics 101")
        .await
        .unwrap()
        .expect("class created");
    assert_eq!(class.teacher_id, teacher.id);

    let students = ctx.storage.list_students_by_class(class.id).await.unwrap();
    let pairs: Vec<_> = students
        .iter()
        .map(|s| (s.name.as_str(), s.email.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("Ada", "ada@x.org"), ("Bob", "bob@x.org"), ("Cyd", "cyd@x.org")]
    );
    // 原始名单文件也被保存
    assert_eq!(ctx.blobs.len(), 1);
}

#[actix_web::test]
async fn test_create_class_without_roster() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let req = multipart_request(
        &format!("/create_class/{}", teacher.id),
        &[
            Part::Text("name", "Chem"),
            Part::Text("subject", "Chemistry"),
            Part::File("csv_file", "", b""),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let class = ctx.storage.find_class_by_name("Chem").await.unwrap().unwrap();
    assert!(
        ctx.storage
            .list_students_by_class(class.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(ctx.blobs.is_empty());
}

#[actix_web::test]
async fn test_duplicate_class_name_rerenders_form() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    create_class(&ctx, &teacher, "Physics 101").await;
    let app = init_app!(ctx);

    let req = multipart_request(
        &format!("/create_class/{}", teacher.id),
        &[
            Part::Text("name", "Physics 101"),
            Part::Text("subject", "Physics"),
            Part::File("csv_file", "roster.csv", b"name,email\nAda,ada@x.org\n"),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let view: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(view["template"], "create_class");
    assert_eq!(flashes(&view), vec!["A class with this name already exists."]);

    let classes = ctx.storage.list_classes_by_teacher(teacher.id).await.unwrap();
    assert_eq!(classes.len(), 1);
    assert!(
        ctx.storage
            .list_students_by_class(classes[0].id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[actix_web::test]
async fn test_malformed_roster_reports_row() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let roster = b"name,email\nAda,ada@x.org\nBob\nCyd,cyd@x.org\n";
    let req = multipart_request(
        &format!("/create_class/{}", teacher.id),
        &[
            Part::Text("name", "Bio"),
            Part::Text("subject", "Biology"),
            Part::File("csv_file", "roster.csv", roster),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let flash = response_cookie(&resp, FLASH_COOKIE).expect("flash cookie");

    let class = ctx.storage.find_class_by_name("Bio").await.unwrap().unwrap();
    let students = ctx.storage.list_students_by_class(class.id).await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Ada");

    let req = test::TestRequest::get()
        .uri(&format!("/teacher_dashboard/{}", teacher.id))
        .cookie(teacher_cookie(&ctx, &teacher))
        .cookie(flash)
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    let messages = flashes(&view);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("row 3"), "{}", messages[0]);
}

#[actix_web::test]
async fn test_create_class_requires_fields() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let req = multipart_request(
        &format!("/create_class/{}", teacher.id),
        &[Part::Text("name", ""), Part::Text("subject", "Physics")],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(flashes(&view), vec!["Class name and subject are required."]);
    assert!(
        ctx.storage
            .list_classes_by_teacher(teacher.id)
            .await
            .unwrap()
            .is_empty()
    );
}

// =============================================================================
// Notes Upload
// =============================================================================

#[actix_web::test]
async fn test_upload_notes_processes_slots_in_order() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let class = create_class(&ctx, &teacher, "Physics 101").await;
    let app = init_app!(ctx);

    // 字段按倒序提交
    let req = multipart_request(
        &format!("/upload_notes/{}/{}", class.id, teacher.id),
        &[
            Part::File("module3_notes", "c.txt", b"third"),
            Part::File("module2_notes", "b.txt", b"hello"),
            Part::File("module1_notes", "", b""),
            Part::Text("name", "Week 1"),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/teacher_dashboard/{}", teacher.id));

    let modules = ctx.storage.list_modules_by_class(class.id).await.unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "Week 1");
    assert_eq!(modules[0].notes, "Module2:\nhello\n\nModule3:\nthird\n\n");
    assert!(modules[0].pdf_file.is_none());
}

#[actix_web::test]
async fn test_oversized_pdf_is_rejected() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let class = create_class(&ctx, &teacher, "Physics 101").await;
    let app = init_app!(ctx);

    let big = vec![b'x'; MAX_PDF + 1];
    let req = multipart_request(
        &format!("/upload_notes/{}/{}", class.id, teacher.id),
        &[
            Part::Text("name", "Week 2"),
            Part::File("module1_notes", "a.txt", b"intro"),
            Part::File("module2_pdf", "big.pdf", &big),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/upload_notes/{}/{}", class.id, teacher.id)
    );
    let flash = response_cookie(&resp, FLASH_COOKIE).expect("flash cookie");

    let modules = ctx.storage.list_modules_by_class(class.id).await.unwrap();
    assert_eq!(modules.len(), 1);
    assert!(modules[0].pdf_file.is_none());
    assert_eq!(modules[0].notes, "Module1:\nintro\n\n");
    assert!(ctx.blobs.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/upload_notes/{}/{}", class.id, teacher.id))
        .cookie(teacher_cookie(&ctx, &teacher))
        .cookie(flash)
        .to_request();
    let view: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(view["template"], "upload_notes");
    assert_eq!(flashes(&view), vec!["PDF file is too large."]);
}

#[actix_web::test]
async fn test_pdf_upload_and_download() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let class = create_class(&ctx, &teacher, "Physics 101").await;
    let other_class = create_class(&ctx, &teacher, "Physics 102").await;
    let student = create_student(&ctx, &class, "Ada").await;
    let outsider = create_student(&ctx, &other_class, "Eve").await;
    let app = init_app!(ctx);

    let pdf = b"%PDF-1.4 lecture".to_vec();
    let req = multipart_request(
        &format!("/upload_notes/{}/{}", class.id, teacher.id),
        &[
            Part::Text("name", "Week 3"),
            Part::File("module1_pdf", "lecture.pdf", &pdf),
        ],
    )
    .cookie(teacher_cookie(&ctx, &teacher))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let module = ctx.storage.list_modules_by_class(class.id).await.unwrap()[0].clone();
    assert_eq!(module.pdf_file.as_deref(), Some("lecture.pdf"));
    let key = module.pdf_blob_key.clone().unwrap();
    assert_eq!(ctx.blobs.read(&key).await.unwrap(), pdf);

    let req = test::TestRequest::get()
        .uri(&format!("/module_pdf/{}", module.id))
        .cookie(session_cookie(
            &ctx,
            SessionIdentity::Student {
                student_id: student.id,
                class_id: class.id,
            },
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await.as_ref(), pdf.as_slice());

    let req = test::TestRequest::get()
        .uri(&format!("/module_pdf/{}", module.id))
        .cookie(session_cookie(
            &ctx,
            SessionIdentity::Student {
                student_id: outsider.id,
                class_id: other_class.id,
            },
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_upload_to_missing_class_is_not_found() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/upload_notes/999/{}", teacher.id))
        .cookie(teacher_cookie(&ctx, &teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Student Flow
// =============================================================================

#[actix_web::test]
async fn test_student_login_flow() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let class = create_class(&ctx, &teacher, "Physics 101").await;
    let student = create_student(&ctx, &class, "Ada").await;
    let app = init_app!(ctx);

    let cases = [
        ("Physics 999", "Ada", "ada@student.test", "Invalid class name."),
        (
            "Physics 101",
            "Ada",
            "wrong@student.test",
            "Invalid student name or email.",
        ),
    ];
    for (class_name, name, email, message) in cases {
        let req = test::TestRequest::post()
            .uri("/student_login")
            .set_form([
                ("class_name", class_name),
                ("student_name", name),
                ("student_email", email),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let view: Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
        assert_eq!(view["template"], "student_login");
        assert_eq!(flashes(&view), vec![message]);
    }

    let req = test::TestRequest::post()
        .uri("/student_login")
        .set_form([
            ("class_name", "Physics 101"),
            ("student_name", "Ada"),
            ("student_email", "ada@student.test"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&resp),
        format!("/student_dashboard/{}/{}", class.id, student.id)
    );
    let cookie = response_cookie(&resp, SESSION_COOKIE).expect("session cookie");

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri(&format!("/student_dashboard/{}/{}", class.id, student.id))
            .cookie(cookie.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        bodies.push(test::read_body(resp).await);
    }
    assert_eq!(bodies[0], bodies[1]);
    let view: Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(view["template"], "student_dashboard");
    assert_eq!(view["context"]["student"]["name"], "Ada");
}

#[actix_web::test]
async fn test_student_cannot_open_other_dashboard() {
    let ctx = setup().await;
    let teacher = create_teacher(&ctx, "alice").await;
    let class = create_class(&ctx, &teacher, "Physics 101").await;
    let ada = create_student(&ctx, &class, "Ada").await;
    let bob = create_student(&ctx, &class, "Bob").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/student_dashboard/{}/{}", class.id, bob.id))
        .cookie(session_cookie(
            &ctx,
            SessionIdentity::Student {
                student_id: ada.id,
                class_id: class.id,
            },
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 教师会话不能访问学生主页
    let req = test::TestRequest::get()
        .uri(&format!("/student_dashboard/{}/{}", class.id, ada.id))
        .cookie(teacher_cookie(&ctx, &teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_login_forms_are_stable() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    for uri in ["/teacher_login", "/student_login"] {
        let first = test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request())
            .await;
        let second =
            test::call_and_read_body(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(first, second);
    }
}
