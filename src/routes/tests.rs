//! HTTP 端到端测试，使用内存 SQLite 与 Moka 缓存

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::config::DatabaseConfig;
use crate::models::AppStartTime;
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::{json_error_handler, query_error_handler};

const BOUNDARY: &str = "dashboard-test-boundary";

async fn test_app() -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>
{
    let storage = SeaOrmStorage::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    })
    .await
    .expect("in-memory database should start");
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));

    test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .app_data(web::Data::new(cache))
            .app_data(web::Data::new(AppStartTime {
                start_datetime: chrono::Utc::now(),
            }))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .configure(super::configure_student_routes)
            .configure(super::configure_subject_routes)
            .configure(super::configure_grade_routes)
            .configure(super::configure_attendance_routes)
            .configure(super::configure_activity_routes)
            .configure(super::configure_upload_routes)
            .configure(super::configure_dashboard_routes)
            .configure(super::configure_system_routes),
    )
    .await
}

async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

fn multipart_body(file_name: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

// 上传接口按 IP 限流，不同测试使用不同的来源地址
async fn upload_file<S>(
    app: &S,
    kind: &str,
    file_name: &str,
    content: &[u8],
    peer: &str,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/upload?kind={kind}"))
        .peer_addr(peer.parse().unwrap())
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(file_name, content))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

async fn upload_csv<S>(app: &S, kind: &str, content: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    upload_file(
        app,
        kind,
        &format!("{kind}.csv"),
        content.as_bytes(),
        "192.0.2.1:5000",
    )
    .await
}

async fn put_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::put().uri(uri).set_json(body).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

async fn delete<S>(app: &S, uri: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let req = test::TestRequest::delete().uri(uri).to_request();
    test::call_service(app, req).await.status()
}

fn header<'a>(resp: &'a ServiceResponse, name: &str) -> &'a str {
    resp.headers().get(name).unwrap().to_str().unwrap()
}

fn item_names(body: &Value) -> Vec<String> {
    body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

async fn create_student<S>(app: &S, name: &str, class: &str, discipline: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/v1/students",
        json!({ "name": name, "class": class, "discipline": discipline }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

async fn create_subject<S>(app: &S, code: &str, name: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) =
        post_json(app, "/api/v1/subjects", json!({ "code": code, "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

#[actix_web::test]
async fn test_create_then_get_student() {
    let app = test_app().await;

    let (status, created) = post_json(
        &app,
        "/api/v1/students",
        json!({
            "name": "Asha",
            "class": "10B",
            "discipline": "Science",
            "student_number": "S-001",
            "enrollment_year": 2023
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = get_json(&app, &format!("/api/v1/students/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Asha");
    assert_eq!(fetched["data"]["class"], "10B");
    assert_eq!(fetched["data"]["discipline"], "Science");
    assert_eq!(fetched["data"]["student_number"], "S-001");
    assert_eq!(fetched["data"]["enrollment_year"], 2023);
    assert_eq!(fetched["data"]["status"], "active");
}

#[actix_web::test]
async fn test_duplicate_student_number_conflicts() {
    let app = test_app().await;
    let body = json!({ "name": "Asha", "class": "10B", "student_number": "S-001" });

    let (status, _) = post_json(&app, "/api/v1/students", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = post_json(&app, "/api/v1/students", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_grade_lifecycle() {
    let app = test_app().await;
    let student_id = create_student(&app, "Asha", "10B", "Science").await;
    let subject_id = create_subject(&app, "math", "Mathematics").await;

    let grade = json!({
        "student_id": student_id,
        "subject_id": subject_id,
        "semester": "S1",
        "score": 78.5
    });
    let (status, created) = post_json(&app, "/api/v1/grades", grade.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let grade_id = created["data"]["id"].as_i64().unwrap();

    // 同一学生、科目、学期只能有一条成绩
    let (status, _) = post_json(&app, "/api/v1/grades", grade).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // 未知学期在反序列化时即被拒绝
    let (status, _) = post_json(
        &app,
        "/api/v1/grades",
        json!({
            "student_id": student_id,
            "subject_id": subject_id,
            "semester": "S9",
            "score": 50
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/v1/grades",
        json!({
            "student_id": student_id,
            "subject_id": subject_id,
            "semester": "S2",
            "score": 101
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/grades/{grade_id}"))
        .set_json(json!({ "score": 91 }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["data"]["score"], 91.0);
    assert_eq!(updated["data"]["student_id"], student_id);
    assert_eq!(updated["data"]["subject_id"], subject_id);
    assert_eq!(updated["data"]["semester"], "S1");
}

#[actix_web::test]
async fn test_grade_for_unknown_student_is_not_found() {
    let app = test_app().await;
    let subject_id = create_subject(&app, "PHY", "Physics").await;

    let (status, _) = post_json(
        &app,
        "/api/v1/grades",
        json!({ "student_id": 999, "subject_id": subject_id, "semester": "S1", "score": 60 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_withdraw_hides_student_and_records() {
    let app = test_app().await;
    let student_id = create_student(&app, "Ravi", "10C", "Arts").await;
    let subject_id = create_subject(&app, "HIST", "History").await;
    let (_, grade) = post_json(
        &app,
        "/api/v1/grades",
        json!({ "student_id": student_id, "subject_id": subject_id, "semester": "S1", "score": 64 }),
    )
    .await;
    let grade_id = grade["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/students/{student_id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let (status, _) = get_json(&app, &format!("/api/v1/students/{student_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get_json(&app, &format!("/api/v1/grades/{grade_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = get_json(&app, &format!("/api/v1/grades?student_id={student_id}")).await;
    assert_eq!(list["data"]["pagination"]["total"], 0);

    // 再次删除已退学学生
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/students/{student_id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_purge_removes_student() {
    let app = test_app().await;
    let student_id = create_student(&app, "Meera", "11A", "Commerce").await;
    let (status, _) = post_json(
        &app,
        "/api/v1/attendance",
        json!({ "student_id": student_id, "date": "2024-03-01", "present": true }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/students/{student_id}?purge=true"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let (_, list) = get_json(&app, "/api/v1/attendance").await;
    assert_eq!(list["data"]["pagination"]["total"], 0);
    let (_, overview) = get_json(&app, "/api/v1/dashboard/overview").await;
    assert_eq!(overview["data"]["totals"]["students"], 0);
}

#[actix_web::test]
async fn test_discipline_filter_returns_matching_students() {
    let app = test_app().await;
    create_student(&app, "Asha", "10B", "Science").await;
    create_student(&app, "Ravi", "10C", "Arts").await;
    create_student(&app, "Kiran", "10B", "Science").await;

    let (status, body) = get_json(&app, "/api/v1/students?discipline=Science").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Asha"));
    assert!(names.contains(&"Kiran"));
}

#[actix_web::test]
async fn test_csv_upload_reports_bad_rows() {
    let app = test_app().await;
    let csv = "name,class,discipline\n\
               Asha,10B,Science\n\
               ,10C,Arts\n\
               Ravi,#bad,Arts\n\
               Meera,10C,Commerce";

    let (status, body) = upload_csv(&app, "students", csv).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total"], 4);
    assert_eq!(body["data"]["inserted"], 2);
    assert_eq!(body["data"]["failed"], 2);

    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors[0]["row"], 3);
    assert_eq!(errors[0]["field"], "name");
    assert_eq!(errors[1]["row"], 4);
    assert_eq!(errors[1]["field"], "class");

    let (_, list) = get_json(&app, "/api/v1/students").await;
    assert_eq!(list["data"]["pagination"]["total"], 2);
}

#[actix_web::test]
async fn test_grade_upload_resolves_codes() {
    let app = test_app().await;
    let (_, body) = upload_csv(
        &app,
        "students",
        "name,class,student_number\nAsha,10B,S-001\nRavi,10C,S-002",
    )
    .await;
    assert_eq!(body["data"]["inserted"], 2);
    create_subject(&app, "MATH", "Mathematics").await;

    let (status, body) = upload_csv(
        &app,
        "grades",
        "student_number,subject_code,semester,score\n\
         S-001,math,S1,82\n\
         S-002,MATH,S1,67.5\n\
         S-404,MATH,S1,70\n\
         S-001,MATH,S1,90",
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["inserted"], 2);
    assert_eq!(body["data"]["failed"], 2);
    assert_eq!(body["data"]["errors"][0]["row"], 4);
    assert_eq!(body["data"]["errors"][0]["field"], "student_number");
    assert_eq!(body["data"]["errors"][1]["row"], 5);
}

#[actix_web::test]
async fn test_upload_missing_column_is_rejected() {
    let app = test_app().await;
    let (status, body) = upload_csv(&app, "students", "name,discipline\nAsha,Science").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("class"));
}

#[actix_web::test]
async fn test_overview_cache_is_invalidated_by_writes() {
    let app = test_app().await;

    let (status, overview) = get_json(&app, "/api/v1/dashboard/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["data"]["totals"]["students"], 0);

    create_student(&app, "Asha", "10B", "Science").await;

    let (_, overview) = get_json(&app, "/api/v1/dashboard/overview").await;
    assert_eq!(overview["data"]["totals"]["students"], 1);
}

#[actix_web::test]
async fn test_semester_trend_and_statistics() {
    let app = test_app().await;
    let asha = create_student(&app, "Asha", "10B", "Science").await;
    let ravi = create_student(&app, "Ravi", "10C", "Arts").await;
    let math = create_subject(&app, "MATH", "Mathematics").await;

    for (student_id, semester, score) in [(asha, "S1", 80), (ravi, "S1", 60), (asha, "S2", 90)] {
        let (status, _) = post_json(
            &app,
            "/api/v1/grades",
            json!({ "student_id": student_id, "subject_id": math, "semester": semester, "score": score }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, trend) = get_json(&app, "/api/v1/dashboard/semesters").await;
    assert_eq!(status, StatusCode::OK);
    let items = trend["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["semester"], "S1");
    assert_eq!(items[0]["count"], 2);
    assert_eq!(items[0]["average"], 70.0);
    assert_eq!(items[1]["semester"], "S2");
    assert_eq!(items[1]["max"], 90.0);

    let (_, trend) = get_json(&app, "/api/v1/dashboard/semesters?discipline=Arts").await;
    assert_eq!(trend["data"]["items"].as_array().unwrap().len(), 1);

    let (status, stats) = get_json(&app, "/api/v1/dashboard/statistics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["data"]["student_count"], 2);
    assert_eq!(stats["data"]["academic"]["count"], 2);
}

#[actix_web::test]
async fn test_health_reports_database() {
    let app = test_app().await;
    let (status, body) = get_json(&app, "/api/v1/system/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["database"], "up");
}

async fn add_grade<S>(app: &S, student_id: i64, subject_id: i64, semester: &str, score: f64)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/v1/grades",
        json!({ "student_id": student_id, "subject_id": subject_id, "semester": semester, "score": score }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

async fn add_activity<S>(app: &S, student_id: i64, category: &str, date: &str, achievement: Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = post_json(
        app,
        "/api/v1/activities",
        json!({
            "student_id": student_id,
            "activity_name": format!("{category} club"),
            "category": category,
            "date": date,
            "achievement": achievement
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = test_app().await;
    create_student(&app, "Asha", "10B", "Science").await;

    let (status, body) =
        get_json(&app, "/api/v1/students?page=9223372036854775807&size=100").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(
        body["data"]["pagination"]["page"],
        i64::MAX / 100,
        "page is capped so the offset stays in range"
    );

    let (status, _) = get_json(&app, "/api/v1/grades?page=9223372036854775807&size=1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get_json(&app, "/api/v1/attendance?page=9223372036854775807").await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_undecodable_row_fails_only_that_row() {
    let app = test_app().await;
    let mut csv = b"name,class\nAsha,10B\n".to_vec();
    csv.extend_from_slice(b"R\xffvi,10C\n");
    csv.extend_from_slice(b"Meera,10C\n");

    let (status, body) = upload_file(&app, "students", "students.csv", &csv, "192.0.2.2:5000").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["inserted"], 2);
    assert_eq!(body["data"]["failed"], 1);
    assert_eq!(body["data"]["errors"][0]["row"], 3);

    let (_, list) = get_json(&app, "/api/v1/students").await;
    let names = item_names(&list);
    assert_eq!(names, vec!["Asha", "Meera"]);
}

#[actix_web::test]
async fn test_xlsx_upload_imports_students() {
    let app = test_app().await;

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in ["name", "class", "enrollment_year"].iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "Asha").unwrap();
    sheet.write_string(1, 1, "10B").unwrap();
    sheet.write_number(1, 2, 2024.0).unwrap();
    sheet.write_string(2, 0, "Ravi").unwrap();
    sheet.write_string(2, 1, "10C").unwrap();
    sheet.write_number(2, 2, 2022.0).unwrap();
    let xlsx = workbook.save_to_buffer().unwrap();

    let (status, body) =
        upload_file(&app, "students", "students.xlsx", &xlsx, "192.0.2.3:5000").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["total"], 2);
    assert_eq!(body["data"]["inserted"], 2);

    let (_, list) = get_json(&app, "/api/v1/students?enrollment_year_from=2023").await;
    assert_eq!(item_names(&list), vec!["Asha"]);
    assert_eq!(list["data"]["items"][0]["enrollment_year"], 2024);
}

#[actix_web::test]
async fn test_upload_template_lists_columns() {
    let app = test_app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/upload/template?kind=grades")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        header(&resp, "content-disposition")
            .contains("grades_template.csv")
    );
    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("student_number,subject_code,semester,score\n"));

    let req = test::TestRequest::get()
        .uri("/api/v1/upload/template?kind=students&format=xlsx")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        header(&resp, "content-type"),
        crate::utils::spreadsheet::XLSX_CONTENT_TYPE
    );
    assert!(test::read_body(resp).await.starts_with(b"PK"));

    let (status, _) = get_json(&app, "/api/v1/upload/template?kind=parents").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_student_profile() {
    let app = test_app().await;
    let asha = create_student(&app, "Asha", "10B", "Science").await;
    let ravi = create_student(&app, "Ravi", "10C", "Arts").await;
    let math = create_subject(&app, "MATH", "Mathematics").await;
    let phy = create_subject(&app, "PHY", "Physics").await;

    add_grade(&app, asha, math, "S1", 80.0).await;
    add_grade(&app, asha, math, "S2", 90.0).await;
    add_grade(&app, asha, phy, "S1", 70.0).await;
    add_grade(&app, ravi, math, "S1", 60.0).await;
    add_activity(&app, asha, "MUSIC", "2025-01-10", json!("Gold medal")).await;
    add_activity(&app, asha, "DRAMA", "2025-02-10", Value::Null).await;
    let (status, _) = post_json(
        &app,
        "/api/v1/attendance",
        json!({ "student_id": asha, "date": "2025-01-06", "present": true }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, profile) = get_json(&app, &format!("/api/v1/students/{asha}/profile")).await;
    assert_eq!(status, StatusCode::OK, "{profile}");
    let data = &profile["data"];
    assert_eq!(data["student"]["name"], "Asha");
    assert_eq!(data["scores"]["academic"], 80.0);
    assert_eq!(data["scores"]["cocurricular"], 87.5);
    assert_eq!(data["scores"]["attendance"], 100.0);
    assert_eq!(data["scores"]["academic_grade"], "B+");
    assert_eq!(data["activity_count"], 2);
    assert_eq!(data["achievement_count"], 1);
    assert_eq!(data["attendance"]["total"], 1);
    assert_eq!(data["attendance"]["rate"], 100.0);
    // 两名有成绩的学生中，只有 Ravi 低于 Asha
    assert_eq!(data["percentile_rank"], 50.0);

    let subjects = data["subjects"].as_array().unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0]["subject_code"], "MATH");
    assert_eq!(subjects[0]["count"], 2);
    assert_eq!(subjects[0]["average"], 85.0);
    assert_eq!(subjects[1]["subject_code"], "PHY");
    assert_eq!(subjects[1]["average"], 70.0);
    assert_eq!(data["semesters"].as_array().unwrap().len(), 2);

    let (_, profile) = get_json(&app, &format!("/api/v1/students/{ravi}/profile")).await;
    assert_eq!(profile["data"]["percentile_rank"], 0.0);
    assert_eq!(profile["data"]["achievement_count"], 0);

    let (status, _) = get_json(&app, "/api/v1/students/9999/profile").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_export_includes_scores_and_filters() {
    let app = test_app().await;
    let asha = create_student(&app, "Asha", "10B", "Science").await;
    create_student(&app, "Ravi", "10C", "Arts").await;
    let math = create_subject(&app, "MATH", "Mathematics").await;
    add_grade(&app, asha, math, "S1", 90.0).await;
    add_activity(&app, asha, "SPORTS", "2025-03-01", json!("Winner")).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/students/export?has_achievement=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        header(&resp, "content-type")
            .starts_with("text/csv")
    );
    let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "{text}");
    assert!(lines[0].ends_with(
        "academic_score,cocurricular_score,attendance_score,overall_score,academic_grade,overall_grade"
    ));
    let cells: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(cells[2], "Asha");
    assert_eq!(&cells[9..], &["90.00", "95.00", "80.00", "89.00", "A", "A-"]);

    // 没有成绩的学生分数列为空
    let req = test::TestRequest::get()
        .uri("/api/v1/students/export?has_achievement=false")
        .to_request();
    let text = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    let row: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
    assert_eq!(row[2], "Ravi");
    assert_eq!(&row[9..], &["", "75.00", "80.00", "", "", ""]);

    let req = test::TestRequest::get()
        .uri("/api/v1/students/export?format=xlsx&discipline=Arts")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        header(&resp, "content-type"),
        crate::utils::spreadsheet::XLSX_CONTENT_TYPE
    );
    assert!(
        header(&resp, "content-disposition")
            .contains("students.xlsx")
    );
    assert!(test::read_body(resp).await.starts_with(b"PK"));
}

#[actix_web::test]
async fn test_attendance_crud() {
    let app = test_app().await;
    let asha = create_student(&app, "Asha", "10B", "Science").await;

    let event = json!({ "student_id": asha, "date": "2025-01-06", "present": true });
    let (status, created) = post_json(&app, "/api/v1/attendance", event.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();

    // 同一学生同一天只能有一条考勤
    let (status, _) = post_json(&app, "/api/v1/attendance", event).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = post_json(
        &app,
        "/api/v1/attendance",
        json!({ "student_id": 9999, "date": "2025-01-06", "present": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, updated) = put_json(
        &app,
        &format!("/api/v1/attendance/{id}"),
        json!({ "present": false, "note": "sick leave" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["present"], false);
    assert_eq!(updated["data"]["note"], "sick leave");
    assert_eq!(updated["data"]["date"], "2025-01-06");

    let (status, fetched) = get_json(&app, &format!("/api/v1/attendance/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["present"], false);

    assert_eq!(delete(&app, &format!("/api/v1/attendance/{id}")).await, StatusCode::OK);
    let (status, _) = get_json(&app, &format!("/api/v1/attendance/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        delete(&app, &format!("/api/v1/attendance/{id}")).await,
        StatusCode::NOT_FOUND
    );

    // 删除后同一天可以重新录入
    let (status, _) = post_json(
        &app,
        "/api/v1/attendance",
        json!({ "student_id": asha, "date": "2025-01-06", "present": true }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn test_activity_crud() {
    let app = test_app().await;
    let asha = create_student(&app, "Asha", "10B", "Science").await;

    let (status, created) = post_json(
        &app,
        "/api/v1/activities",
        json!({
            "student_id": asha,
            "activity_name": " Choir ",
            "category": "music",
            "date": "2025-03-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["activity_name"], "Choir");
    assert_eq!(created["data"]["category"], "MUSIC");
    assert_eq!(created["data"]["achievement"], Value::Null);

    let (status, _) = post_json(
        &app,
        "/api/v1/activities",
        json!({ "student_id": asha, "activity_name": "  ", "date": "2025-03-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = put_json(
        &app,
        &format!("/api/v1/activities/{id}"),
        json!({ "achievement": "Regional finalist" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["achievement"], "Regional finalist");
    assert_eq!(updated["data"]["activity_name"], "Choir");

    let (_, fetched) = get_json(&app, &format!("/api/v1/activities/{id}")).await;
    assert_eq!(fetched["data"]["achievement"], "Regional finalist");

    let (_, list) = get_json(&app, &format!("/api/v1/activities?student_id={asha}")).await;
    assert_eq!(list["data"]["pagination"]["total"], 1);

    assert_eq!(delete(&app, &format!("/api/v1/activities/{id}")).await, StatusCode::OK);
    let (status, _) = get_json(&app, &format!("/api/v1/activities/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_filters() {
    let app = test_app().await;
    let (_, asha) = post_json(
        &app,
        "/api/v1/students",
        json!({ "name": "Asha", "class": "10B", "enrollment_year": 2022 }),
    )
    .await;
    let asha = asha["data"]["id"].as_i64().unwrap();
    let (_, ravi) = post_json(
        &app,
        "/api/v1/students",
        json!({ "name": "Ravi", "class": "10C", "enrollment_year": 2024 }),
    )
    .await;
    let ravi = ravi["data"]["id"].as_i64().unwrap();
    create_student(&app, "Meera", "10C", "Commerce").await;

    add_activity(&app, asha, "DEBATE", "2025-01-15", json!("First place")).await;
    add_activity(&app, ravi, "ART", "2025-02-15", Value::Null).await;
    add_activity(&app, ravi, "DANCE", "2025-03-15", json!("")).await;

    // 学生：是否获奖、入学年份区间
    let (_, list) = get_json(&app, "/api/v1/students?has_achievement=true").await;
    assert_eq!(item_names(&list), vec!["Asha"]);
    let (_, list) = get_json(&app, "/api/v1/students?has_achievement=false").await;
    assert_eq!(item_names(&list), vec!["Ravi", "Meera"]);
    let (_, list) = get_json(
        &app,
        "/api/v1/students?enrollment_year_from=2023&enrollment_year_to=2024",
    )
    .await;
    assert_eq!(item_names(&list), vec!["Ravi"]);
    let (_, list) = get_json(&app, "/api/v1/students?enrollment_year_to=2023").await;
    assert_eq!(item_names(&list), vec!["Asha"]);

    // 活动：只看获奖、日期区间
    let (_, list) = get_json(&app, "/api/v1/activities?achievement_only=true").await;
    assert_eq!(list["data"]["pagination"]["total"], 1);
    assert_eq!(list["data"]["items"][0]["category"], "DEBATE");
    let (_, list) = get_json(&app, "/api/v1/activities?from=2025-02-01&to=2025-03-15").await;
    assert_eq!(list["data"]["pagination"]["total"], 2);
    let (_, list) = get_json(&app, "/api/v1/activities?to=2025-02-14").await;
    assert_eq!(list["data"]["pagination"]["total"], 1);

    // 考勤：日期区间两端包含
    for (date, present) in [("2025-01-06", true), ("2025-01-07", false), ("2025-01-08", true)] {
        let (status, _) = post_json(
            &app,
            "/api/v1/attendance",
            json!({ "student_id": asha, "date": date, "present": present }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (_, list) = get_json(&app, "/api/v1/attendance?from=2025-01-07&to=2025-01-08").await;
    assert_eq!(list["data"]["pagination"]["total"], 2);
    let (_, list) = get_json(&app, "/api/v1/attendance?present=false").await;
    assert_eq!(list["data"]["pagination"]["total"], 1);
    let (status, _) = get_json(&app, "/api/v1/attendance?from=2025-02-01&to=2025-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 成绩：分数区间两端包含
    let math = create_subject(&app, "MATH", "Mathematics").await;
    add_grade(&app, asha, math, "S1", 55.0).await;
    add_grade(&app, asha, math, "S2", 70.0).await;
    add_grade(&app, ravi, math, "S1", 85.0).await;
    let (_, list) = get_json(&app, "/api/v1/grades?min_score=70&max_score=85").await;
    assert_eq!(list["data"]["pagination"]["total"], 2);
    let (_, list) = get_json(&app, "/api/v1/grades?max_score=69.5").await;
    assert_eq!(list["data"]["pagination"]["total"], 1);
    assert_eq!(list["data"]["items"][0]["score"], 55.0);
}

#[actix_web::test]
async fn test_rankings_and_gap_analysis() {
    let app = test_app().await;
    let asha = create_student(&app, "Asha", "10B", "Science").await;
    let ravi = create_student(&app, "Ravi", "10C", "Arts").await;
    let meera = create_student(&app, "Meera", "10B", "Science").await;
    // 没有成绩，不参与排名
    create_student(&app, "Kiran", "10C", "Arts").await;
    let math = create_subject(&app, "MATH", "Mathematics").await;
    add_grade(&app, asha, math, "S1", 90.0).await;
    add_grade(&app, ravi, math, "S1", 50.0).await;
    add_grade(&app, meera, math, "S1", 70.0).await;

    let (status, body) = get_json(&app, "/api/v1/dashboard/rankings?limit=2").await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let data = &body["data"];
    assert_eq!(data["sort_by"], "overall");
    assert_eq!(data["ranked_students"], 3);
    let top: Vec<&str> = data["top"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(top, vec!["Asha", "Meera"]);
    assert_eq!(data["top"][0]["rank"], 1);
    assert_eq!(data["bottom"][0]["name"], "Ravi");
    assert_eq!(data["bottom"][0]["rank"], 3);

    // 没有活动和考勤时，课外活动 75、出勤 80
    assert_eq!(data["largest_gaps"][0]["name"], "Ravi");
    assert_eq!(data["largest_gaps"][0]["max_gap"], 30.0);
    assert_eq!(data["largest_gaps"][0]["widest_pair"], "academic-attendance");
    assert_eq!(data["most_balanced"][0]["name"], "Meera");
    assert_eq!(data["gap_summary"]["largest_gap"], 30.0);
    assert_eq!(data["gap_summary"]["significant_gap_percent"], 33.33);

    let (_, body) = get_json(
        &app,
        "/api/v1/dashboard/rankings?sort_by=academic&discipline=Science",
    )
    .await;
    assert_eq!(body["data"]["ranked_students"], 2);
    assert_eq!(body["data"]["top"][0]["score"], 90.0);

    let (status, _) = get_json(&app, "/api/v1/dashboard/rankings?sort_by=height").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 新成绩使缓存的排名失效
    let dev = create_student(&app, "Dev", "10A", "Arts").await;
    add_grade(&app, dev, math, "S1", 99.0).await;
    let (_, body) = get_json(&app, "/api/v1/dashboard/rankings?limit=2").await;
    assert_eq!(body["data"]["top"][0]["name"], "Dev");
}
