use chrono::NaiveDate;
use models::{AppointmentStatus, ServiceForm, StatusUpdate, WorkingHourForm};
use serde_json::json;
use service::client::ApiClient;
use service::services::{appointments, catalog, working_hours};
use service::ServiceError;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_http(reqwest::Client::new(), &server.uri())
}

fn appointment(id: Uuid, status: &str, date: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customerName": "Nguyễn Văn A",
        "serviceId": Uuid::new_v4(),
        "appointmentDate": date,
        "startTime": "09:30",
        "status": status
    })
}

#[tokio::test]
async fn invalid_form_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/Service"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let form = ServiceForm { name: "Massage".into(), price: 0.0, duration: 60, category_id: Uuid::new_v4().to_string(), ..Default::default() };
    let err = catalog::create_service(&client(&server), "tok", &form).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn create_service_posts_camel_case_body() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let category = Uuid::new_v4();
    Mock::given(method("POST"))
        .and(path("/api/Service"))
        .and(body_partial_json(json!({ "name": "Massage đá nóng", "duration": 90, "categoryId": category.to_string() })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "data": { "id": Uuid::new_v4() } })))
        .expect(1)
        .mount(&server)
        .await;

    let form = ServiceForm {
        name: "Massage đá nóng".into(),
        price: 450000.0,
        duration: 90,
        category_id: category.to_string(),
        is_active: true,
        ..Default::default()
    };
    catalog::create_service(&client(&server), "tok", &form).await?;
    Ok(())
}

#[tokio::test]
async fn delete_missing_service_is_not_found() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/Service/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = catalog::delete_service(&client(&server), "tok", id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn working_hours_are_filtered_by_branch_and_sorted() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let branch = Uuid::new_v4();
    let other = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path("/api/WorkingHour"))
        .and(query_param("branchId", branch.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": Uuid::new_v4(), "branchId": branch, "dayOfWeek": 3, "openingTime": "08:00:00", "closingTime": "20:00:00", "isWorking": true },
            { "id": Uuid::new_v4(), "branchId": other, "dayOfWeek": 1, "openingTime": "08:00", "closingTime": "20:00", "isWorking": true },
            { "id": Uuid::new_v4(), "branchId": branch, "dayOfWeek": 0, "isWorking": false }
        ])))
        .mount(&server)
        .await;

    let rows = working_hours::list_working_hours(&client(&server), "tok", Some(branch)).await?;
    let days: Vec<u8> = rows.iter().map(|h| h.day_of_week).collect();
    assert_eq!(days, vec![0, 3]);
    assert!(rows[0].opening_time.is_none());
    Ok(())
}

#[tokio::test]
async fn closed_day_form_skips_time_checks() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/WorkingHour"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let form = WorkingHourForm { branch_id: Uuid::new_v4().to_string(), day_of_week: 0, is_working: false, ..Default::default() };
    working_hours::create_working_hour(&client(&server), "tok", &form).await?;
    Ok(())
}

#[tokio::test]
async fn appointments_filter_and_sort_newest_first() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Appointment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            appointment(Uuid::new_v4(), "Pending", "2025-03-01"),
            appointment(Uuid::new_v4(), "Completed", "2025-03-05"),
            appointment(Uuid::new_v4(), "Pending", "2025-03-09")
        ]})))
        .mount(&server)
        .await;

    let rows = appointments::list_appointments(&client(&server), "tok", Some(AppointmentStatus::Pending)).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].appointment_date, NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    Ok(())
}

#[tokio::test]
async fn status_change_follows_transition_table() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();
    Mock::given(method("GET"))
        .and(path(format!("/api/Appointment/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(appointment(id, "Pending", "2025-03-01")))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/api/Appointment/{id}/status")))
        .and(body_partial_json(json!({ "status": "Confirmed" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let c = client(&server);
    let ok = StatusUpdate { status: AppointmentStatus::Confirmed, note: None };
    appointments::change_status(&c, "tok", id, &ok).await?;

    let skip = StatusUpdate { status: AppointmentStatus::Completed, note: None };
    let err = appointments::change_status(&c, "tok", id, &skip).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    Ok(())
}
