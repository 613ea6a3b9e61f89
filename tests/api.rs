use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;

use bookstay::config::Config;
use bookstay::db::MIGRATOR;
use bookstay::routes;
use bookstay::storage::{DiskImageStore, ImageStore};
use bookstay::store::Store;

struct TestContext {
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    config: web::Data<Config>,
    _uploads: tempfile::TempDir,
}

async fn test_context() -> TestContext {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    let uploads = tempfile::tempdir().unwrap();
    let images: web::Data<dyn ImageStore> =
        web::Data::from(Arc::new(DiskImageStore::new(uploads.path())) as Arc<dyn ImageStore>);

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
        upload_dir: uploads.path().display().to_string(),
    };

    TestContext {
        store: web::Data::new(Store::new(pool)),
        images,
        config: web::Data::new(config),
        _uploads: uploads,
    }
}

macro_rules! spawn_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.store.clone())
                .app_data($ctx.images.clone())
                .app_data($ctx.config.clone())
                .configure(routes::configure),
        )
        .await
    };
}

fn multipart_body(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let boundary = "----bookstay-test-boundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

async fn register_and_login<S, B>(app: &S, name: &str, email: &str, role: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + Unpin,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": "secret123",
            "role": role,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": "secret123" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn create_hotel<S, B>(app: &S, token: &str, name: &str, location: &str) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + Unpin,
    B::Error: std::fmt::Debug,
{
    let (content_type, body) = multipart_body(&[("name", name), ("location", location)]);
    let req = test::TestRequest::post()
        .uri("/hotels")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    test::call_service(app, req).await.status()
}

async fn create_room<S, B>(app: &S, token: &str, hotel_id: i64, number: &str, price: &str) -> i64
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + Unpin,
    B::Error: std::fmt::Debug,
{
    let hotel_id = hotel_id.to_string();
    let (content_type, body) = multipart_body(&[
        ("hotel_id", hotel_id.as_str()),
        ("room_number", number),
        ("room_type", "double"),
        ("price_per_night", price),
        ("max_guests", "2"),
    ]);
    let req = test::TestRequest::post()
        .uri("/rooms")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    body["data"]["id"].as_i64().unwrap()
}

async fn book<S, B>(app: &S, token: &str, room_id: i64, check_in: NaiveDate, check_out: NaiveDate) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + Unpin,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/bookings")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({
            "room_id": room_id,
            "check_in_date": check_in,
            "check_out_date": check_out,
        }))
        .to_request();
    test::call_service(app, req).await
}

#[actix_web::test]
async fn register_login_and_identify() {
    let ctx = test_context().await;
    let app = spawn_app!(ctx);

    let token = register_and_login(&app, "Alice", "alice@example.com", "user").await;

    let req = test::TestRequest::get()
        .uri("/user")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"].get("password_hash").is_none());

    // Wrong password is a 401 with the uniform envelope.
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "alice@example.com", "password": "wrong-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], false);
}

#[actix_web::test]
async fn duplicate_registration_conflicts() {
    let ctx = test_context().await;
    let app = spawn_app!(ctx);

    register_and_login(&app, "Alice", "alice@example.com", "user").await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "name": "Alice Again",
            "email": "alice@example.com",
            "password": "secret123",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn protected_routes_gate_on_token_and_role() {
    let ctx = test_context().await;
    let app = spawn_app!(ctx);

    // No token.
    let req = test::TestRequest::get().uri("/hotels").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let req = test::TestRequest::get()
        .uri("/hotels")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token.");

    // Valid token, wrong role: users cannot manage hotels...
    let user_token = register_and_login(&app, "Alice", "alice@example.com", "user").await;
    let req = test::TestRequest::get()
        .uri("/hotels")
        .insert_header(("Authorization", format!("Bearer {user_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // ...and admins cannot book.
    let admin_token = register_and_login(&app, "Root", "root@example.com", "admin").await;
    let today = Utc::now().date_naive();
    let resp = book(&app, &admin_token, 1, today + Duration::days(10), today + Duration::days(12)).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn hotel_creation_rejects_duplicate_names() {
    let ctx = test_context().await;
    let app = spawn_app!(ctx);
    let admin_token = register_and_login(&app, "Root", "root@example.com", "admin").await;

    assert_eq!(
        create_hotel(&app, &admin_token, "Seaside", "Lisbon").await,
        StatusCode::CREATED
    );
    assert_eq!(
        create_hotel(&app, &admin_token, "Seaside", "Porto").await,
        StatusCode::CONFLICT
    );

    let req = test::TestRequest::get()
        .uri("/hotels")
        .insert_header(("Authorization", format!("Bearer {admin_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["created_by_name"], "Root");
}

#[actix_web::test]
async fn booking_flow_overlap_cancel_and_rebook() {
    let ctx = test_context().await;
    let app = spawn_app!(ctx);
    let admin_token = register_and_login(&app, "Root", "root@example.com", "admin").await;
    let user_token = register_and_login(&app, "Alice", "alice@example.com", "user").await;

    assert_eq!(
        create_hotel(&app, &admin_token, "Seaside", "Lisbon").await,
        StatusCode::CREATED
    );
    let room_id = create_room(&app, &admin_token, 1, "101", "90.0").await;

    let today = Utc::now().date_naive();
    let check_in = today + Duration::days(30);
    let check_out = today + Duration::days(34);

    let resp = book(&app, &user_token, room_id, check_in, check_out).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["user_name"], "Alice");
    assert_eq!(body["data"]["hotel"]["name"], "Seaside");
    let booking_id = body["data"]["booking_id"].as_i64().unwrap();

    // Midpoint overlap and shared-boundary date both conflict.
    let resp = book(&app, &user_token, room_id, check_in + Duration::days(2), check_out + Duration::days(2)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = book(&app, &user_token, room_id, check_out, check_out + Duration::days(3)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // First free day after the stay is bookable.
    let resp = book(&app, &user_token, room_id, check_out + Duration::days(1), check_out + Duration::days(3)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Past check-in fails validation.
    let resp = book(&app, &user_token, room_id, today - Duration::days(1), today + Duration::days(1)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // History lists both bookings, newest stay first.
    let req = test::TestRequest::get()
        .uri("/bookings/history")
        .insert_header(("Authorization", format!("Bearer {user_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // Cancel frees the window for a rebook.
    let req = test::TestRequest::delete()
        .uri(&format!("/bookings/{booking_id}/cancel"))
        .insert_header(("Authorization", format!("Bearer {user_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "cancelled");

    let resp = book(&app, &user_token, room_id, check_in, check_out).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // A cancelled booking belonging to someone else stays invisible.
    let other_token = register_and_login(&app, "Bob", "bob@example.com", "user").await;
    let req = test::TestRequest::delete()
        .uri(&format!("/bookings/{booking_id}/cancel"))
        .insert_header(("Authorization", format!("Bearer {other_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn search_filters_price_and_window() {
    let ctx = test_context().await;
    let app = spawn_app!(ctx);
    let admin_token = register_and_login(&app, "Root", "root@example.com", "admin").await;
    let user_token = register_and_login(&app, "Alice", "alice@example.com", "user").await;

    assert_eq!(
        create_hotel(&app, &admin_token, "Seaside", "Lisbon").await,
        StatusCode::CREATED
    );
    let cheap = create_room(&app, &admin_token, 1, "101", "100.0").await;
    let _pricey = create_room(&app, &admin_token, 1, "102", "400.0").await;

    let today = Utc::now().date_naive();
    let check_in = today + Duration::days(30);
    let check_out = today + Duration::days(32);

    // Both rooms free: the band keeps only the in-band one.
    let uri = format!(
        "/hotels/search?location=lisb&min_price=50&max_price=150&check_in={check_in}&check_out={check_out}"
    );
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", format!("Bearer {user_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["rooms"].as_array().unwrap().len(), 1);

    // Booking the in-band room empties the hotel out of the results.
    let resp = book(&app, &user_token, cheap, check_in, check_out).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(("Authorization", format!("Bearer {user_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
