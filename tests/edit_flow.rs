//! Edit endpoint behavior through the real service: photo preservation,
//! rejected submissions, and photo URLs.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, http::StatusCode, test, web::Data, App};
use academy_player_web::{
    handlers::{self, AppState},
    Config, CsvStore, Gender, IdAllocator, PhotoStore, PlayerRecord, RecordStore, StoreBackend,
};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const BOUNDARY: &str = "------------------------testboundary";

fn record(id: u32, photo: &str) -> PlayerRecord {
    PlayerRecord {
        id,
        name: "Ahmed Ali Hassan".to_string(),
        photo: photo.to_string(),
        national_id: None,
        date_of_birth: NaiveDate::from_ymd_opt(2013, 3, 2).unwrap(),
        age: 12,
        gender: Gender::Male,
        phone_number: "0100000000".to_string(),
        address: "Giza".to_string(),
        father_name: "Ali Hassan".to_string(),
        father_national_id: None,
        father_job: "Engineer".to_string(),
        mother_name: "Mona Said".to_string(),
        mother_national_id: None,
        mother_job: "Doctor".to_string(),
        sport: "Karate".to_string(),
        belt_degree: "أصفر 10".to_string(),
        player_number: None,
        subscription_fee: 350.5,
        registration_date: None,
    }
}

struct Fixture {
    _dir: tempfile::TempDir,
    store: Arc<CsvStore>,
    state: Data<AppState>,
    /// Stored path of player 1's seeded photo (inside the temp upload dir).
    photo_path: String,
}

/// Seed player 1 with a stored `1.gif` photo in a temp upload directory.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("photos");
    let photos = PhotoStore::new(&upload_dir);
    let source = dir.path().join("seed.gif");
    fs::write(&source, b"not really a gif").unwrap();
    let photo_path = photos.store(&source, Some("seed.gif"), 1);
    assert!(Path::new(&photo_path).exists());

    let store = Arc::new(CsvStore::new(dir.path().join("data.csv")));
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_username: "admin".to_string(),
        admin_password: "123".to_string(),
        store_backend: StoreBackend::Csv,
        database_url: String::new(),
        data_file: dir.path().join("data.csv"),
        counter_file: dir.path().join("id_counter.txt"),
        upload_dir,
    };
    let state = Data::new(AppState::new(
        store.clone(),
        IdAllocator::new(&config.counter_file),
        photos,
        config,
    ));
    Fixture {
        _dir: dir,
        store,
        state,
        photo_path,
    }
}

macro_rules! service {
    ($fixture:expr) => {
        test::init_service(
            App::new()
                .app_data($fixture.state.clone())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .configure(handlers::configure),
        )
        .await
    };
}

macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/admin_login")
            .set_form([("username", "admin"), ("password", "123")])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        resp.response()
            .cookies()
            .find(|c| c.name() == "id")
            .expect("session cookie")
            .into_owned()
    }};
}

fn edit_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"playerPhoto\"; \
                 filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn edit_fields<'a>(current_photo: &'a str, dob: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("player_id", "1"),
        ("current_photo_path", current_photo),
        ("playerName", "Ahmed Ali Hassan"),
        ("fatherName", "Ali Hassan"),
        ("fatherJob", "Engineer"),
        ("motherName", "Mona Said"),
        ("motherJob", "Doctor"),
        ("age", "12"),
        ("playerDob", dob),
        ("phoneNumber", "0111111111"),
        ("address", "Cairo"),
        ("gender", "male"),
        ("beltDegree", "أخضر 6"),
        ("subscriptionFee", "400.00"),
    ]
}

fn multipart_post(uri: &str, cookie: actix_web::cookie::Cookie<'static>, body: Vec<u8>) -> actix_web::test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .cookie(cookie)
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

#[actix_web::test]
async fn edit_without_new_photo_preserves_path_exactly() {
    let fixture = fixture();
    fixture.store.insert(&record(1, &fixture.photo_path)).await.unwrap();
    let app = service!(fixture);
    let cookie = login!(app);

    let body = edit_body(&edit_fields(&fixture.photo_path, "2013-03-02"), None);
    let resp = test::call_service(&app, multipart_post("/edit_player", cookie, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let found = fixture.store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.photo, fixture.photo_path);
    assert_eq!(found.phone_number, "0111111111");
    assert!(Path::new(&fixture.photo_path).exists());
}

#[actix_web::test]
async fn rejected_edit_leaves_photos_untouched() {
    let fixture = fixture();
    fixture.store.insert(&record(1, &fixture.photo_path)).await.unwrap();
    let app = service!(fixture);
    let cookie = login!(app);

    // A new photo is attached but the date of birth does not parse: the
    // submission is rejected before any file is moved.
    let body = edit_body(
        &edit_fields(&fixture.photo_path, "not-a-date"),
        Some(("new.png", b"replacement bytes")),
    );
    let resp = test::call_service(&app, multipart_post("/edit_player", cookie, body).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Old photo still on disk, no replacement written, record unchanged.
    assert!(Path::new(&fixture.photo_path).exists());
    let replacement = Path::new(&fixture.photo_path).with_extension("png");
    assert!(!replacement.exists());
    let found = fixture.store.find_by_id(1).await.unwrap().unwrap();
    assert_eq!(found.photo, fixture.photo_path);
    assert_eq!(found.phone_number, "0100000000");
}

#[actix_web::test]
async fn edit_form_serves_photo_from_uploads_mount() {
    let fixture = fixture();
    fixture.store.insert(&record(1, &fixture.photo_path)).await.unwrap();
    let app = service!(fixture);
    let cookie = login!(app);

    let req = test::TestRequest::get()
        .uri("/edit_player?id=1")
        .cookie(cookie)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();

    // The photo lives in a per-test directory; the page must link it through
    // the /uploads mount, not the filesystem path.
    assert!(html.contains("src=\"/uploads/1.gif\""), "page was:\n{html}");
    assert!(!html.contains(&format!("src=\"/{}\"", fixture.photo_path)));
}
