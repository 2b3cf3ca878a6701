//! HTTP handlers: session gate, dashboard, registration, edit, delete.
//! Routes are registered through [`configure`] so the binary and tests can
//! build the same app.

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_session::{Session, SessionExt};
use actix_web::{
    dev::Payload,
    get,
    http::{header, StatusCode},
    post,
    web::{self, Data, Form, Query},
    FromRequest, HttpRequest, HttpResponse, Responder,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::future::{ready, Ready};
use std::path::Path;
use std::sync::Arc;

use crate::{
    find_duplicates, views, Config, Gender, IdAllocator, PhotoStore, PlayerId, PlayerRecord,
    RecordStore, StoreError, DEFAULT_SPORT, NO_PHOTO,
};

/// Shared per-process state: the configured record store, the id counter,
/// and the photo directory.
pub struct AppState {
    store: Arc<dyn RecordStore>,
    allocator: IdAllocator,
    photos: PhotoStore,
    config: Config,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        allocator: IdAllocator,
        photos: PhotoStore,
        config: Config,
    ) -> Self {
        Self {
            store,
            allocator,
            photos,
            config,
        }
    }
}

type State = Data<AppState>;

const SESSION_LOGGED_IN: &str = "loggedin";
const SESSION_USERNAME: &str = "username";

/// Register every route. The static /uploads mount is not included here: it
/// needs the configured directory and stays with the server bootstrap.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .service(api_health)
        .service(favicon)
        .service(login_form)
        .service(login_submit)
        .service(logout)
        .service(dashboard)
        .service(register_form)
        .service(register_submit)
        .service(success)
        .service(edit_form)
        .service(edit_submit)
        .service(delete_player);
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn html_status(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Store failures abort the request with a diagnostic page; there is no retry.
fn storage_failure(e: StoreError) -> HttpResponse {
    log::error!("storage failure: {e}");
    html_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        views::error_page(&format!("Database error: {e}")),
    )
}

/// Serving URL for a record's photo under the /uploads mount, if the stored
/// file exists. The upload directory is configurable, so the URL is derived
/// from the filename rather than echoing the stored filesystem path.
fn photo_url(record: &PlayerRecord) -> Option<String> {
    if !record.has_photo() {
        return None;
    }
    let path = Path::new(&record.photo);
    if !path.exists() {
        return None;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("/uploads/{name}"))
}

fn is_logged_in(session: &Session) -> bool {
    matches!(session.get::<bool>(SESSION_LOGGED_IN), Ok(Some(true)))
}

/// Request-scoped proof of an authenticated admin session. Extraction runs
/// before the handler body, so the session check is always the first thing a
/// protected endpoint does; failure is a silent redirect to the login page.
struct AdminGate;

impl FromRequest for AdminGate {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let session = req.get_session();
        ready(if is_logged_in(&session) {
            Ok(AdminGate)
        } else {
            Err(NotLoggedIn.into())
        })
    }
}

#[derive(Debug)]
struct NotLoggedIn;

impl std::fmt::Display for NotLoggedIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not logged in")
    }
}

impl actix_web::ResponseError for NotLoggedIn {
    fn error_response(&self) -> HttpResponse {
        redirect("/admin_login")
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "academy-player-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn index() -> HttpResponse {
    redirect("/dashboard")
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

#[get("/admin_login")]
async fn login_form(session: Session) -> HttpResponse {
    if is_logged_in(&session) {
        return redirect("/dashboard");
    }
    html(views::login_page(None))
}

#[post("/admin_login")]
async fn login_submit(state: State, session: Session, form: Form<LoginForm>) -> HttpResponse {
    if form.username == state.config.admin_username
        && form.password == state.config.admin_password
    {
        let stored = session
            .insert(SESSION_LOGGED_IN, true)
            .and_then(|_| session.insert(SESSION_USERNAME, form.username.clone()));
        if stored.is_err() {
            return html_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                views::error_page("session error"),
            );
        }
        redirect("/dashboard")
    } else {
        html(views::login_page(Some(views::LOGIN_ERROR)))
    }
}

#[get("/logout")]
async fn logout(session: Session) -> HttpResponse {
    session.purge();
    redirect("/admin_login")
}

#[derive(Deserialize)]
struct SearchQuery {
    search: Option<String>,
}

#[get("/dashboard")]
async fn dashboard(_gate: AdminGate, state: State, query: Query<SearchQuery>) -> HttpResponse {
    let term = query.search.as_deref().map(str::trim).unwrap_or("");
    let result = if term.is_empty() {
        state.store.all().await
    } else {
        state.store.search(term).await
    };
    let records = match result {
        Ok(records) => records,
        Err(e) => return storage_failure(e),
    };
    let rows: Vec<views::DashboardRow> = records
        .into_iter()
        .map(|record| {
            let photo_url = photo_url(&record);
            views::DashboardRow { record, photo_url }
        })
        .collect();
    html(views::dashboard_page(&rows, term))
}

/// Registration and edit submissions share one multipart shape; the edit
/// form additionally posts `player_id` and `current_photo_path`.
#[derive(MultipartForm)]
struct PlayerForm {
    #[multipart(rename = "playerName")]
    player_name: Text<String>,
    #[multipart(rename = "playerNID")]
    player_nid: Option<Text<String>>,
    #[multipart(rename = "fatherName")]
    father_name: Text<String>,
    #[multipart(rename = "fatherNID")]
    father_nid: Option<Text<String>>,
    #[multipart(rename = "fatherJob")]
    father_job: Text<String>,
    #[multipart(rename = "motherName")]
    mother_name: Text<String>,
    #[multipart(rename = "motherNID")]
    mother_nid: Option<Text<String>>,
    #[multipart(rename = "motherJob")]
    mother_job: Text<String>,
    age: Text<u32>,
    #[multipart(rename = "playerDob")]
    player_dob: Text<String>,
    #[multipart(rename = "phoneNumber")]
    phone_number: Text<String>,
    address: Text<String>,
    #[multipart(rename = "playerNumber")]
    player_number: Option<Text<String>>,
    gender: Text<String>,
    sport: Option<Text<String>>,
    #[multipart(rename = "beltDegree")]
    belt_degree: Text<String>,
    #[multipart(rename = "subscriptionFee")]
    subscription_fee: Text<f64>,
    #[multipart(rename = "playerPhoto")]
    player_photo: Option<TempFile>,
    player_id: Option<Text<PlayerId>>,
    current_photo_path: Option<Text<String>>,
}

impl PlayerForm {
    /// The uploaded photo, if the file input was actually used.
    fn upload(&self) -> Option<&TempFile> {
        self.player_photo.as_ref().filter(|f| f.size > 0)
    }

    fn to_record(&self, id: PlayerId, photo: String) -> Result<PlayerRecord, String> {
        let date_of_birth = NaiveDate::parse_from_str(self.player_dob.trim(), "%Y-%m-%d")
            .map_err(|_| "تاريخ الميلاد غير صالح.".to_string())?;
        let optional = |value: &Option<Text<String>>| {
            value
                .as_ref()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Ok(PlayerRecord {
            id,
            name: self.player_name.trim().to_string(),
            photo,
            national_id: optional(&self.player_nid),
            date_of_birth,
            age: self.age.0,
            gender: Gender::parse(&self.gender),
            phone_number: self.phone_number.trim().to_string(),
            address: self.address.trim().to_string(),
            father_name: self.father_name.trim().to_string(),
            father_national_id: optional(&self.father_nid),
            father_job: self.father_job.trim().to_string(),
            mother_name: self.mother_name.trim().to_string(),
            mother_national_id: optional(&self.mother_nid),
            mother_job: self.mother_job.trim().to_string(),
            sport: self
                .sport
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SPORT.to_string()),
            belt_degree: self.belt_degree.trim().to_string(),
            player_number: optional(&self.player_number),
            subscription_fee: self.subscription_fee.0,
            registration_date: None,
        })
    }
}

#[get("/register")]
async fn register_form(_gate: AdminGate) -> HttpResponse {
    html(views::register_page())
}

/// Registration: screen for duplicates, allocate a code, store the photo,
/// append the record. Nothing is persisted when a duplicate rule trips.
#[post("/register")]
async fn register_submit(
    _gate: AdminGate,
    state: State,
    MultipartForm(form): MultipartForm<PlayerForm>,
) -> HttpResponse {
    let candidate = match form.to_record(0, NO_PHOTO.to_string()) {
        Ok(record) => record,
        Err(message) => return html_status(StatusCode::BAD_REQUEST, views::error_page(&message)),
    };

    let existing = match state.store.all().await {
        Ok(records) => records,
        Err(e) => return storage_failure(e),
    };
    let flags = find_duplicates(&candidate, &existing);
    if flags.any() {
        return html(views::duplicate_page(&flags));
    }

    let id = match state.allocator.next_id() {
        Ok(id) => id,
        Err(e) => {
            log::error!("id allocation failed: {e}");
            return html_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                views::error_page(&format!("Could not allocate a player code: {e}")),
            );
        }
    };

    let mut record = candidate;
    record.id = id;
    if let Some(upload) = form.upload() {
        // Upload failures are non-fatal: the record is saved with the
        // sentinel photo value.
        record.photo = state
            .photos
            .store(upload.file.path(), upload.file_name.as_deref(), id);
    }

    if let Err(e) = state.store.insert(&record).await {
        return storage_failure(e);
    }
    redirect(&format!(
        "/success?code={}&name={}",
        id,
        urlencode(&record.name)
    ))
}

#[derive(Deserialize)]
struct SuccessQuery {
    code: Option<String>,
    name: Option<String>,
}

#[get("/success")]
async fn success(query: Query<SuccessQuery>) -> HttpResponse {
    html(views::success_page(
        query.code.as_deref().unwrap_or("غير معروف"),
        query.name.as_deref().unwrap_or("لاعبنا الجديد"),
    ))
}

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

fn parse_id(query: &IdQuery) -> Option<PlayerId> {
    query.id.as_deref().and_then(|v| v.trim().parse().ok())
}

#[get("/edit_player")]
async fn edit_form(_gate: AdminGate, state: State, query: Query<IdQuery>) -> HttpResponse {
    let id = match parse_id(&query) {
        Some(id) => id,
        None => {
            return html_status(
                StatusCode::BAD_REQUEST,
                views::error_page(views::ERR_NO_PLAYER_SELECTED),
            )
        }
    };
    match state.store.find_by_id(id).await {
        Ok(Some(record)) => {
            let url = photo_url(&record);
            html(views::edit_page(&record, url.as_deref(), None))
        }
        Ok(None) => html_status(
            StatusCode::NOT_FOUND,
            views::error_page(views::ERR_PLAYER_NOT_FOUND),
        ),
        Err(e) => storage_failure(e),
    }
}

/// Edit: full overwrite of all mutable fields. A new photo replaces the old
/// file; without one the existing photo path is preserved exactly.
#[post("/edit_player")]
async fn edit_submit(
    _gate: AdminGate,
    state: State,
    MultipartForm(form): MultipartForm<PlayerForm>,
) -> HttpResponse {
    let id = match form.player_id.as_ref() {
        Some(id) => id.0,
        None => {
            return html_status(
                StatusCode::BAD_REQUEST,
                views::error_page(views::ERR_NO_PLAYER_SELECTED),
            )
        }
    };
    let current_photo = form
        .current_photo_path
        .as_ref()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| NO_PHOTO.to_string());

    // Validate the submission before any file side effect: a rejected form
    // must leave both the old and the uploaded photo untouched.
    let mut record = match form.to_record(id, current_photo.clone()) {
        Ok(record) => record,
        Err(message) => return html_status(StatusCode::BAD_REQUEST, views::error_page(&message)),
    };

    let upload = form
        .upload()
        .map(|u| (u.file.path(), u.file_name.as_deref()));
    let (photo, upload_failed) = state.photos.replace(upload, id, &current_photo);
    record.photo = photo;

    match state.store.update(id, &record).await {
        Ok(()) => {}
        Err(StoreError::NotFound(_)) => {
            return html_status(
                StatusCode::NOT_FOUND,
                views::error_page(views::ERR_PLAYER_NOT_FOUND),
            )
        }
        Err(e) => return storage_failure(e),
    }

    // Re-fetch so the form shows what the store now holds.
    let fresh = match state.store.find_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return html_status(
                StatusCode::NOT_FOUND,
                views::error_page(views::ERR_PLAYER_NOT_FOUND),
            )
        }
        Err(e) => return storage_failure(e),
    };
    let message = if upload_failed {
        // The previous photo is kept; the user is told but the update
        // still goes through.
        views::MSG_PHOTO_UPLOAD_FAILED
    } else {
        views::MSG_UPDATED
    };
    let url = photo_url(&fresh);
    html(views::edit_page(&fresh, url.as_deref(), Some(message)))
}

/// Delete: photo file first, then the record. A missing or invalid id is a
/// no-op that still redirects to the dashboard.
#[get("/delete_player")]
async fn delete_player(_gate: AdminGate, state: State, query: Query<IdQuery>) -> HttpResponse {
    let id = match parse_id(&query) {
        Some(id) => id,
        None => return redirect("/dashboard"),
    };
    match state.store.find_by_id(id).await {
        Ok(Some(record)) => {
            state.photos.delete(&record.photo);
            match state.store.delete(id).await {
                Ok(()) | Err(StoreError::NotFound(_)) => {}
                Err(e) => return storage_failure(e),
            }
        }
        Ok(None) => {}
        Err(e) => return storage_failure(e),
    }
    redirect("/dashboard")
}

/// Percent-encode a query-string value (UTF-8 bytes outside the unreserved set).
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
