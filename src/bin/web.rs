//! Single binary web server: admin pages rendered server-side, uploads from /uploads.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST (e.g. 0.0.0.0),
//! PORT (e.g. 8080); see Config for the full variable list.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, web::Data, App, HttpServer};
use academy_player_web::{
    handlers::{self, AppState},
    Config, CsvStore, IdAllocator, PhotoStore, RecordStore, SqliteStore, StoreBackend,
};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    std::fs::create_dir_all(&config.upload_dir)?;

    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            let store = SqliteStore::connect(&config.database_url)
                .await
                .map_err(std::io::Error::other)?;
            log::info!("Using sqlite record store at {}", config.database_url);
            Arc::new(store)
        }
        StoreBackend::Csv => {
            log::info!(
                "Using legacy csv record store at {}",
                config.data_file.display()
            );
            Arc::new(CsvStore::new(&config.data_file))
        }
    };

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let upload_dir = config.upload_dir.clone();
    let state = Data::new(AppState::new(
        store,
        IdAllocator::new(&config.counter_file),
        PhotoStore::new(&config.upload_dir),
        config,
    ));
    // Sessions do not survive a restart; admins just log in again.
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .configure(handlers::configure)
            .service(Files::new("/uploads", upload_dir.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
