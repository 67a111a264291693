use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use arena::auth::rate_limit::LoginThrottle;
use arena::config::AppConfig;
use arena::storage::{BlobStore, LocalBlobStore};
use arena::store::{MemoryStore, PgStore, Store};
use arena::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // .env first so RUST_LOG from it applies
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Ok(path) = dotenv {
        log::info!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::from_env();

    let store = match &config.database_url {
        Some(url) => {
            let pool = db::init_pool(url).await.expect("Failed to connect to Postgres");
            db::run_migrations(&pool).await.expect("Failed to run migrations");
            Store::Postgres(PgStore::new(pool))
        }
        None => {
            log::warn!("No DATABASE_URL set, using in-memory store (data lost on restart)");
            Store::Memory(MemoryStore::new())
        }
    };
    log::info!("Document store backend: {}", store.backend_name());

    if let Some(seed) = &config.seed_institute {
        if let Err(e) = db::seed_institute(&store, seed).await {
            log::error!("Failed to seed institute: {e}");
        }
    }

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");
    let blobs = BlobStore::Local(LocalBlobStore::new(&config.upload_dir, config.public_upload_base.clone()));

    // Session encryption key from SESSION_KEY for sessions that survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = config.bind_addr.clone();
    let throttle = LoginThrottle::default();
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
            .cookie_secure(false)
            .cookie_http_only(true)
            .build();

        let mut app = App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(blobs.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(throttle.clone()))
            .app_data(web::PayloadConfig::new(config.max_banner_bytes))
            .service(actix_files::Files::new("/static", "./static"));

        // Banners are public; only serve them when the base is a local path.
        if config.public_upload_base.starts_with('/') {
            app = app.service(actix_files::Files::new(&config.public_upload_base, &config.upload_dir));
        }

        app.configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
