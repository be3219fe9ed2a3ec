//! Single binary web server: JSON API over the padel tracker plus CSV downloads.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, PADEL_DATA_DIR.
//! Data is kept in memory and saved in the background to JSON files under PADEL_DATA_DIR.

use actix_web::{cookie::Key, App, HttpServer};
use padel_tracker::api::{self, AppData};
use padel_tracker::{load_tracker, Config, FileStore, Saver};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let store = FileStore::new(&config.data_dir);
    log::info!("Using data directory {:?}", store.dir());
    let tracker = load_tracker(&store).await;
    let saver = Saver::spawn(store);

    let state = AppData::new(tracker, saver.clone());
    // Sessions only hold the current screen, so a fresh key per start is enough.
    let session_key = Key::generate();

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(api::session_middleware(session_key.clone()))
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    saver.flush().await;
    log::info!("Pending saves flushed; shutting down");
    Ok(())
}
