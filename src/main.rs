use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;

use bookstay::config::Config;
use bookstay::storage::{DiskImageStore, ImageStore};
use bookstay::store::Store;
use bookstay::{db, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("Connecting to database...");
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to create pool");

    log::info!("Running migrations...");
    db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let store = web::Data::new(Store::new(pool));
    let images: web::Data<dyn ImageStore> =
        web::Data::from(Arc::new(DiskImageStore::new(&config.upload_dir)) as Arc<dyn ImageStore>);
    let config_data = web::Data::new(config.clone());

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(images.clone())
            .app_data(config_data.clone())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
