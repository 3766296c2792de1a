use std::{env, io::Result};

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, App, HttpServer};
use binairo_core::controller;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info")); // RUST_LOG

    let mode = env::var("MODE").unwrap_or("testing".to_owned());
    let host = if mode == "prod" {
        "0.0.0.0"
    } else {
        "127.0.0.1"
    };
    let port = env::var("PORT")
        .unwrap_or("8080".to_owned())
        .parse::<u16>()
        .expect("Failed to parse the host port number");

    // The generator and the weaker solver strategies can burn real CPU per
    // request, so every route is rate-limited rather than just /generate.
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(4)
        .burst_size(8)
        .finish()
        .expect("governor configuration must be valid");

    info!("Starting a listener on {}:{}", host, port);

    // Only panics if no socket addresses were successfully bound or if no Tokio runtime is set up
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Governor::new(&governor_conf))
            .service(controller::solve)
            .service(controller::generate)
            .service(controller::validate)
    })
    .bind((host, port))?
    .run()
    .await
}
