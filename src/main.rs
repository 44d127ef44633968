use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{error, info};
use std::io;

use powledger::api::{self, AppState};
use powledger::config::Config;
use powledger::network::HttpChainFetcher;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env().map_err(|err| {
        error!("invalid configuration: {err}");
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;
    let fetcher = HttpChainFetcher::new(config.peer_timeout).map_err(io::Error::other)?;

    let (host, port) = (config.host.clone(), config.port);
    info!(
        "⛓️ node {} starting at http://{host}:{port} ({} peer(s), {} validation)",
        config.node_id,
        config.peers.len(),
        config.validation
    );

    let state = web::Data::new(AppState::new(config, Box::new(fetcher)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
