mod chain;
pub mod error;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};
use log::warn;

pub use error::ApiError;
pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::health_check)
        .service(chain::get_chain)
        .service(chain::mine_block)
        .service(tx::post_transaction)
        .service(nodes::register_nodes)
        .service(nodes::list_nodes)
        .service(nodes::resolve_conflicts);
}

/// Turn body extraction failures into JSON 400s.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        warn!("{} {} - rejected body: {err}", req.method(), req.path());
        let api_err = if req.path().starts_with("/nodes") {
            ApiError::InvalidPeers(err.to_string())
        } else {
            ApiError::MalformedSubmission(err.to_string())
        };
        api_err.into()
    })
}
