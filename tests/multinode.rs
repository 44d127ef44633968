use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, rt, test, web};
use powledger::api::{self, AppState};
use powledger::blockchain::validator;
use powledger::config::Config;
use powledger::network::HttpChainFetcher;
use serde_json::{Value, json};
use std::time::Duration;

fn node_state(node_id: &str) -> web::Data<AppState> {
    let config = Config {
        node_id: node_id.to_string(),
        peer_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    let fetcher = HttpChainFetcher::new(config.peer_timeout).expect("http client");
    web::Data::new(AppState::new(config, Box::new(fetcher)))
}

/// Serve `state` on an ephemeral localhost port; returns `host:port`.
fn spawn_node(state: web::Data<AppState>) -> (String, ServerHandle) {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind ephemeral port");
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    rt::spawn(server);
    (addr.to_string(), handle)
}

#[actix_web::test]
async fn node_adopts_longer_chain_over_http() {
    let remote = node_state("remote");
    {
        let mut ledger = remote.ledger();
        ledger.submit_transaction("alice", "bob", 5);
        ledger.mine();
        ledger.mine();
    }
    let (remote_addr, handle) = spawn_node(remote.clone());

    let local = node_state("local");
    let app = test::init_service(
        App::new()
            .app_data(local.clone())
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/nodes/register")
        .set_json(json!({ "nodes": [format!("http://{remote_addr}")] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/nodes/resolve").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["adopted"], true);

    let adopted = local.ledger().chain().to_vec();
    assert_eq!(adopted.len(), 3);
    assert_eq!(adopted, remote.ledger().chain());
    assert!(validator::is_valid(&adopted));

    // Mining on top of the adopted chain links to the remote tip.
    let req = test::TestRequest::get().uri("/mine").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["index"], 4);
    assert_eq!(body["previous_hash"], adopted[2].hash().as_str());

    handle.stop(true).await;
}

#[actix_web::test]
async fn unreachable_peer_leaves_chain_alone() {
    let local = node_state("local");
    local.peers.register("127.0.0.1:9").expect("valid address");
    let app = test::init_service(
        App::new()
            .app_data(local.clone())
            .configure(api::init_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/nodes/resolve").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["adopted"], false);
    assert_eq!(local.ledger().len(), 1);
}
