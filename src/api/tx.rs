use actix_web::{HttpResponse, post, web};
use log::info;

use super::models::{AppState, MessageResponse, NewTxRequest};

/// Queue a transaction for the next mined block.
///
/// Bodies missing `sender`, `recipient` or an integer `amount` never reach
/// this handler; the JSON extractor rejects them with 400.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> HttpResponse {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let index = state
        .ledger()
        .submit_transaction(sender.as_str(), recipient.as_str(), amount);
    info!("POST /transactions/new - {sender} -> {recipient} ({amount}) queued for block #{index}");

    HttpResponse::Created().json(MessageResponse {
        message: format!("Transaction will be added to Block {index}"),
    })
}
