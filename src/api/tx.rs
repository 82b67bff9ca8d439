use actix_web::{HttpResponse, get, post, web};
use log::debug;

use super::ApiError;
use super::models::{AppState, NewTxRequest, NewTxResponse, PendingResponse};

/// Buffer a new transaction for the next block.
#[post("/transactions/new/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, ApiError> {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();
    debug!("POST /transactions/new/ - {sender} -> {recipient} ({amount})");

    let index = state.node.submit_transaction(sender, recipient, amount)?;
    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    }))
}

/// List the pending-transaction buffer.
#[get("/transactions/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let transactions = state.node.pending()?;
    Ok(HttpResponse::Ok().json(PendingResponse {
        size: transactions.len(),
        transactions,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::{AppState, init_routes};
    use crate::blockchain::ProofOfWork;
    use crate::node::Node;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn new_transaction_is_buffered() {
        let data = web::Data::new(AppState::new(Node::new("n", ProofOfWork::new(1))));
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({ "sender": "alice", "recipient": "bob", "amount": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Transaction will be added to Block 2");

        let req = test::TestRequest::get()
            .uri("/api/v1/transactions/pending/")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 1);
        assert_eq!(body["transactions"][0]["recipient"], "bob");
    }

    #[actix_web::test]
    async fn fractional_amount_is_accepted() {
        let data = web::Data::new(AppState::new(Node::new("n", ProofOfWork::new(1))));
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({ "sender": "alice", "recipient": "bob", "amount": 2.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(data.node.pending().unwrap()[0].amount.as_f64(), Some(2.5));
    }

    #[actix_web::test]
    async fn missing_field_is_bad_request() {
        let data = web::Data::new(AppState::new(Node::new("n", ProofOfWork::new(1))));
        let app =
            test::init_service(App::new().app_data(data.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({ "sender": "alice", "amount": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(data.node.pending().unwrap().is_empty());
    }
}
