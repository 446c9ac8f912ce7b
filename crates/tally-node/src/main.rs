use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tally_core::{ChainError, Ledger};
use tally_store::FileStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};

#[derive(Parser, Debug)]
struct Args {
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Path to the JSON persistence file
    #[arg(long, default_value = "tally.json")]
    db: String,
}

#[derive(Clone)]
struct AppState {
    ledger: Arc<Ledger<FileStore>>,
}

fn reject(err: ChainError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

async fn get_chain(State(state): State<AppState>) -> Response {
    let chain = state.ledger.chain();
    Json(json!({ "chain": chain, "length": chain.len() })).into_response()
}

#[derive(Deserialize)]
struct AddTxRequest {
    data: String,
}

async fn add_transaction(
    State(state): State<AppState>,
    Json(req): Json<AddTxRequest>,
) -> Response {
    match state.ledger.submit_transaction(&req.data) {
        Ok(()) => Json(json!({
            "message": "Transaction added to pending pool",
            "pending": state.ledger.pending(),
        }))
        .into_response(),
        Err(err) => reject(err),
    }
}

async fn mine(State(state): State<AppState>) -> Response {
    // The proof-of-work search is CPU-bound and holds the ledger's write
    // lock, so it runs on the blocking pool instead of an async worker.
    let ledger = state.ledger.clone();
    match tokio::task::spawn_blocking(move || ledger.mine_block()).await {
        Ok(Ok(block)) => Json(block).into_response(),
        Ok(Err(err)) => reject(err),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let Some(q) = params.q.filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "query param 'q' is required" })),
        )
            .into_response();
    };
    Json(json!({ "query": q, "results": state.ledger.search(&q) })).into_response()
}

async fn pending(State(state): State<AppState>) -> Response {
    Json(json!({ "pending": state.ledger.pending() })).into_response()
}

async fn validate(State(state): State<AppState>) -> Response {
    let valid = state.ledger.is_valid();
    let message = if valid {
        "Chain integrity verified"
    } else {
        "Chain is INVALID"
    };
    Json(json!({ "valid": valid, "message": message })).into_response()
}

async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    info!(db = %args.db, "opening ledger");
    let store = Arc::new(FileStore::new(&args.db));
    let ledger = Arc::new(Ledger::open(Some(store)));

    let state = AppState { ledger };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/chain", get(get_chain))
        .route("/add-transaction", post(add_transaction))
        .route("/mine", post(mine))
        .route("/search", get(search))
        .route("/pending", get(pending))
        .route("/validate", get(validate))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = args.listen.parse()?;
    info!("tally-node listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
