use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, Level};

mod domain;
mod rest;
mod store;

use domain::expense_service::ExpenseService;
use domain::report_service::ReportService;
use rest::AppState;
use store::ExpenseStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("Seeding in-memory expense store");
    let store = ExpenseStore::with_demo_data().into_shared();

    let state = AppState::new(
        ExpenseService::new(store.clone()),
        ReportService::new(store),
    );

    // CORS setup to allow the dev frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = rest::api_router(state).layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
