use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use shared::{
    CategoryListResponse, CreateExpenseRequest, EmailReportRequest, WhatsAppReportRequest,
    CATEGORIES,
};
use tracing::info;

use crate::domain::expense_service::{ExpenseError, ExpenseService};
use crate::domain::report_service::{DownloadOutcome, ReportService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(expense_service: ExpenseService, report_service: ReportService) -> Self {
        Self {
            expense_service,
            report_service,
        }
    }
}

/// Build the `/api` router over the given state.
pub fn api_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/summary", get(get_summary))
        .route("/badges", get(get_badges))
        .route("/categories", get(list_categories))
        .route("/reports/download", post(download_report))
        .route("/reports/whatsapp", post(send_whatsapp_report))
        .route("/reports/email", post(send_email_report));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Axum handler for POST /api/expenses
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/expenses - category: {}, description: {}",
        request.category, request.description
    );

    match state.expense_service.add_expense(request) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e @ ExpenseError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("Error creating expense: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating expense").into_response()
        }
    }
}

/// Axum handler for GET /api/expenses
pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses");

    match state.expense_service.list_expenses() {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("Error listing expenses: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error listing expenses").into_response()
        }
    }
}

/// Axum handler for GET /api/summary
pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/summary");

    match state.expense_service.budget_snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => {
            tracing::error!("Error computing summary: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error computing summary").into_response()
        }
    }
}

/// Axum handler for GET /api/badges
pub async fn get_badges(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/badges");

    match state.expense_service.badges() {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            tracing::error!("Error evaluating badges: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error evaluating badges").into_response()
        }
    }
}

/// Axum handler for GET /api/categories
pub async fn list_categories() -> impl IntoResponse {
    info!("GET /api/categories");

    Json(CategoryListResponse {
        categories: CATEGORIES.to_vec(),
    })
}

/// Axum handler for POST /api/reports/download. Serves the report as a
/// plain-text attachment with a dated filename.
pub async fn download_report(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/reports/download");

    match state.report_service.generate_download().await {
        DownloadOutcome::Ready(download) => (
            [
                (
                    header::CONTENT_TYPE,
                    "text/plain; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", download.filename),
                ),
            ],
            download.content,
        )
            .into_response(),
        DownloadOutcome::Unavailable(response) => {
            (StatusCode::CONFLICT, Json(response)).into_response()
        }
    }
}

/// Axum handler for POST /api/reports/whatsapp
pub async fn send_whatsapp_report(
    State(state): State<AppState>,
    Json(request): Json<WhatsAppReportRequest>,
) -> impl IntoResponse {
    info!("POST /api/reports/whatsapp - to: {}", request.phone_number);

    let response = state.report_service.send_whatsapp(&request.phone_number).await;
    Json(response)
}

/// Axum handler for POST /api/reports/email
pub async fn send_email_report(
    State(state): State<AppState>,
    Json(request): Json<EmailReportRequest>,
) -> impl IntoResponse {
    info!("POST /api/reports/email - to: {}", request.parent_email);

    let response = state.report_service.send_email(&request.parent_email).await;
    Json(response)
}
