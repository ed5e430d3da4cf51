//! Report delivery sinks.
//!
//! Three mocked delivery paths over the same formatted report: a file
//! download, a WhatsApp deep link, and an email post. Delivery is
//! best-effort and must never corrupt or block the store: every sink reads a
//! store snapshot once, catches its own failures, and returns a tagged
//! outcome instead of an error. Each sink carries a constant artificial
//! delay standing in for a future real integration, and an in-flight flag
//! that rejects duplicate submissions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Utc};
use shared::{BudgetSnapshot, EmailReportPayload, ExpenseRecord, ReportDeliveryResponse};
use tracing::{info, warn};

use crate::store::SharedStore;

use super::{aggregation, report};

const PDF_GENERATION_DELAY: Duration = Duration::from_millis(1500);
const WHATSAPP_SEND_DELAY: Duration = Duration::from_millis(1000);
const EMAIL_SEND_DELAY: Duration = Duration::from_millis(1000);

/// A generated report ready to be served as a file attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub filename: String,
    pub content: String,
}

/// Outcome of the download sink.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Ready(DownloadReport),
    Unavailable(ReportDeliveryResponse),
}

/// Configuration for the (mocked) email delivery endpoint.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub endpoint: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.kidspend.example/reports/email".to_string(),
        }
    }
}

/// One flag per sink; a delivery in flight makes a second submission bounce
/// with a soft outcome instead of queueing.
#[derive(Clone, Default)]
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn try_begin(&self) -> Option<InFlightGuard> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard(self.0.clone()))
    }
}

struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct ReportService {
    store: SharedStore,
    email_config: EmailConfig,
    download_in_flight: InFlight,
    whatsapp_in_flight: InFlight,
    email_in_flight: InFlight,
}

impl ReportService {
    pub fn new(store: SharedStore) -> Self {
        Self::with_email_config(store, EmailConfig::default())
    }

    pub fn with_email_config(store: SharedStore, email_config: EmailConfig) -> Self {
        Self {
            store,
            email_config,
            download_in_flight: InFlight::default(),
            whatsapp_in_flight: InFlight::default(),
            email_in_flight: InFlight::default(),
        }
    }

    /// Generate the weekly report for download. Always succeeds once the
    /// content exists; whether the client saves it is not observed here.
    pub async fn generate_download(&self) -> DownloadOutcome {
        let _guard = match self.download_in_flight.try_begin() {
            Some(guard) => guard,
            None => {
                return DownloadOutcome::Unavailable(unavailable(
                    "A report download is already being generated",
                    None,
                ))
            }
        };

        let (snapshot, records) = match self.read_store() {
            Some(data) => data,
            None => {
                return DownloadOutcome::Unavailable(unavailable(
                    "Expense data is temporarily unavailable",
                    None,
                ))
            }
        };

        info!("Generating weekly report for download");
        tokio::time::sleep(PDF_GENERATION_DELAY).await;

        let report_date = Local::now().date_naive();
        let content = report::weekly_report(&snapshot, &records, report_date);
        let filename = report::report_filename(report_date);

        info!("Generated report {} ({} bytes)", filename, content.len());
        DownloadOutcome::Ready(DownloadReport { filename, content })
    }

    /// Build the WhatsApp deep link carrying the report. The client opens
    /// the link; success means the link was built.
    pub async fn send_whatsapp(&self, phone_number: &str) -> ReportDeliveryResponse {
        let recipient = Some(phone_number.to_string());

        let _guard = match self.whatsapp_in_flight.try_begin() {
            Some(guard) => guard,
            None => {
                return unavailable("A WhatsApp report is already being sent", recipient)
            }
        };

        let digits: String = phone_number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            warn!("Rejecting WhatsApp report: no digits in phone number '{}'", phone_number);
            return unavailable("Phone number must contain digits", recipient);
        }

        let (snapshot, records) = match self.read_store() {
            Some(data) => data,
            None => {
                return unavailable("Expense data is temporarily unavailable", recipient)
            }
        };

        info!("Sending WhatsApp report to {}", digits);
        tokio::time::sleep(WHATSAPP_SEND_DELAY).await;

        let report_date = Local::now().date_naive();
        let message = report::whatsapp_message(&snapshot, &records, report_date);
        let share_link = format!(
            "https://wa.me/{}?text={}",
            digits,
            urlencoding::encode(&message)
        );

        ReportDeliveryResponse {
            success: true,
            message: "WhatsApp report sent successfully".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            recipient,
            share_link: Some(share_link),
        }
    }

    /// Post the weekly report to the email endpoint (mocked transport).
    /// Failures come back as a soft outcome, never as an error.
    pub async fn send_email(&self, parent_email: &str) -> ReportDeliveryResponse {
        let recipient = Some(parent_email.to_string());

        let _guard = match self.email_in_flight.try_begin() {
            Some(guard) => guard,
            None => return unavailable("An email report is already being sent", recipient),
        };

        let email = parent_email.trim();
        if email.is_empty() || !email.contains('@') {
            warn!("Rejecting email report: '{}' is not a valid address", parent_email);
            return unavailable("A valid parent email address is required", recipient);
        }

        let (snapshot, records) = match self.read_store() {
            Some(data) => data,
            None => {
                return unavailable("Expense data is temporarily unavailable", recipient)
            }
        };

        let report_date = Local::now().date_naive();
        let payload = EmailReportPayload {
            parent_email: email.to_string(),
            report_data: report::weekly_report(&snapshot, &records, report_date),
            timestamp: Utc::now().to_rfc3339(),
        };

        match self.post_report(&payload).await {
            Ok(()) => ReportDeliveryResponse {
                success: true,
                message: "Weekly report sent successfully".to_string(),
                timestamp: Utc::now().to_rfc3339(),
                recipient,
                share_link: None,
            },
            Err(e) => {
                warn!("Email report delivery failed: {:?}", e);
                unavailable("Email service temporarily unavailable", recipient)
            }
        }
    }

    /// Mocked network call; a real integration would POST the payload to the
    /// configured endpoint.
    async fn post_report(&self, payload: &EmailReportPayload) -> anyhow::Result<()> {
        let body = serde_json::to_string(payload)?;
        tokio::time::sleep(EMAIL_SEND_DELAY).await;
        info!(
            "Posted weekly report ({} bytes) to {} for {}",
            body.len(),
            self.email_config.endpoint,
            payload.parent_email
        );
        Ok(())
    }

    /// One consistent read of the store at invocation time.
    fn read_store(&self) -> Option<(BudgetSnapshot, Vec<ExpenseRecord>)> {
        let store = self.store.read().ok()?;
        Some((aggregation::budget_snapshot(store.records()), store.snapshot()))
    }
}

fn unavailable(reason: &str, recipient: Option<String>) -> ReportDeliveryResponse {
    ReportDeliveryResponse {
        success: false,
        message: reason.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        recipient,
        share_link: None,
    }
}
