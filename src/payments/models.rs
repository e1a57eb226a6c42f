use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display label for subscription obligations
pub const SUBSCRIPTION_LABEL: &str = "Assinatura";

/// Display label for loan obligations
pub const LOAN_LABEL: &str = "Empréstimo";

/// One near-term payment obligation, ready for dashboard display.
///
/// `kind` is a presentation label, not an enum identifier: the dashboard
/// renders it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingPayment {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
}
