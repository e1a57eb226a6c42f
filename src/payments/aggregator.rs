//! Upcoming-payments aggregation
//!
//! Merges subscription and loan records into one ordered list of near-term
//! payment obligations. Pure: no I/O, no clock reads; the evaluation instant
//! is a parameter, so the output is deterministic for fixed inputs.

use chrono::{DateTime, Utc};

use super::models::{UpcomingPayment, LOAN_LABEL, SUBSCRIPTION_LABEL};
use crate::loans::Loan;
use crate::subscriptions::Subscription;

/// Build the unified upcoming-payments list.
///
/// Included: records not marked paid whose due date is strictly after `now`.
/// Records with unparseable due dates are dropped. Output is ordered by due
/// date ascending; ties keep input order, subscriptions before loans.
pub fn build_upcoming_payments(
    subscriptions: &[Subscription],
    loans: &[Loan],
    now: DateTime<Utc>,
) -> Vec<UpcomingPayment> {
    let mut payments: Vec<UpcomingPayment> = Vec::new();

    for subscription in subscriptions {
        if subscription.is_paid {
            continue;
        }
        let Some(due_date) = parse_due_date(&subscription.due_date) else {
            continue;
        };
        if due_date <= now {
            continue;
        }

        payments.push(UpcomingPayment {
            kind: SUBSCRIPTION_LABEL.to_string(),
            name: resolve_name(&subscription.title, subscription.description.as_deref()),
            amount: subscription.amount,
            due_date,
        });
    }

    for loan in loans {
        if loan.is_paid {
            continue;
        }
        let Some(due_date) = parse_due_date(&loan.due_date) else {
            continue;
        };
        if due_date <= now {
            continue;
        }

        payments.push(UpcomingPayment {
            kind: LOAN_LABEL.to_string(),
            name: resolve_name(&loan.title, loan.description.as_deref()),
            amount: loan.amount,
            due_date,
        });
    }

    // Stable: ties keep the push order above
    payments.sort_by_key(|payment| payment.due_date);

    payments
}

/// Title wins when non-blank after trimming, else description, else empty.
/// A nameless item is still included.
fn resolve_name(title: &str, description: Option<&str>) -> String {
    let title = title.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Parse an RFC 3339 due date; `None` for malformed values
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn subscription(title: &str, description: Option<&str>, amount: f64, due_date: &str, is_paid: bool) -> Subscription {
        Subscription {
            id: "SB_TEST01".to_string(),
            user_id: "U_TEST01".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            amount,
            due_date: due_date.to_string(),
            is_paid,
            created_at: None,
            updated_at: None,
        }
    }

    fn loan(title: &str, description: Option<&str>, amount: f64, due_date: &str, is_paid: bool) -> Loan {
        Loan {
            id: "LN_TEST01".to_string(),
            user_id: "U_TEST01".to_string(),
            title: title.to_string(),
            description: description.map(str::to_string),
            amount,
            total_amount: amount * 10.0,
            installments: 10,
            installments_paid: 0,
            due_date: due_date.to_string(),
            is_paid,
            created_at: None,
            updated_at: None,
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_netflix_then_car_loan_scenario() {
        let tomorrow = (now() + Duration::days(1)).to_rfc3339();
        let in_two_days = (now() + Duration::days(2)).to_rfc3339();

        let subscriptions = vec![subscription("Netflix", None, 39.9, &tomorrow, false)];
        let loans = vec![loan("  ", Some("Car Loan"), 500.0, &in_two_days, false)];

        let payments = build_upcoming_payments(&subscriptions, &loans, now());

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].name, "Netflix");
        assert_eq!(payments[0].kind, "Assinatura");
        assert_eq!(payments[0].amount, 39.9);
        assert_eq!(payments[1].name, "Car Loan");
        assert_eq!(payments[1].kind, "Empréstimo");
        assert_eq!(payments[1].amount, 500.0);
    }

    #[test]
    fn test_paid_and_past_due_items_are_excluded() {
        let tomorrow = (now() + Duration::days(1)).to_rfc3339();
        let yesterday = (now() - Duration::days(1)).to_rfc3339();

        let subscriptions = vec![
            subscription("Paid", None, 10.0, &tomorrow, true),
            subscription("Past", None, 10.0, &yesterday, false),
            subscription("Kept", None, 10.0, &tomorrow, false),
        ];

        let payments = build_upcoming_payments(&subscriptions, &[], now());

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].name, "Kept");
    }

    #[test]
    fn test_due_exactly_now_is_not_upcoming() {
        let at_now = now().to_rfc3339();
        let subscriptions = vec![subscription("Boundary", None, 10.0, &at_now, false)];

        let payments = build_upcoming_payments(&subscriptions, &[], now());

        assert!(payments.is_empty());
    }

    #[test]
    fn test_sorted_ascending_regardless_of_input_order() {
        let d1 = (now() + Duration::days(1)).to_rfc3339();
        let d3 = (now() + Duration::days(3)).to_rfc3339();
        let d5 = (now() + Duration::days(5)).to_rfc3339();

        let subscriptions = vec![
            subscription("Third", None, 1.0, &d5, false),
            subscription("First", None, 1.0, &d1, false),
        ];
        let loans = vec![loan("Second", None, 1.0, &d3, false)];

        let payments = build_upcoming_payments(&subscriptions, &loans, now());

        let names: Vec<&str> = payments.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let same_day = (now() + Duration::days(2)).to_rfc3339();

        let subscriptions = vec![
            subscription("Sub A", None, 1.0, &same_day, false),
            subscription("Sub B", None, 1.0, &same_day, false),
        ];
        let loans = vec![loan("Loan A", None, 1.0, &same_day, false)];

        let payments = build_upcoming_payments(&subscriptions, &loans, now());

        let names: Vec<&str> = payments.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Sub A", "Sub B", "Loan A"]);
    }

    #[test]
    fn test_blank_title_and_description_yield_empty_name() {
        let tomorrow = (now() + Duration::days(1)).to_rfc3339();
        let subscriptions = vec![subscription("   ", Some("  "), 5.0, &tomorrow, false)];

        let payments = build_upcoming_payments(&subscriptions, &[], now());

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].name, "");
    }

    #[test]
    fn test_title_wins_over_description() {
        let tomorrow = (now() + Duration::days(1)).to_rfc3339();
        let subscriptions = vec![subscription(
            " Spotify ",
            Some("Music"),
            5.0,
            &tomorrow,
            false,
        )];

        let payments = build_upcoming_payments(&subscriptions, &[], now());

        assert_eq!(payments[0].name, "Spotify");
    }

    #[test]
    fn test_malformed_due_dates_are_skipped() {
        let tomorrow = (now() + Duration::days(1)).to_rfc3339();

        let subscriptions = vec![
            subscription("Broken", None, 5.0, "not-a-date", false),
            subscription("Kept", None, 5.0, &tomorrow, false),
        ];
        let loans = vec![loan("Also broken", None, 5.0, "2026-99-99", false)];

        let payments = build_upcoming_payments(&subscriptions, &loans, now());

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].name, "Kept");
    }

    #[test]
    fn test_offset_timestamps_compare_in_utc() {
        // 21:00 in -03:00 is midnight UTC the next day
        let subscriptions = vec![subscription(
            "Offset",
            None,
            5.0,
            "2026-08-07T21:00:00-03:00",
            false,
        )];

        let payments = build_upcoming_payments(&subscriptions, &[], now());

        assert_eq!(payments.len(), 1);
        assert_eq!(
            payments[0].due_date,
            Utc.with_ymd_and_hms(2026, 8, 8, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let tomorrow = (now() + Duration::days(1)).to_rfc3339();
        let subscriptions = vec![subscription("Netflix", None, 39.9, &tomorrow, false)];

        let first = build_upcoming_payments(&subscriptions, &[], now());
        let second = build_upcoming_payments(&subscriptions, &[], now());

        assert_eq!(first, second);
    }
}
