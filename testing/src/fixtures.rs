//! Sample catalog data.

use ticket_ledger_core::{Catalog, Ticket};

/// A small catalog in the production CSV layout.
///
/// Three categories in first-seen order: Adult (2 tickets), Student
/// (2 tickets), Child (1 ticket).
pub const SAMPLE_CSV: &str = "\
category_title,category_id,category_description,topup_title,topup_id,topup_description,topup_price_in_pence,topup_entitlement_type,topup_entitlement_unit,topup_entitlement_value,topup_entitlement_quantity,topup_entitlement_start_date,topup_entitlement_end_date,topup_passenger_class_name
Adult,cat-adult,Tickets for adults,Single,adult-single,One journey,250,fixed,journey,1,1,,,Adult
Adult,cat-adult,Tickets for adults,Day Rider,adult-day,Unlimited travel for a day,450,period,day,1,1,2025-01-01,2025-12-31,Adult
Student,cat-student,Tickets for students,Single,student-single,One journey,150,fixed,journey,1,1,,,Student
Student,cat-student,Tickets for students,Weekly,student-weekly,Seven days of travel,1200,period,day,7,1,,,Student
Child,cat-child,Tickets for children,Single,child-single,One journey,100,fixed,journey,1,1,,,Child
";

/// Catalog parsed from [`SAMPLE_CSV`].
///
/// # Panics
///
/// Panics if the embedded CSV does not parse.
#[must_use]
#[allow(clippy::expect_used)]
pub fn sample_catalog() -> Catalog {
    Catalog::from_reader(SAMPLE_CSV.as_bytes()).expect("sample catalog should parse")
}

/// The Adult "Single" ticket at 250 pence.
///
/// # Panics
///
/// Panics if the sample catalog no longer contains it.
#[must_use]
#[allow(clippy::expect_used)]
pub fn adult_single() -> Ticket {
    sample_catalog()
        .category("Adult")
        .and_then(|category| category.ticket(0))
        .cloned()
        .expect("sample catalog has an Adult Single ticket")
}
