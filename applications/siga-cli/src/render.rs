//! One-line text rendering of records

use serde::Serialize;
use siga_core::{EventItem, Member, TransactionItem};
use siga_storage::members::MemberStats;
use siga_storage::transactions::FinanceSummary;

/// Wire name of an enum value (`active`, `income`, ...)
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::from("?"),
    }
}

pub fn member(m: &Member) -> String {
    let mut line = format!(
        "{}\t{} <{}>\t{}\t{}",
        m.id,
        m.name,
        m.email,
        label(&m.status),
        label(&m.membership_type)
    );
    if let Some(phone) = &m.phone {
        line.push_str(&format!("\ttel. {phone}"));
    }
    line
}

pub fn event(e: &EventItem) -> String {
    let mut line = format!("{}\t{}\t{}\t[{}]", e.id, e.date, e.title, label(&e.status));
    if let Some(location) = &e.location {
        line.push_str(&format!("\t@ {location}"));
    }
    if let Some(capacity) = e.capacity {
        line.push_str(&format!("\tcupo {capacity}"));
    }
    line
}

pub fn transaction(t: &TransactionItem) -> String {
    format!(
        "{}\t{}\t{:+.2}\t{}\t{}\t[{}]",
        t.id,
        t.date,
        t.signed_amount(),
        t.category,
        t.description,
        label(&t.status)
    )
}

pub fn member_stats(stats: &MemberStats) -> String {
    format!(
        "total {}\tactive {}\tinactive {}",
        stats.total, stats.active, stats.inactive
    )
}

pub fn summary(summary: &FinanceSummary) -> String {
    format!(
        "income {:.2}\texpenses {:.2}\tbalance {:.2}",
        summary.income, summary.expenses, summary.balance
    )
}
