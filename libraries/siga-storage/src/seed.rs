//! Demo records used to bootstrap an empty store

use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use siga_core::{
    EventItem, EventStatus, Member, MemberStatus, MembershipType, TransactionItem,
    TransactionStatus, TransactionType,
};

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn member(id: &str, name: &str, email: &str, profession: &str, joined: NaiveDate, status: MemberStatus) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        address: None,
        profession: Some(profession.to_string()),
        membership_type: MembershipType::Active,
        join_date: Some(joined),
        status,
        payment_status: None,
    }
}

fn transaction(
    id: &str,
    kind: TransactionType,
    category: &str,
    description: &str,
    amount: f64,
    date: NaiveDate,
    status: TransactionStatus,
) -> TransactionItem {
    TransactionItem {
        id: id.to_string(),
        kind,
        category: category.to_string(),
        description: description.to_string(),
        amount,
        date,
        status,
    }
}

impl Snapshot {
    /// Fixed demo dataset written on first access
    pub fn seed() -> Self {
        let members = vec![
            member(
                "m1",
                "María López",
                "maria.lopez@example.com",
                "Abogada",
                day(2023, 8, 15),
                MemberStatus::Active,
            ),
            member(
                "m2",
                "Carlos Ruiz",
                "carlos.ruiz@example.com",
                "Ingeniero civil",
                day(2022, 11, 3),
                MemberStatus::Active,
            ),
            member(
                "m3",
                "Laura Sánchez",
                "laura.sanchez@example.com",
                "Diseñadora",
                day(2024, 2, 20),
                MemberStatus::Inactive,
            ),
        ];

        let events = vec![
            EventItem {
                id: "e1".to_string(),
                title: "Asamblea General".to_string(),
                date: day(2024, 6, 20),
                location: Some("Auditorio Central".to_string()),
                description: Some("Revisión de presupuesto y planes anuales".to_string()),
                capacity: Some(80),
                status: EventStatus::Scheduled,
                category: Some("general".to_string()),
                created_at: None,
            },
            EventItem {
                id: "e2".to_string(),
                title: "Taller de formación".to_string(),
                date: day(2024, 7, 5),
                location: Some("Sala 2".to_string()),
                description: Some("Capacitación interna para coordinadores".to_string()),
                capacity: Some(40),
                status: EventStatus::Scheduled,
                category: Some("training".to_string()),
                created_at: None,
            },
        ];

        let transactions = vec![
            transaction(
                "t1",
                TransactionType::Income,
                "Cuotas",
                "Pago mensual",
                150_000.0,
                day(2024, 5, 2),
                TransactionStatus::Cleared,
            ),
            transaction(
                "t2",
                TransactionType::Expense,
                "Logística",
                "Alquiler de salón",
                80_000.0,
                day(2024, 5, 10),
                TransactionStatus::Pending,
            ),
            transaction(
                "t3",
                TransactionType::Income,
                "Donaciones",
                "Aporte voluntario",
                200_000.0,
                day(2024, 4, 28),
                TransactionStatus::Cleared,
            ),
        ];

        Self {
            members,
            events,
            transactions,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_per_collection() {
        let seed = Snapshot::seed();
        let members: HashSet<_> = seed.members.iter().map(|m| m.id.as_str()).collect();
        let events: HashSet<_> = seed.events.iter().map(|e| e.id.as_str()).collect();
        let transactions: HashSet<_> = seed.transactions.iter().map(|t| t.id.as_str()).collect();

        assert_eq!(members.len(), 3);
        assert_eq!(events.len(), 2);
        assert_eq!(transactions.len(), 3);
    }

    #[test]
    fn seed_survives_a_json_round_trip() {
        let seed = Snapshot::seed();
        let decoded = crate::snapshot::decode(&seed.to_json().unwrap()).unwrap();
        assert_eq!(decoded.snapshot, seed);
        assert!(!decoded.migrated);
    }
}
