//! Member queries beyond plain CRUD

use crate::store::Store;
use serde::{Deserialize, Serialize};
use siga_core::{error::Result, Member, MemberStatus};

/// Headcount by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

/// Count members; everyone not `active` counts as inactive
pub fn stats_of(members: &[Member]) -> MemberStats {
    let active = members
        .iter()
        .filter(|m| m.status == MemberStatus::Active)
        .count();

    MemberStats {
        total: members.len(),
        active,
        inactive: members.len() - active,
    }
}

pub async fn stats(store: &Store) -> Result<MemberStats> {
    let snapshot = store.load().await?;
    Ok(stats_of(&snapshot.members))
}

/// Case-insensitive match on name or email
pub fn matches(member: &Member, query: &str) -> bool {
    let needle = query.to_lowercase();
    member.name.to_lowercase().contains(&needle) || member.email.to_lowercase().contains(&needle)
}

pub async fn search(store: &Store, query: &str) -> Result<Vec<Member>> {
    let snapshot = store.load().await?;
    Ok(snapshot
        .members
        .into_iter()
        .filter(|m| matches(m, query))
        .collect())
}
