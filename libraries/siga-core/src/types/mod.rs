pub mod ids;

use serde::{Deserialize, Deserializer};

mod auth;
mod event;
mod member;
mod transaction;

pub use auth::{AuthUser, Credentials, Registration};
pub use event::{CreateEvent, EventItem, EventStatus, UpdateEvent};
pub use member::{CreateMember, Member, MemberStatus, MembershipType, PaymentStatus, UpdateMember};
pub use transaction::{
    CreateTransaction, TransactionItem, TransactionStatus, TransactionType, UpdateTransaction,
};

/// Overwrite `slot` when the patch carries a value
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Patch value for an optional record field
///
/// `None` keeps the field, `Some(None)` clears it, `Some(Some(v))` sets it.
/// Merged with `merge` like any other patch field.
pub type Clearable<T> = Option<Option<T>>;

/// Deserialize a `Clearable` field, keeping an explicit `null` apart from absence
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn clearable<'de, D, T>(deserializer: D) -> Result<Clearable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
