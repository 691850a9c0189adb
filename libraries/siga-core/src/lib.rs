//! SIGA Core
//!
//! Platform-agnostic domain types, traits, and error handling for the SIGA
//! association console.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Member`, `EventItem`, `TransactionItem`, `AuthUser`
//! - **Core Traits**: `Entity`, `Repository`
//! - **Envelope**: the `{ data }` wrapper every repository call returns
//! - **Error Handling**: Unified `SigaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use siga_core::{CreateMember, Entity, Member};
//!
//! let member = Member::build(CreateMember::new("María López", "maria.lopez@example.com")).unwrap();
//! assert!(!member.id().is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod entity;
pub mod envelope;
pub mod error;
pub mod repository;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use entity::{Entity, EntityKind};
pub use envelope::Envelope;
pub use error::{Result, SigaError};
pub use repository::Repository;

pub use types::{
    // Members
    CreateMember, Member, MemberStatus, MembershipType, PaymentStatus, UpdateMember,
    // Events
    CreateEvent, EventItem, EventStatus, UpdateEvent,
    // Finance
    CreateTransaction, TransactionItem, TransactionStatus, TransactionType, UpdateTransaction,
    // Session
    AuthUser, Credentials, Registration,
    // Patches
    Clearable,
};
