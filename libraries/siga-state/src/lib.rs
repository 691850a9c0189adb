//! SIGA State
//!
//! Client-side state for the SIGA console: one reducer-driven cache per
//! collection plus the session container.
//!
//! Containers are transport-agnostic. They talk to any
//! [`siga_core::Repository`], so the local store and the REST backend are
//! interchangeable.
//!
//! # Example
//!
//! ```rust,no_run
//! use siga_core::Member;
//! use siga_state::MemberContainer;
//! use siga_storage::{LocalRepository, Store};
//! use std::sync::Arc;
//!
//! # async fn example() -> siga_core::Result<()> {
//! let store = Arc::new(Store::in_memory());
//! let members = MemberContainer::new(Arc::new(LocalRepository::<Member>::new(store)));
//!
//! members.load().await?;
//! for member in members.items() {
//!     println!("{}", member.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod container;
pub mod messages;
pub mod reducer;

pub use auth::{reduce_auth, AuthAction, AuthContainer, AuthProvider, AuthState, DEFAULT_ROLE};
pub use container::{Container, EventContainer, MemberContainer, TransactionContainer};
pub use messages::Operation;
pub use reducer::{reduce, Action, CollectionState, Phase};
