//! SIGA Client
//!
//! Repositories backed by a SIGA REST API. They implement the same
//! [`siga_core::Repository`] trait as the local store, so state containers
//! work unchanged against either backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use siga_client::{ApiClient, ClientConfig, RestRepository};
//! use siga_core::{Member, Repository};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig::new("http://localhost:3001/api"))?;
//! let members = RestRepository::<Member>::new(Arc::new(client));
//!
//! let all = members.get_all().await?.into_inner();
//! println!("{} members", all.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod repository;

pub use client::{ApiClient, ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use repository::RestRepository;
