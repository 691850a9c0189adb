//! Wiring: configuration in, containers out

use crate::config::{BackendKind, SigaConfig};
use crate::error::{CliError, Result};
use async_trait::async_trait;
use siga_client::{ApiClient, ClientConfig, RestRepository};
use siga_core::{
    AuthUser, Credentials, Entity, EventItem, Member, Registration, Repository, SigaError,
    TransactionItem,
};
use siga_state::{AuthContainer, AuthProvider, EventContainer, MemberContainer, TransactionContainer};
use siga_storage::{Collection, LocalRepository, Store};
use std::sync::Arc;
use tracing::info;

/// Everything a command needs
pub struct App {
    pub backend: BackendKind,
    pub members: MemberContainer,
    pub events: EventContainer,
    pub transactions: TransactionContainer,
    pub auth: AuthContainer,
    /// Present with the local backend only
    pub store: Option<Arc<Store>>,
}

impl App {
    pub async fn build(config: &SigaConfig) -> Result<Self> {
        config.validate()?;

        let (members, events, transactions, store) = match config.backend.kind {
            BackendKind::Local => {
                let store = Arc::new(Store::open(&config.storage).await);
                (
                    local::<Member>(&store),
                    local::<EventItem>(&store),
                    local::<TransactionItem>(&store),
                    Some(store),
                )
            }
            BackendKind::Rest => {
                let mut client_config = ClientConfig::new(config.backend.base_url.clone())
                    .with_timeout(config.backend.timeout());
                if let Some(token) = &config.backend.token {
                    client_config = client_config.with_token(token.clone());
                }
                let client = Arc::new(ApiClient::new(client_config)?);
                info!(url = %client.base_url(), "Using REST backend");
                (
                    rest::<Member>(&client),
                    rest::<EventItem>(&client),
                    rest::<TransactionItem>(&client),
                    None,
                )
            }
        };

        let operator = OperatorProvider::from_config(config);
        let auth = AuthContainer::new(Arc::new(operator))
            .with_default_role(config.auth.default_role.clone());

        Ok(Self {
            backend: config.backend.kind,
            members: MemberContainer::new(members),
            events: EventContainer::new(events),
            transactions: TransactionContainer::new(transactions),
            auth,
            store,
        })
    }

    /// The local store, or an error naming the command that needs it
    pub fn store(&self, what: &str) -> Result<&Arc<Store>> {
        self.store.as_ref().ok_or_else(|| CliError::Unsupported {
            backend: self.backend.as_str(),
            what: what.to_string(),
        })
    }
}

fn local<E: Collection>(store: &Arc<Store>) -> Arc<dyn Repository<E>> {
    Arc::new(LocalRepository::<E>::new(Arc::clone(store)))
}

fn rest<E: Entity>(client: &Arc<ApiClient>) -> Arc<dyn Repository<E>> {
    Arc::new(RestRepository::<E>::new(Arc::clone(client)))
}

/// Session source for the console: the operator named in the configuration
///
/// The console does not sign anyone in; login and registration belong to the
/// web front end and are refused here.
pub struct OperatorProvider {
    operator: Option<AuthUser>,
}

impl OperatorProvider {
    pub fn from_config(config: &SigaConfig) -> Self {
        let operator = config.auth.operator_email.as_ref().map(|email| AuthUser {
            uid: email.clone(),
            email: email.clone(),
            display_name: config.auth.operator_name.clone(),
            photo_url: None,
            role: None,
        });
        Self { operator }
    }
}

#[async_trait]
impl AuthProvider for OperatorProvider {
    async fn login(&self, _credentials: &Credentials) -> siga_core::Result<AuthUser> {
        Err(SigaError::Other(
            "sign-in is not available from the console".to_string(),
        ))
    }

    async fn register(&self, _registration: &Registration) -> siga_core::Result<AuthUser> {
        Err(SigaError::Other(
            "registration is not available from the console".to_string(),
        ))
    }

    async fn logout(&self) -> siga_core::Result<()> {
        Ok(())
    }

    async fn current_user(&self) -> siga_core::Result<Option<AuthUser>> {
        Ok(self.operator.clone())
    }
}
