//! `Repository` over the REST backend.
//!
//! Resource layout: `GET/POST {base}/{collection}` and
//! `GET/PUT/DELETE {base}/{collection}/{id}`. Response bodies are the bare
//! records; the envelope is added here. Records keyed by a legacy `_id` are
//! accepted, records without any id are refused.

use crate::client::{check, parse, ApiClient};
use crate::error::{ClientError, Result as ClientResult};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use siga_core::types::ids;
use siga_core::{Entity, Envelope, Repository, Result};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

pub struct RestRepository<E> {
    client: Arc<ApiClient>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RestRepository<E> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> RestRepository<E> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Fetch a single record; `404` means there is none
    async fn fetch_optional(
        &self,
        method: Method,
        id: &str,
        body: Option<&E::Update>,
    ) -> ClientResult<Option<E>> {
        let url = self.client.endpoint(&[E::COLLECTION, id])?;
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.client.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record = decode_record(parse(check(response).await?).await?)?;
        Ok(Some(record))
    }
}

/// Decode one backend record with its id normalized
fn decode_record<E: Entity>(value: Value) -> ClientResult<E> {
    let Value::Object(mut fields) = value else {
        return Err(ClientError::ParseError(format!(
            "{} record is not a JSON object",
            E::KIND
        )));
    };
    if !ids::normalize_record(&mut fields) {
        return Err(ClientError::ParseError(format!("{} record has no id", E::KIND)));
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| ClientError::ParseError(e.to_string()))
}

#[async_trait]
impl<E: Entity> Repository<E> for RestRepository<E> {
    async fn get_all(&self) -> Result<Envelope<Vec<E>>> {
        let url = self.client.endpoint(&[E::COLLECTION])?;
        let response = self.client.send(self.client.request(Method::GET, url)).await?;
        let records: Vec<Value> = parse(check(response).await?).await?;
        let items = records
            .into_iter()
            .map(decode_record::<E>)
            .collect::<ClientResult<Vec<E>>>()?;

        debug!(entity = %E::KIND, count = items.len(), "Fetched collection");
        Ok(Envelope::new(items))
    }

    async fn get_by_id(&self, id: &str) -> Result<Envelope<Option<E>>> {
        Ok(Envelope::new(self.fetch_optional(Method::GET, id, None).await?))
    }

    async fn create(&self, draft: E::Create) -> Result<Envelope<E>> {
        let url = self.client.endpoint(&[E::COLLECTION])?;
        let request = self.client.request(Method::POST, url).json(&draft);
        let response = self.client.send(request).await?;
        let created: E = decode_record(parse(check(response).await?).await?)?;

        debug!(entity = %E::KIND, id = %created.id(), "Created record");
        Ok(Envelope::new(created))
    }

    async fn update(&self, id: &str, patch: E::Update) -> Result<Envelope<Option<E>>> {
        let updated = self.fetch_optional(Method::PUT, id, Some(&patch)).await?;
        debug!(entity = %E::KIND, id, found = updated.is_some(), "Updated record");
        Ok(Envelope::new(updated))
    }

    async fn delete(&self, id: &str) -> Result<Envelope<bool>> {
        let url = self.client.endpoint(&[E::COLLECTION, id])?;
        let response = self
            .client
            .send(self.client.request(Method::DELETE, url))
            .await?;

        if response.status() != StatusCode::NOT_FOUND {
            check(response).await?;
        }

        debug!(entity = %E::KIND, id, "Deleted record");
        Ok(Envelope::new(true))
    }
}
