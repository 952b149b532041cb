use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
  config::ClientConfig,
  error::{AppError, ErrorBody},
  models::{Category, DetailedStats, NewTransaction, StatsSummary, Transaction, TransactionId, TransactionQuery},
};

/// The backend HTTP contract. Every data-fetching component talks to the
/// server only through this trait.
#[allow(async_fn_in_trait)]
pub trait Backend {
  async fn health(&self) -> Result<(), AppError>;
  async fn db_check(&self) -> Result<serde_json::Value, AppError>;
  async fn stats(&self) -> Result<StatsSummary, AppError>;
  async fn detailed_stats(&self) -> Result<DetailedStats, AppError>;
  async fn categories(&self) -> Result<Vec<Category>, AppError>;
  async fn seed_categories(&self) -> Result<(), AppError>;
  async fn transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, AppError>;
  async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, AppError>;
  async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError>;
}

// Backend over reqwest
#[derive(Debug, Clone)]
pub struct HttpBackend {
  client: reqwest::Client,
  api_base: String,
  health_url: String,
}

impl HttpBackend {
  pub fn new(client: reqwest::Client, api_base: &str, health_url: &str) -> Self {
    Self {
      client,
      api_base: api_base.trim_end_matches('/').to_string(),
      health_url: health_url.to_string(),
    }
  }

  pub fn from_config(config: &ClientConfig) -> Self {
    Self::new(reqwest::Client::new(), &config.api_base, &config.health_url)
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}{}", self.api_base, path)
  }

  async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, AppError> {
    let resp = req.send().await.map_err(|e| AppError::Connection(e.to_string()))?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let detail = resp.json::<ErrorBody>().await.ok().and_then(|body| body.message());
    warn!("request rejected with status {}: {:?}", status.as_u16(), detail);
    Err(AppError::Server { status: status.as_u16(), detail })
  }

  async fn fetch<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T, AppError> {
    let resp = self.send(req).await?;
    resp.json::<T>().await.map_err(|e| AppError::Deserialize(e.to_string()))
  }
}

impl Backend for HttpBackend {
  async fn health(&self) -> Result<(), AppError> {
    self.send(self.client.get(&self.health_url)).await?;
    Ok(())
  }

  async fn db_check(&self) -> Result<serde_json::Value, AppError> {
    self.fetch(self.client.get(self.url("/db/check"))).await
  }

  async fn stats(&self) -> Result<StatsSummary, AppError> {
    self.fetch(self.client.get(self.url("/stats"))).await
  }

  async fn detailed_stats(&self) -> Result<DetailedStats, AppError> {
    self.fetch(self.client.get(self.url("/stats/detailed"))).await
  }

  async fn categories(&self) -> Result<Vec<Category>, AppError> {
    self.fetch(self.client.get(self.url("/categories"))).await
  }

  async fn seed_categories(&self) -> Result<(), AppError> {
    self.send(self.client.post(self.url("/categories/seed"))).await?;
    Ok(())
  }

  async fn transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, AppError> {
    debug!("fetching transactions {:?}", query);
    self.fetch(self.client.get(self.url("/transactions")).query(query)).await
  }

  async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, AppError> {
    self.fetch(self.client.post(self.url("/transactions")).json(new)).await
  }

  async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
    self.send(self.client.delete(self.url(&format!("/transactions/{}", id)))).await?;
    Ok(())
  }
}
