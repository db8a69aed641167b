// Archivo: mcule.rs
// Propósito: consultar precio y disponibilidad de un compuesto en MCULE a
// partir de su SMILES.
use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use crate::http::{build_client, fetch_json, join_url};
use chem_domain::AvailabilityReport;
use reqwest::{Client, RequestBuilder};
use serde_json::Value as JsonValue;
use std::future::Future;
use tracing::{debug, instrument};

pub struct MculeClient {
  client: Client,
  base_url: String,
  token: Option<String>,
}

impl MculeClient {
  pub fn new(config: &ProviderConfig) -> Result<Self> {
    Ok(Self { client: build_client(config.request_timeout)?,
              base_url: config.mcule_base_url.clone(),
              token: config.mcule_api_token.clone() })
  }

  fn authorized(&self, url: &str) -> Result<RequestBuilder> {
    let token = self.token.as_deref().ok_or(ProviderError::MissingCredential("MCULE_API_TOKEN"))?;
    Ok(self.client
           .get(url)
           .header("Authorization", format!("Token {}", token))
           .header("Accept", "application/json"))
  }

  /// Busca el MCULE ID correspondiente a un SMILES.
  #[instrument(skip(self))]
  pub async fn lookup_id(&self, smiles: &str) -> Result<Option<String>> {
    let url = join_url(&self.base_url, "search/lookup/");
    let request = self.authorized(&url)?.query(&[("query", smiles)]);
    let body = fetch_json("MCULE", request).await?;
    Ok(body.as_ref().and_then(parse_lookup))
  }

  async fn compound_json(&self, mcule_id: &str, resource: &str) -> Result<Option<JsonValue>> {
    let url = join_url(&self.base_url, &format!("compound/{}/{}/", mcule_id, resource));
    fetch_json("MCULE", self.authorized(&url)?).await
  }

  /// Informe combinado de precios y disponibilidad. `None` si el SMILES no
  /// tiene MCULE ID.
  #[instrument(skip(self))]
  pub async fn availability_report(&self, smiles: &str) -> Result<Option<AvailabilityReport>> {
    let Some(mcule_id) = self.lookup_id(smiles).await? else {
      debug!("SMILES sin MCULE ID");
      return Ok(None);
    };
    let id = mcule_id.as_str();
    let report = merge_compound_resources(id, move |resource| self.compound_json(id, resource)).await?;
    Ok(Some(report))
  }
}

/// Descarga `prices` y `availability` de un MCULE ID ya resuelto y los
/// combina. Un 404 en cualquiera de los dos es `ProviderError::NotFound`.
pub async fn merge_compound_resources<F, Fut>(mcule_id: &str, mut fetch: F) -> Result<AvailabilityReport>
  where F: FnMut(&'static str) -> Fut,
        Fut: Future<Output = Result<Option<JsonValue>>>
{
  let require = |resource: &'static str, body: Option<JsonValue>| {
    body.ok_or_else(|| ProviderError::NotFound(format!("{} de {}", resource, mcule_id)))
  };
  let prices = require("prices", fetch("prices").await?)?;
  let availability = require("availability", fetch("availability").await?)?;
  Ok(AvailabilityReport::merge(mcule_id, prices, availability)?)
}

/// `results[0].mcule_id` de la respuesta de búsqueda.
pub fn parse_lookup(body: &JsonValue) -> Option<String> {
  body.get("results")?.as_array()?.first()?.get("mcule_id")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn parses_first_result() {
    let body = json!({"results": [{"mcule_id": "MCULE-4378290539", "smiles": "CCO"}, {"mcule_id": "MCULE-2"}]});
    assert_eq!(parse_lookup(&body).as_deref(), Some("MCULE-4378290539"));
    assert!(parse_lookup(&json!({"results": []})).is_none());
    assert!(parse_lookup(&json!({})).is_none());
  }

  #[tokio::test]
  async fn merges_prices_then_availability() {
    let mut requested = Vec::new();
    let merged = merge_compound_resources("MCULE-1", |resource| {
      requested.push(resource);
      let body = match resource {
        "prices" => json!({"best_price": 12.0}),
        _ => json!({"available": true}),
      };
      async move { Ok(Some(body)) }
    }).await;
    let report = merged.unwrap();
    assert_eq!(requested, vec!["prices", "availability"]);
    assert_eq!(report.keys().collect::<Vec<_>>(), vec!["mcule_id", "best_price", "available"]);
  }

  #[tokio::test]
  async fn missing_resource_after_lookup_is_not_found() {
    let merged = merge_compound_resources("MCULE-1", |resource| async move {
      Ok(if resource == "prices" { Some(json!({"best_price": 1})) } else { None })
    }).await;
    match merged {
      Err(ProviderError::NotFound(msg)) => assert_eq!(msg, "availability de MCULE-1"),
      other => panic!("expected NotFound, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn status_errors_propagate() {
    let merged = merge_compound_resources("MCULE-1", |_resource| async {
      Err(ProviderError::Status { service: "MCULE", status: 503 })
    }).await;
    assert!(matches!(merged, Err(ProviderError::Status { status: 503, .. })));
  }

  #[tokio::test]
  async fn lookup_without_token_fails_before_network() {
    let client = MculeClient::new(&ProviderConfig::default()).unwrap();
    let err = client.lookup_id("CCO").await.unwrap_err();
    assert!(matches!(err, ProviderError::MissingCredential("MCULE_API_TOKEN")));
  }
}
