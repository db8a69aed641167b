// Archivo: ctx.rs
// Propósito: cliente de la API CompTox (CTX) de la EPA: búsqueda de DTXSID
// por número CAS y descarga de registros de peligrosidad.
use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use crate::http::{build_client, fetch_json, join_url};
use chem_domain::{CasNumber, HazardRecord};
use reqwest::{Client, RequestBuilder};
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

pub struct CtxClient {
  client: Client,
  base_url: String,
  api_key: Option<String>,
}

impl CtxClient {
  pub fn new(config: &ProviderConfig) -> Result<Self> {
    Ok(Self { client: build_client(config.toxicity_timeout)?,
              base_url: config.ctx_base_url.clone(),
              api_key: config.ctx_api_key.clone() })
  }

  fn authorized(&self, url: &str) -> Result<RequestBuilder> {
    let key = self.api_key.as_deref().ok_or(ProviderError::MissingCredential("CTX_API_KEY"))?;
    Ok(self.client.get(url).header("x-api-key", key).header("Accept", "application/json"))
  }

  #[instrument(skip(self, cas), fields(cas = %cas))]
  pub async fn dtxsid_for(&self, cas: &CasNumber) -> Result<Option<String>> {
    let url = join_url(&self.base_url, &format!("chemical/search/equal/{}", cas));
    let body = fetch_json("EPA CompTox", self.authorized(&url)?).await?;
    Ok(body.as_ref().and_then(parse_dtxsid))
  }

  #[instrument(skip(self))]
  pub async fn hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>> {
    let url = join_url(&self.base_url, &format!("hazard/search/by-dtxsid/{}", dtxsid));
    match fetch_json("EPA CompTox", self.authorized(&url)?).await? {
      Some(body) => {
        let records = parse_hazards(&body)?;
        debug!(count = records.len(), "registros de peligrosidad");
        Ok(records)
      }
      None => Ok(Vec::new()),
    }
  }
}

/// DTXSID del primer resultado. La API devuelve un arreglo, pero se acepta
/// también un objeto suelto.
pub fn parse_dtxsid(body: &JsonValue) -> Option<String> {
  let first = match body {
    JsonValue::Array(items) => items.first()?,
    obj @ JsonValue::Object(_) => obj,
    _ => return None,
  };
  first.get("dtxsid")?.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

pub fn parse_hazards(body: &JsonValue) -> Result<Vec<HazardRecord>> {
  let items = body.as_array()
                  .ok_or_else(|| ProviderError::UnexpectedFormat("se esperaba un arreglo de registros".to_string()))?;
  items.iter()
       .map(|item| serde_json::from_value::<HazardRecord>(item.clone()).map_err(ProviderError::from))
       .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn dtxsid_from_array_or_object() {
    assert_eq!(parse_dtxsid(&json!([{"dtxsid": "DTXSID7021175", "rank": 1}])).as_deref(), Some("DTXSID7021175"));
    assert_eq!(parse_dtxsid(&json!({"dtxsid": "DTXSID1"})).as_deref(), Some("DTXSID1"));
    assert!(parse_dtxsid(&json!([])).is_none());
    assert!(parse_dtxsid(&json!("DTXSID1")).is_none());
  }

  #[test]
  fn hazards_parse_and_reject_non_arrays() {
    let body = json!([
      {"toxvalType": "LC50", "toxvalNumericQualifier": "=", "toxvalNumeric": 1.2, "toxvalUnits": "mg/L",
       "speciesCommon": "Fathead minnow", "exposureRoute": "aquatic", "riskAssessmentClass": "acute"}
    ]);
    let records = parse_hazards(&body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].toxicity_value(), "LC50=1.2 mg/L");
    assert!(matches!(parse_hazards(&json!({"title": "Not Found"})), Err(ProviderError::UnexpectedFormat(_))));
  }
}
