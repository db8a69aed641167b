// Archivo: chembl.rs
// Propósito: descargar los registros de actividad de una molécula desde la
// API REST de ChEMBL, siguiendo la paginación de `page_meta.next`.
use crate::config::ProviderConfig;
use crate::errors::{ProviderError, Result};
use crate::http::{build_client, fetch_json, join_url, resolve_url};
use chem_domain::BioactivityRecord;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::future::Future;
use tracing::{debug, instrument, warn};

/// Una página de `/activity.json`.
#[derive(Debug, Clone, Default)]
pub struct ActivityPage {
  pub records: Vec<BioactivityRecord>,
  /// Referencia a la siguiente página, si la hay.
  pub next: Option<String>,
  pub total_count: Option<u64>,
}

pub struct ChemblClient {
  client: Client,
  base_url: String,
  page_limit: u32,
}

impl ChemblClient {
  pub fn new(config: &ProviderConfig) -> Result<Self> {
    Ok(Self { client: build_client(config.request_timeout)?,
              base_url: config.chembl_base_url.clone(),
              page_limit: config.chembl_page_limit })
  }

  pub fn first_page_url(&self, chembl_id: &str) -> String {
    join_url(&self.base_url,
             &format!("activity.json?molecule_chembl_id={}&limit={}&offset=0", chembl_id, self.page_limit))
  }

  /// Todos los registros de actividad de `chembl_id`, en el orden del
  /// servidor.
  #[instrument(skip(self))]
  pub async fn activities(&self, chembl_id: &str) -> Result<Vec<BioactivityRecord>> {
    let first = self.first_page_url(chembl_id);
    collect_pages(&self.base_url, first, |url| async move {
      debug!(url = %url, "descargando página de actividades");
      fetch_json("ChEMBL", self.client.get(&url).header("Accept", "application/json"))
        .await?
        .ok_or_else(|| ProviderError::NotFound(format!("actividades de {}", chembl_id)))
    }).await
  }
}

/// Recorre las páginas desde `first_url` siguiendo `page_meta.next` hasta que
/// no haya siguiente o una página llegue vacía. Los enlaces `next` se
/// resuelven contra `base_url` antes de pasarlos a `fetch`.
pub async fn collect_pages<F, Fut>(base_url: &str, first_url: String, mut fetch: F) -> Result<Vec<BioactivityRecord>>
  where F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<JsonValue>>
{
  let mut url = first_url;
  let mut records = Vec::new();
  let mut expected = None;
  loop {
    let page = parse_activity_page(&fetch(url).await?)?;
    expected = expected.or(page.total_count);
    let fetched = page.records.len();
    records.extend(page.records);
    match page.next {
      Some(next) if fetched > 0 => url = resolve_url(base_url, &next)?,
      _ => break,
    }
  }
  match expected {
    Some(total) if total != records.len() as u64 => {
      warn!(total, downloaded = records.len(), "el número de actividades no coincide con total_count")
    }
    _ => debug!(count = records.len(), "actividades descargadas"),
  }
  Ok(records)
}

pub fn parse_activity_page(body: &JsonValue) -> Result<ActivityPage> {
  let activities = body.get("activities")
                       .and_then(|a| a.as_array())
                       .ok_or_else(|| ProviderError::UnexpectedFormat("falta el arreglo 'activities'".to_string()))?;
  let meta = body.get("page_meta");
  Ok(ActivityPage { records: activities.iter().map(BioactivityRecord::from_json).collect(),
                    next: meta.and_then(|m| m.get("next"))
                              .and_then(|n| n.as_str())
                              .filter(|n| !n.is_empty())
                              .map(str::to_string),
                    total_count: meta.and_then(|m| m.get("total_count")).and_then(|t| t.as_u64()) })
}
