// Archivo: config.rs
// Propósito: configuración de los clientes externos leída del entorno
// (y de `.env` si existe).
use crate::errors::{ProviderError, Result};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_PUBCHEM_BASE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug_view";
pub const DEFAULT_CHEMBL_BASE_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";
pub const DEFAULT_MCULE_BASE_URL: &str = "https://mcule.com/api/v1";
pub const DEFAULT_CTX_BASE_URL: &str = "https://api-ccte.epa.gov";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_TOXICITY_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CHEMBL_PAGE_LIMIT: u32 = 1000;

/// Configuración compartida por los clientes HTTP.
#[derive(Clone)]
pub struct ProviderConfig {
  pub pubchem_base_url: String,
  pub chembl_base_url: String,
  pub mcule_base_url: String,
  pub ctx_base_url: String,
  /// Token de la API de MCULE (`MCULE_API_TOKEN`).
  pub mcule_api_token: Option<String>,
  /// Clave de la API CompTox de la EPA (`CTX_API_KEY`).
  pub ctx_api_key: Option<String>,
  pub request_timeout: Duration,
  pub toxicity_timeout: Duration,
  pub chembl_page_limit: u32,
}

impl Default for ProviderConfig {
  fn default() -> Self {
    ProviderConfig { pubchem_base_url: DEFAULT_PUBCHEM_BASE_URL.to_string(),
                     chembl_base_url: DEFAULT_CHEMBL_BASE_URL.to_string(),
                     mcule_base_url: DEFAULT_MCULE_BASE_URL.to_string(),
                     ctx_base_url: DEFAULT_CTX_BASE_URL.to_string(),
                     mcule_api_token: None,
                     ctx_api_key: None,
                     request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                     toxicity_timeout: Duration::from_secs(DEFAULT_TOXICITY_TIMEOUT_SECS),
                     chembl_page_limit: DEFAULT_CHEMBL_PAGE_LIMIT }
  }
}

impl fmt::Debug for ProviderConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ProviderConfig")
     .field("pubchem_base_url", &self.pubchem_base_url)
     .field("chembl_base_url", &self.chembl_base_url)
     .field("mcule_base_url", &self.mcule_base_url)
     .field("ctx_base_url", &self.ctx_base_url)
     .field("mcule_api_token", &self.mcule_api_token.as_ref().map(|_| "***"))
     .field("ctx_api_key", &self.ctx_api_key.as_ref().map(|_| "***"))
     .field("request_timeout", &self.request_timeout)
     .field("toxicity_timeout", &self.toxicity_timeout)
     .field("chembl_page_limit", &self.chembl_page_limit)
     .finish()
  }
}

impl ProviderConfig {
  /// Carga `.env` (si existe) y lee la configuración de las variables de
  /// entorno.
  pub fn from_env() -> Result<Self> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Construye la configuración a partir de una función de búsqueda de
  /// variables. Las variables vacías cuentan como ausentes.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where F: Fn(&str) -> Option<String>
  {
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let defaults = Self::default();

    Ok(ProviderConfig { pubchem_base_url: get("PUBCHEM_BASE_URL").unwrap_or(defaults.pubchem_base_url),
                        chembl_base_url: get("CHEMBL_BASE_URL").unwrap_or(defaults.chembl_base_url),
                        mcule_base_url: get("MCULE_BASE_URL").unwrap_or(defaults.mcule_base_url),
                        ctx_base_url: get("CTX_BASE_URL").unwrap_or(defaults.ctx_base_url),
                        mcule_api_token: get("MCULE_API_TOKEN"),
                        ctx_api_key: get("CTX_API_KEY"),
                        request_timeout: parse_secs("MOLSEARCH_TIMEOUT_SECS", get("MOLSEARCH_TIMEOUT_SECS"))?
                                         .unwrap_or(defaults.request_timeout),
                        toxicity_timeout: parse_secs("MOLSEARCH_TOXICITY_TIMEOUT_SECS",
                                                     get("MOLSEARCH_TOXICITY_TIMEOUT_SECS"))?
                                          .unwrap_or(defaults.toxicity_timeout),
                        chembl_page_limit: match get("CHEMBL_PAGE_LIMIT") {
                          Some(v) => v.parse::<u32>()
                                      .ok()
                                      .filter(|n| *n > 0)
                                      .ok_or_else(|| ProviderError::Config(format!("CHEMBL_PAGE_LIMIT inválido: '{}'", v)))?,
                          None => defaults.chembl_page_limit,
                        } })
  }
}

fn parse_secs(key: &str, raw: Option<String>) -> Result<Option<Duration>> {
  match raw {
    None => Ok(None),
    Some(v) => v.parse::<u64>()
                .map(|s| Some(Duration::from_secs(s)))
                .map_err(|_| ProviderError::Config(format!("{} debe ser un número de segundos: '{}'", key, v))),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |k: &str| map.get(k).cloned()
  }

  #[test]
  fn defaults_when_nothing_is_set() {
    let cfg = ProviderConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.chembl_base_url, DEFAULT_CHEMBL_BASE_URL);
    assert_eq!(cfg.request_timeout, Duration::from_secs(20));
    assert_eq!(cfg.toxicity_timeout, Duration::from_secs(10));
    assert!(cfg.mcule_api_token.is_none());
  }

  #[test]
  fn reads_overrides_and_ignores_blank_values() {
    let cfg = ProviderConfig::from_lookup(lookup(&[("MCULE_API_TOKEN", "abc"),
                                                   ("CTX_API_KEY", "  "),
                                                   ("MOLSEARCH_TIMEOUT_SECS", "5"),
                                                   ("CHEMBL_PAGE_LIMIT", "50"),
                                                   ("CHEMBL_BASE_URL", "http://localhost:9000")])).unwrap();
    assert_eq!(cfg.mcule_api_token.as_deref(), Some("abc"));
    assert!(cfg.ctx_api_key.is_none());
    assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    assert_eq!(cfg.chembl_page_limit, 50);
    assert_eq!(cfg.chembl_base_url, "http://localhost:9000");
  }

  #[test]
  fn invalid_numbers_are_config_errors() {
    let err = ProviderConfig::from_lookup(lookup(&[("MOLSEARCH_TIMEOUT_SECS", "soon")])).unwrap_err();
    assert!(matches!(err, ProviderError::Config(_)));
    let err = ProviderConfig::from_lookup(lookup(&[("CHEMBL_PAGE_LIMIT", "0")])).unwrap_err();
    assert!(matches!(err, ProviderError::Config(_)));
  }

  #[test]
  fn debug_redacts_secrets() {
    let cfg = ProviderConfig { mcule_api_token: Some("secret-token".into()), ..Default::default() };
    let printed = format!("{:?}", cfg);
    assert!(!printed.contains("secret-token"));
    assert!(printed.contains("***"));
  }
}
