// Archivo: http.rs
// Propósito: helpers compartidos por los clientes HTTP.
use crate::errors::{ProviderError, Result};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("molsearch/", env!("CARGO_PKG_VERSION"));

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
  Ok(Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?)
}

/// Une `base` y `path` sin duplicar ni perder la barra intermedia.
pub(crate) fn join_url(base: &str, path: &str) -> String {
  format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Resuelve una referencia (absoluta o relativa al host) contra `base`.
pub(crate) fn resolve_url(base: &str, reference: &str) -> Result<String> {
  let base = Url::parse(base).map_err(|e| ProviderError::Config(format!("URL base inválida '{}': {}", base, e)))?;
  let resolved = base.join(reference)
                     .map_err(|e| ProviderError::UnexpectedFormat(format!("URL de paginación inválida '{}': {}",
                                                                          reference, e)))?;
  Ok(resolved.to_string())
}

/// Envía la petición y decodifica el cuerpo JSON. Un 404 se traduce en
/// `Ok(None)`; cualquier otro estado no exitoso es `ProviderError::Status`.
pub(crate) async fn fetch_json(service: &'static str, request: RequestBuilder) -> Result<Option<JsonValue>> {
  let response = request.send().await?;
  if !has_body(service, response.status())? {
    debug!(service, "recurso no encontrado");
    return Ok(None);
  }
  let body: JsonValue = response.json().await?;
  Ok(Some(body))
}

/// `Ok(true)` si la respuesta trae cuerpo útil, `Ok(false)` para 404.
pub(crate) fn has_body(service: &'static str, status: StatusCode) -> Result<bool> {
  if status == StatusCode::NOT_FOUND {
    return Ok(false);
  }
  if !status.is_success() {
    return Err(ProviderError::Status { service, status: status.as_u16() });
  }
  Ok(true)
}
