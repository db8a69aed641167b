// Archivo: errors.rs
// Propósito: errores de los clientes de servicios externos. Cada fallo de
// red, de estado HTTP o de formato se devuelve explícitamente en lugar de
// degradarse a un texto descriptivo.
use chem_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
  /// Error de transporte (conexión, timeout, TLS, cuerpo ilegible).
  #[error("Error HTTP: {0}")]
  Http(#[from] reqwest::Error),
  /// El servicio respondió con un estado no exitoso.
  #[error("{service} respondió con estado {status}")]
  Status { service: &'static str, status: u16 },
  /// El recurso solicitado no existe en el servicio.
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// La respuesta no tiene la forma esperada.
  #[error("Formato inesperado: {0}")]
  UnexpectedFormat(String),
  /// Falta la credencial indicada (variable de entorno).
  #[error("Falta la credencial {0}")]
  MissingCredential(&'static str),
  /// Configuración inválida.
  #[error("Configuración inválida: {0}")]
  Config(String),
  #[error("Error de dominio: {0}")]
  Domain(#[from] DomainError),
  #[error("Error de serialización: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// Alias de resultado usado por los clientes.
pub type Result<T> = std::result::Result<T, ProviderError>;
