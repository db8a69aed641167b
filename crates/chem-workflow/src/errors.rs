use thiserror::Error;

// Errores comunes del pipeline de investigación.
//
// Este enum centraliza los errores que pueden ocurrir al investigar un
// compuesto o al procesar un lote: errores de las fuentes externas
// (`ProviderError`), del dominio (`DomainError`), de E/S y de formato.
#[derive(Error, Debug)]
pub enum WorkflowError {
  /// Errores originados por los clientes de servicios externos.
  #[error("Error de proveedor: {0}")]
  Provider(#[from] chem_providers::ProviderError),

  /// Errores originados por validaciones del dominio químico.
  #[error("Error de dominio: {0}")]
  Domain(#[from] chem_domain::DomainError),

  /// Errores de serializacion/deserializacion JSON.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Errores al leer el CSV de entrada del lote.
  #[error("Error de CSV: {0}")]
  Csv(#[from] csv::Error),

  /// Errores de entrada/salida (lectura del lote, escritura de resultados).
  #[error("Error de E/S: {0}")]
  Io(#[from] std::io::Error),

  /// Errores de validacion local del workflow (por ejemplo secciones
  /// desconocidas o configuraciones vacías).
  #[error("Error de validacion: {0}")]
  Validation(String),
}
