use crate::errors::WorkflowError;
use crate::section_kind::{SectionKind, ALL_SECTIONS};
use serde::{Deserialize, Serialize};

/// Configuracion del pipeline de investigación.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
  /// Secciones a ejecutar, en el orden en que aparecen en el informe.
  pub sections: Vec<SectionKind>,
  /// Reescribir el archivo de salida del lote después de cada compuesto.
  pub checkpoint: bool,
}

impl Default for WorkflowConfig {
  fn default() -> Self {
    WorkflowConfig { sections: ALL_SECTIONS.to_vec(), checkpoint: true }
  }
}

impl WorkflowConfig {
  pub fn with_sections(mut self, sections: Vec<SectionKind>) -> Self {
    self.sections = sections;
    self
  }

  pub fn validate(&self) -> Result<(), WorkflowError> {
    if self.sections.is_empty() {
      return Err(WorkflowError::Validation("Debe configurarse al menos una sección".to_string()));
    }
    Ok(())
  }
}
