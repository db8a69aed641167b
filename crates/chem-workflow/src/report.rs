use crate::step::SectionOutcome;
use chem_domain::CompoundIdentity;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Informe de un compuesto: identidad más una entrada por sección
/// (`activity_result`, `toxicity_result`, `availability_result`) al mismo
/// nivel que los identificadores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundReport {
  pub name: String,
  pub cas: String,
  pub cid: String,
  pub smiles: String,
  #[serde(flatten)]
  pub sections: IndexMap<String, SectionOutcome>,
  /// Motivo por el que el compuesto no pudo investigarse.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  pub generated_at: DateTime<Utc>,
}

impl CompoundReport {
  pub fn for_compound(compound: &CompoundIdentity, sections: IndexMap<String, SectionOutcome>) -> Self {
    CompoundReport { name: compound.name().to_string(),
                     cas: compound.cas().to_string(),
                     cid: compound.cid().to_string(),
                     smiles: compound.smiles().to_string(),
                     sections,
                     error: None,
                     generated_at: Utc::now() }
  }

  /// Informe para una fila cuya identidad no pasó la validación; conserva
  /// los valores tal como venían.
  pub fn invalid(name: &str, cas: &str, cid: &str, smiles: &str, error: impl Into<String>) -> Self {
    CompoundReport { name: name.to_string(),
                     cas: cas.to_string(),
                     cid: cid.to_string(),
                     smiles: smiles.to_string(),
                     sections: IndexMap::new(),
                     error: Some(error.into()),
                     generated_at: Utc::now() }
  }

  pub fn section(&self, key: &str) -> Option<&SectionOutcome> {
    self.sections.get(key)
  }

  pub fn failed_sections(&self) -> usize {
    self.sections.values().filter(|s| s.is_error()).count()
  }
}
