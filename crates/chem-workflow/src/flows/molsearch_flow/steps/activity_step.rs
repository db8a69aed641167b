// activity_step.rs
//! Sección de actividad: CID -> ChEMBL ID -> registros de actividad ->
//! resumen normalizado (un registro por organismo).

use crate::errors::WorkflowError;
use crate::section_kind::SectionKind;
use crate::step::{ResearchStep, StepOutput, StepResult};
use async_trait::async_trait;
use chem_domain::{normalize_activity_records, CompoundIdentity};
use chem_providers::ActivitySource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

pub const NO_CHEMBL_RECORD: &str = "No record in ChEMBL";
pub const NO_ACTIVITY_DATA: &str = "No significant bioactivity data found in ChEMBL for this compound.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityMetadata {
  pub step: String,
  pub cid: u64,
  pub chembl_id: Option<String>,
  pub raw_records: usize,
  pub normalized_records: usize,
}

pub struct ActivityStep {
  source: Arc<dyn ActivitySource>,
}

impl ActivityStep {
  pub fn new(source: Arc<dyn ActivitySource>) -> Self {
    Self { source }
  }

  /// Reconstruye el metadata tipado desde un `StepOutput`.
  pub fn recover_metadata(output: &StepOutput) -> Result<ActivityMetadata, WorkflowError> {
    Ok(serde_json::from_value(output.metadata.clone())?)
  }
}

#[async_trait]
impl ResearchStep for ActivityStep {
  fn name(&self) -> &str {
    "activity_analysis"
  }

  fn kind(&self) -> SectionKind {
    SectionKind::Activity
  }

  async fn execute(&self, compound: &CompoundIdentity) -> StepResult {
    let cid = compound.cid();
    let mut metadata = ActivityMetadata { step: self.name().to_string(),
                                          cid: cid.value(),
                                          chembl_id: None,
                                          raw_records: 0,
                                          normalized_records: 0 };

    let Some(chembl_id) = self.source.chembl_id_for_cid(cid).await? else {
      debug!(cid = %cid, "sin ChEMBL ID");
      return Ok(StepOutput::empty(NO_CHEMBL_RECORD, serde_json::to_value(&metadata)?));
    };
    metadata.chembl_id = Some(chembl_id.clone());

    let raw = self.source.activities(&chembl_id).await?;
    if raw.is_empty() {
      return Ok(StepOutput::empty(NO_ACTIVITY_DATA, serde_json::to_value(&metadata)?));
    }

    let normalized = normalize_activity_records(&raw);
    metadata.raw_records = raw.len();
    metadata.normalized_records = normalized.len();
    info!(chembl_id = %chembl_id, raw = raw.len(), kept = normalized.len(), "actividades normalizadas");

    Ok(StepOutput::data(serde_json::to_value(&normalized)?, serde_json::to_value(&metadata)?))
  }
}
