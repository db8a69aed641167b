// toxicity_step.rs
//! Sección de toxicidad: CAS -> DTXSID -> registros de peligrosidad de la
//! EPA -> filas resumidas.

use crate::errors::WorkflowError;
use crate::section_kind::SectionKind;
use crate::step::{ResearchStep, StepOutput, StepResult};
use async_trait::async_trait;
use chem_domain::{summarize_hazards, CompoundIdentity};
use chem_providers::ToxicitySource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub const NO_DTXSID: &str = "Unable to retrieve DTXSID for the compound.";
pub const NO_HAZARD_DATA: &str = "EPA returned no hazard data for this compound.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToxicityMetadata {
  pub step: String,
  pub cas: String,
  pub dtxsid: Option<String>,
  pub records: usize,
}

pub struct ToxicityStep {
  source: Arc<dyn ToxicitySource>,
}

impl ToxicityStep {
  pub fn new(source: Arc<dyn ToxicitySource>) -> Self {
    Self { source }
  }

  pub fn recover_metadata(output: &StepOutput) -> Result<ToxicityMetadata, WorkflowError> {
    Ok(serde_json::from_value(output.metadata.clone())?)
  }
}

#[async_trait]
impl ResearchStep for ToxicityStep {
  fn name(&self) -> &str {
    "toxicity_analysis"
  }

  fn kind(&self) -> SectionKind {
    SectionKind::Toxicity
  }

  async fn execute(&self, compound: &CompoundIdentity) -> StepResult {
    let mut metadata =
      ToxicityMetadata { step: self.name().to_string(), cas: compound.cas().to_string(), dtxsid: None, records: 0 };

    let Some(dtxsid) = self.source.dtxsid_for(compound.cas()).await? else {
      return Ok(StepOutput::empty(NO_DTXSID, serde_json::to_value(&metadata)?));
    };
    metadata.dtxsid = Some(dtxsid.clone());

    let hazards = self.source.hazards(&dtxsid).await?;
    if hazards.is_empty() {
      return Ok(StepOutput::empty(NO_HAZARD_DATA, serde_json::to_value(&metadata)?));
    }
    metadata.records = hazards.len();
    info!(dtxsid = %dtxsid, records = hazards.len(), "registros de peligrosidad resumidos");

    let summaries = summarize_hazards(&hazards);
    Ok(StepOutput::data(serde_json::to_value(&summaries)?, serde_json::to_value(&metadata)?))
  }
}
