// availability_step.rs
//! Sección de disponibilidad: SMILES -> MCULE ID -> precios y
//! disponibilidad.

use crate::errors::WorkflowError;
use crate::section_kind::SectionKind;
use crate::step::{ResearchStep, StepOutput, StepResult};
use async_trait::async_trait;
use chem_domain::CompoundIdentity;
use chem_providers::AvailabilitySource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityMetadata {
  pub step: String,
  pub smiles: String,
  pub mcule_id: Option<String>,
}

pub struct AvailabilityStep {
  source: Arc<dyn AvailabilitySource>,
}

impl AvailabilityStep {
  pub fn new(source: Arc<dyn AvailabilitySource>) -> Self {
    Self { source }
  }

  pub fn recover_metadata(output: &StepOutput) -> Result<AvailabilityMetadata, WorkflowError> {
    Ok(serde_json::from_value(output.metadata.clone())?)
  }
}

#[async_trait]
impl ResearchStep for AvailabilityStep {
  fn name(&self) -> &str {
    "availability_analysis"
  }

  fn kind(&self) -> SectionKind {
    SectionKind::Availability
  }

  /// Un SMILES nunca contiene espacios; si los tiene la búsqueda en MCULE
  /// no tiene sentido.
  fn validate(&self, compound: &CompoundIdentity) -> Result<(), WorkflowError> {
    if compound.smiles().chars().any(char::is_whitespace) {
      return Err(WorkflowError::Validation(format!("SMILES con espacios: '{}'", compound.smiles())));
    }
    Ok(())
  }

  async fn execute(&self, compound: &CompoundIdentity) -> StepResult {
    let smiles = compound.smiles();
    let mut metadata = AvailabilityMetadata { step: self.name().to_string(), smiles: smiles.to_string(), mcule_id: None };

    match self.source.availability(smiles).await? {
      Some(report) => {
        metadata.mcule_id = report.mcule_id().map(str::to_string);
        Ok(StepOutput::data(report.into_json(), serde_json::to_value(&metadata)?))
      }
      None => Ok(StepOutput::empty(format!("Could not retrieve MCULE ID for SMILES: {}", smiles),
                                   serde_json::to_value(&metadata)?)),
    }
  }
}
