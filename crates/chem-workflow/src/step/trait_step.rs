use crate::errors::WorkflowError;
use crate::section_kind::SectionKind;
use async_trait::async_trait;
use chem_domain::CompoundIdentity;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Resultado de ejecutar un paso. `payload` es lo que termina en el informe;
/// `metadata` describe de dónde salió (identificadores, conteos).
/// Cuando `empty_reason` tiene valor la fuente respondió sin datos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutput {
    pub payload: JsonValue,
    pub metadata: JsonValue,
    pub empty_reason: Option<String>,
}

impl StepOutput {
    pub fn data(payload: JsonValue, metadata: JsonValue) -> Self {
        Self { payload, metadata, empty_reason: None }
    }

    pub fn empty(reason: impl Into<String>, metadata: JsonValue) -> Self {
        Self { payload: JsonValue::Null, metadata, empty_reason: Some(reason.into()) }
    }

    pub fn into_outcome(self) -> SectionOutcome {
        match self.empty_reason {
            Some(reason) => SectionOutcome::Empty { reason, metadata: self.metadata },
            None => SectionOutcome::Ok { data: self.payload, metadata: self.metadata },
        }
    }
}

pub type StepResult = Result<StepOutput, WorkflowError>;

/// Estado final de una sección del informe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    Ok { data: JsonValue, metadata: JsonValue },
    Empty { reason: String, metadata: JsonValue },
    Error { message: String },
}

impl SectionOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, SectionOutcome::Error { .. })
    }

    pub fn data(&self) -> Option<&JsonValue> {
        match self {
            SectionOutcome::Ok { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Trait que representa un paso de investigación sobre un compuesto.
#[async_trait]
pub trait ResearchStep: Send + Sync {
    /// Nombre o identificador del paso
    fn name(&self) -> &str;

    /// Sección del informe que produce este paso.
    fn kind(&self) -> SectionKind;

    /// Validacion previa a la ejecucion. Debe retornar
    /// `WorkflowError::Validation` si el compuesto no sirve para este paso.
    fn validate(&self, _compound: &CompoundIdentity) -> Result<(), WorkflowError> {
        Ok(())
    }

    /// Ejecuta la consulta y devuelve el resultado
    async fn execute(&self, compound: &CompoundIdentity) -> StepResult;
}
