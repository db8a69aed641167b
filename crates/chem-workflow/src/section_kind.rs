use crate::errors::WorkflowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Secciones que componen el informe de un compuesto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Activity,
    Toxicity,
    Availability,
}

pub const ALL_SECTIONS: [SectionKind; 3] = [SectionKind::Activity, SectionKind::Toxicity, SectionKind::Availability];

impl SectionKind {
    /// Clave con la que la sección aparece en el informe.
    pub const fn output_key(self) -> &'static str {
        match self {
            SectionKind::Activity => "activity_result",
            SectionKind::Toxicity => "toxicity_result",
            SectionKind::Availability => "availability_result",
        }
    }

    /// Interpreta una lista separada por comas ("activity,toxicity").
    /// Los duplicados se ignoran conservando el primer orden.
    pub fn parse_list(raw: &str) -> Result<Vec<SectionKind>, WorkflowError> {
        let mut out = Vec::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let kind: SectionKind = part.parse()?;
            if !out.contains(&kind) {
                out.push(kind);
            }
        }
        if out.is_empty() {
            return Err(WorkflowError::Validation("La lista de secciones está vacía".to_string()));
        }
        Ok(out)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionKind::Activity => "activity",
            SectionKind::Toxicity => "toxicity",
            SectionKind::Availability => "availability",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SectionKind {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "activity" => Ok(SectionKind::Activity),
            "toxicity" => Ok(SectionKind::Toxicity),
            "availability" => Ok(SectionKind::Availability),
            other => Err(WorkflowError::Validation(format!("Sección desconocida: '{}'", other))),
        }
    }
}
