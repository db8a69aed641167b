// toxicity.rs
//! Resumen de registros de peligrosidad (EPA CompTox).
use serde::{Deserialize, Serialize};

/// Registro de peligrosidad tal como lo devuelve el endpoint de hazard.
/// Sólo se modelan las columnas que alimentan el resumen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardRecord {
  #[serde(default)]
  pub toxval_type: Option<String>,
  #[serde(default)]
  pub toxval_numeric_qualifier: Option<String>,
  #[serde(default)]
  pub toxval_numeric: Option<f64>,
  #[serde(default)]
  pub toxval_units: Option<String>,
  #[serde(default)]
  pub species_common: Option<String>,
  #[serde(default)]
  pub exposure_route: Option<String>,
  #[serde(default)]
  pub risk_assessment_class: Option<String>,
}

/// Fila resumida para el informe de toxicidad. Las columnas ausentes se
/// serializan como `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToxicitySummary {
  #[serde(rename = "speciesCommon")]
  pub species_common: Option<String>,
  #[serde(rename = "exposureRoute")]
  pub exposure_route: Option<String>,
  #[serde(rename = "riskAssessmentClass")]
  pub risk_assessment_class: Option<String>,
  #[serde(rename = "ToxicityValue")]
  pub toxicity_value: String,
  #[serde(rename = "toxvalUnits")]
  pub toxval_units: Option<String>,
}

impl HazardRecord {
  /// `tipo + calificador + valor + " " + unidades`. Los textos ausentes se
  /// sustituyen por "" y un valor numérico ausente por `nan`.
  pub fn toxicity_value(&self) -> String {
    let numeric = match self.toxval_numeric {
      Some(v) => serde_json::Number::from_f64(v).map(|n| n.to_string()).unwrap_or_else(|| "nan".to_string()),
      None => "nan".to_string(),
    };
    format!("{}{}{} {}",
            self.toxval_type.as_deref().unwrap_or(""),
            self.toxval_numeric_qualifier.as_deref().unwrap_or(""),
            numeric,
            self.toxval_units.as_deref().unwrap_or(""))
  }

  pub fn summarize(&self) -> ToxicitySummary {
    ToxicitySummary { species_common: self.species_common.clone(),
                      exposure_route: self.exposure_route.clone(),
                      risk_assessment_class: self.risk_assessment_class.clone(),
                      toxicity_value: self.toxicity_value(),
                      toxval_units: self.toxval_units.clone() }
  }
}

/// Un resumen por registro, en el mismo orden de entrada.
pub fn summarize_hazards(records: &[HazardRecord]) -> Vec<ToxicitySummary> {
  records.iter().map(HazardRecord::summarize).collect()
}
