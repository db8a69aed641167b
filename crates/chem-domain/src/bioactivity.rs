// bioactivity.rs
//! Tipos de entrada y salida del normalizador de bioactividad.
//!
//! Los registros crudos llegan como objetos JSON heterogéneos (ChEMBL) en los
//! que cualquier campo puede faltar, ser `null`, una cadena vacía o una lista
//! vacía. `BioactivityRecord` fija el conjunto de campos conocidos y
//! `present` es el único punto donde se decide si un valor aporta
//! información.
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Devuelve el valor sólo si está presente: no ausente, no `null`, no cadena
/// vacía y no lista vacía.
pub fn present(value: &Option<JsonValue>) -> Option<&JsonValue> {
  match value.as_ref()? {
    JsonValue::Null => None,
    JsonValue::String(s) if s.is_empty() => None,
    JsonValue::Array(a) if a.is_empty() => None,
    v => Some(v),
  }
}

/// Representación textual de un valor para construir `activity_data`.
/// Las cadenas se usan sin comillas; el resto usa su texto JSON.
pub(crate) fn render(value: &JsonValue) -> String {
  match value {
    JsonValue::String(s) => s.clone(),
    other => other.to_string(),
  }
}

/// Registro de actividad tal como lo entrega la base de datos de
/// bioactividad. Las claves desconocidas se ignoran al deserializar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BioactivityRecord {
  /// Tipo de actividad, p.ej. "IC50", "Ki".
  #[serde(default)]
  pub standard_type: Option<JsonValue>,
  /// Operador de relación, p.ej. "=", ">".
  #[serde(default)]
  pub relation: Option<JsonValue>,
  /// Valor estandarizado (numérico o texto).
  #[serde(default)]
  pub standard_value: Option<JsonValue>,
  /// Unidades, p.ej. "nM".
  #[serde(default)]
  pub standard_units: Option<JsonValue>,
  #[serde(default)]
  pub assay_description: Option<JsonValue>,
  #[serde(default)]
  pub target_pref_name: Option<JsonValue>,
  /// Organismo del blanco; clave de deduplicación.
  #[serde(default)]
  pub target_organism: Option<JsonValue>,
  #[serde(default)]
  pub activity_comment: Option<JsonValue>,
}

impl BioactivityRecord {
  /// Construye un registro desde un objeto JSON arbitrario. Un valor que no
  /// sea objeto produce un registro vacío.
  pub fn from_json(value: &JsonValue) -> Self {
    serde_json::from_value(value.clone()).unwrap_or_default()
  }
}

/// Resumen mínimo de un registro de actividad. Sólo se serializan las claves
/// presentes, en el orden en que se declaran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub activity_data: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub assay_description: Option<JsonValue>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_pref_name: Option<JsonValue>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub target_organism: Option<JsonValue>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub activity_comment: Option<JsonValue>,
}

impl NormalizedRecord {
  pub fn is_empty(&self) -> bool {
    self.activity_data.is_none()
    && self.assay_description.is_none()
    && self.target_pref_name.is_none()
    && self.target_organism.is_none()
    && self.activity_comment.is_none()
  }

  /// Número de claves presentes.
  pub fn len(&self) -> usize {
    [self.activity_data.is_some(),
     self.assay_description.is_some(),
     self.target_pref_name.is_some(),
     self.target_organism.is_some(),
     self.activity_comment.is_some()].iter()
                                     .filter(|&&p| p)
                                     .count()
  }
}
