// availability.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Informe de precio y disponibilidad de un compuesto en MCULE.
///
/// Es un objeto JSON plano: `mcule_id` primero, luego las claves de la
/// consulta de precios y por último las de disponibilidad. Una clave repetida
/// se sobrescribe en su posición original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityReport(Map<String, JsonValue>);

impl AvailabilityReport {
  pub fn merge(mcule_id: &str, prices: JsonValue, availability: JsonValue) -> Result<Self, DomainError> {
    let mut out = Map::new();
    out.insert("mcule_id".to_string(), JsonValue::String(mcule_id.to_string()));
    for (label, part) in [("precios", prices), ("disponibilidad", availability)] {
      match part {
        JsonValue::Object(obj) => {
          for (k, v) in obj {
            out.insert(k, v);
          }
        }
        other => {
          return Err(DomainError::ValidationError(format!("La respuesta de {} para {} no es un objeto JSON: {}",
                                                          label, mcule_id, other)))
        }
      }
    }
    Ok(Self(out))
  }

  pub fn mcule_id(&self) -> Option<&str> {
    self.0.get("mcule_id").and_then(|v| v.as_str())
  }

  pub fn get(&self, key: &str) -> Option<&JsonValue> {
    self.0.get(key)
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn into_json(self) -> JsonValue {
    JsonValue::Object(self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn merge_keeps_insertion_order_and_overrides_in_place() {
    let report = AvailabilityReport::merge("MCULE-123",
                                           json!({"best_price": 12.5, "currency": "USD", "mcule_id": "ignored"}),
                                           json!({"in_stock": true, "currency": "EUR"})).unwrap();
    let keys: Vec<&str> = report.keys().collect();
    assert_eq!(keys, vec!["mcule_id", "best_price", "currency", "in_stock"]);
    assert_eq!(report.get("currency"), Some(&json!("EUR")));
    assert_eq!(report.mcule_id(), Some("ignored"));
  }

  #[test]
  fn non_object_payload_is_rejected() {
    let err = AvailabilityReport::merge("MCULE-1", json!([]), json!({})).unwrap_err();
    assert!(matches!(err, DomainError::ValidationError(_)));
  }
}
