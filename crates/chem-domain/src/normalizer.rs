// normalizer.rs
//! Normalizador de registros de bioactividad.
//!
//! Pipeline puro en tres etapas:
//! 1. `project`: proyecta cada registro crudo a un `NormalizedRecord`.
//! 2. `drop_empty`: descarta los resúmenes sin claves.
//! 3. `deduplicate_by_organism`: conserva el primer registro por organismo.
//!
//! No hay estado compartido ni condiciones de error; una salida vacía
//! significa "sin datos utilizables".
use crate::bioactivity::{present, render, BioactivityRecord, NormalizedRecord};
use indexmap::IndexMap;

/// Clave de deduplicación. Todos los registros sin organismo comparten la
/// clave `Missing`. Los valores se comparan por su texto JSON para que una
/// cadena "1" y un número 1 no colisionen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum OrganismKey {
  Missing,
  Named(String),
}

impl OrganismKey {
  fn of(record: &NormalizedRecord) -> Self {
    match &record.target_organism {
      Some(v) => Self::Named(v.to_string()),
      None => Self::Missing,
    }
  }
}

/// Proyecta un registro crudo. `activity_data` sólo se sintetiza cuando los
/// cuatro campos estándar están presentes; combinaciones parciales se
/// descartan.
pub fn project(record: &BioactivityRecord) -> NormalizedRecord {
  let activity_data = match (present(&record.standard_type),
                             present(&record.relation),
                             present(&record.standard_value),
                             present(&record.standard_units))
  {
    (Some(t), Some(r), Some(v), Some(u)) => {
      Some(format!("{} {} {} {}", render(t), render(r), render(v), render(u)))
    }
    _ => None,
  };

  NormalizedRecord { activity_data,
                     assay_description: present(&record.assay_description).cloned(),
                     target_pref_name: present(&record.target_pref_name).cloned(),
                     target_organism: present(&record.target_organism).cloned(),
                     activity_comment: present(&record.activity_comment).cloned() }
}

/// Elimina los registros vacíos preservando el orden.
pub fn drop_empty(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
  records.into_iter().filter(|r| !r.is_empty()).collect()
}

/// Colapsa la secuencia a un registro por `target_organism`, quedándose con
/// la primera aparición. Los registros posteriores del mismo organismo se
/// descartan completos, aunque difieran en otros campos.
pub fn deduplicate_by_organism(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
  let mut by_organism: IndexMap<OrganismKey, NormalizedRecord> = IndexMap::with_capacity(records.len());
  for record in records {
    by_organism.entry(OrganismKey::of(&record)).or_insert(record);
  }
  by_organism.into_values().collect()
}

/// Ejecuta el pipeline completo sobre los registros de un compuesto.
pub fn normalize_activity_records(records: &[BioactivityRecord]) -> Vec<NormalizedRecord> {
  let projected: Vec<NormalizedRecord> = records.iter().map(project).collect();
  deduplicate_by_organism(drop_empty(projected))
}
