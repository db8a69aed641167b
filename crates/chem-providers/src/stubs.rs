// Archivo: stubs.rs
// Propósito: fuentes en memoria para pruebas y desarrollo sin red.
use crate::errors::{ProviderError, Result};
use crate::sources::{ActivitySource, AvailabilitySource, ToxicitySource};
use async_trait::async_trait;
use chem_domain::{AvailabilityReport, BioactivityRecord, CasNumber, HazardRecord, PubChemCid};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Registro compartido de llamadas, útil para comprobar qué consultó cada
/// paso.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
  fn push(&self, call: String) {
    if let Ok(mut calls) = self.0.lock() {
      calls.push(call);
    }
  }

  pub fn calls(&self) -> Vec<String> {
    self.0.lock().map(|c| c.clone()).unwrap_or_default()
  }
}

fn stub_failure(message: &str) -> ProviderError {
  ProviderError::UnexpectedFormat(message.to_string())
}

/// Fuente de actividad en memoria: CID -> ChEMBL ID -> registros.
#[derive(Default)]
pub struct InMemoryActivitySource {
  chembl_ids: HashMap<u64, String>,
  activities: HashMap<String, Vec<BioactivityRecord>>,
  failure: Option<String>,
  log: CallLog,
}

impl InMemoryActivitySource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_compound(mut self, cid: u64, chembl_id: &str, records: Vec<BioactivityRecord>) -> Self {
    self.chembl_ids.insert(cid, chembl_id.to_string());
    self.activities.insert(chembl_id.to_string(), records);
    self
  }

  /// Todas las llamadas fallan con el mensaje dado.
  pub fn failing(message: &str) -> Self {
    Self { failure: Some(message.to_string()), ..Self::default() }
  }

  pub fn call_log(&self) -> CallLog {
    self.log.clone()
  }
}

#[async_trait]
impl ActivitySource for InMemoryActivitySource {
  async fn chembl_id_for_cid(&self, cid: PubChemCid) -> Result<Option<String>> {
    self.log.push(format!("chembl_id_for_cid:{}", cid));
    if let Some(msg) = &self.failure {
      return Err(stub_failure(msg));
    }
    Ok(self.chembl_ids.get(&cid.value()).cloned())
  }

  async fn activities(&self, chembl_id: &str) -> Result<Vec<BioactivityRecord>> {
    self.log.push(format!("activities:{}", chembl_id));
    if let Some(msg) = &self.failure {
      return Err(stub_failure(msg));
    }
    Ok(self.activities.get(chembl_id).cloned().unwrap_or_default())
  }
}

/// Fuente de toxicidad en memoria: CAS -> DTXSID -> registros.
#[derive(Default)]
pub struct InMemoryToxicitySource {
  dtxsids: HashMap<String, String>,
  hazards: HashMap<String, Vec<HazardRecord>>,
  failure: Option<String>,
  log: CallLog,
}

impl InMemoryToxicitySource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_compound(mut self, cas: &str, dtxsid: &str, records: Vec<HazardRecord>) -> Self {
    self.dtxsids.insert(cas.to_string(), dtxsid.to_string());
    self.hazards.insert(dtxsid.to_string(), records);
    self
  }

  pub fn failing(message: &str) -> Self {
    Self { failure: Some(message.to_string()), ..Self::default() }
  }

  pub fn call_log(&self) -> CallLog {
    self.log.clone()
  }
}

#[async_trait]
impl ToxicitySource for InMemoryToxicitySource {
  async fn dtxsid_for(&self, cas: &CasNumber) -> Result<Option<String>> {
    self.log.push(format!("dtxsid_for:{}", cas));
    if let Some(msg) = &self.failure {
      return Err(stub_failure(msg));
    }
    Ok(self.dtxsids.get(cas.as_str()).cloned())
  }

  async fn hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>> {
    self.log.push(format!("hazards:{}", dtxsid));
    if let Some(msg) = &self.failure {
      return Err(stub_failure(msg));
    }
    Ok(self.hazards.get(dtxsid).cloned().unwrap_or_default())
  }
}

/// Fuente de disponibilidad en memoria: SMILES -> informe.
#[derive(Default)]
pub struct InMemoryAvailabilitySource {
  reports: HashMap<String, AvailabilityReport>,
  failure: Option<String>,
  log: CallLog,
}

impl InMemoryAvailabilitySource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_report(mut self, smiles: &str, report: AvailabilityReport) -> Self {
    self.reports.insert(smiles.to_string(), report);
    self
  }

  pub fn failing(message: &str) -> Self {
    Self { failure: Some(message.to_string()), ..Self::default() }
  }

  pub fn call_log(&self) -> CallLog {
    self.log.clone()
  }
}

#[async_trait]
impl AvailabilitySource for InMemoryAvailabilitySource {
  async fn availability(&self, smiles: &str) -> Result<Option<AvailabilityReport>> {
    self.log.push(format!("availability:{}", smiles));
    if let Some(msg) = &self.failure {
      return Err(stub_failure(msg));
    }
    Ok(self.reports.get(smiles).cloned())
  }
}
