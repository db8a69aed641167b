// Archivo: sources.rs
// Propósito: contratos asíncronos de las fuentes de datos externas y su
// implementación sobre los clientes HTTP. El pipeline de investigación sólo
// depende de estos traits, lo que permite sustituirlos por stubs en pruebas.
use crate::chembl::ChemblClient;
use crate::config::ProviderConfig;
use crate::ctx::CtxClient;
use crate::errors::Result;
use crate::mcule::MculeClient;
use crate::pubchem::PubChemClient;
use async_trait::async_trait;
use chem_domain::{AvailabilityReport, BioactivityRecord, CasNumber, HazardRecord, PubChemCid};

/// Fuente de registros de bioactividad.
#[async_trait]
pub trait ActivitySource: Send + Sync {
  /// Identificador ChEMBL del compuesto, si existe.
  async fn chembl_id_for_cid(&self, cid: PubChemCid) -> Result<Option<String>>;

  /// Registros de actividad crudos de una molécula ChEMBL.
  async fn activities(&self, chembl_id: &str) -> Result<Vec<BioactivityRecord>>;
}

/// Fuente de datos de toxicidad.
#[async_trait]
pub trait ToxicitySource: Send + Sync {
  async fn dtxsid_for(&self, cas: &CasNumber) -> Result<Option<String>>;

  async fn hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>>;
}

/// Fuente de precio y disponibilidad comercial.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
  /// `None` cuando el proveedor no conoce el SMILES.
  async fn availability(&self, smiles: &str) -> Result<Option<AvailabilityReport>>;
}

/// Actividad vía PubChem (CID -> ChEMBL ID) + ChEMBL (registros).
pub struct ChemblActivitySource {
  pubchem: PubChemClient,
  chembl: ChemblClient,
}

impl ChemblActivitySource {
  pub fn new(config: &ProviderConfig) -> Result<Self> {
    Ok(Self { pubchem: PubChemClient::new(config)?, chembl: ChemblClient::new(config)? })
  }
}

#[async_trait]
impl ActivitySource for ChemblActivitySource {
  async fn chembl_id_for_cid(&self, cid: PubChemCid) -> Result<Option<String>> {
    self.pubchem.chembl_id_for_cid(cid).await
  }

  async fn activities(&self, chembl_id: &str) -> Result<Vec<BioactivityRecord>> {
    self.chembl.activities(chembl_id).await
  }
}

#[async_trait]
impl ToxicitySource for CtxClient {
  async fn dtxsid_for(&self, cas: &CasNumber) -> Result<Option<String>> {
    CtxClient::dtxsid_for(self, cas).await
  }

  async fn hazards(&self, dtxsid: &str) -> Result<Vec<HazardRecord>> {
    CtxClient::hazards(self, dtxsid).await
  }
}

#[async_trait]
impl AvailabilitySource for MculeClient {
  async fn availability(&self, smiles: &str) -> Result<Option<AvailabilityReport>> {
    self.availability_report(smiles).await
  }
}
