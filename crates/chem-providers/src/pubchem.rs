// Archivo: pubchem.rs
// Propósito: traducir un PubChem CID al identificador ChEMBL usando la vista
// PUG-View de PubChem.
use crate::config::ProviderConfig;
use crate::errors::Result;
use crate::http::{build_client, fetch_json, join_url};
use chem_domain::PubChemCid;
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

pub struct PubChemClient {
  client: Client,
  base_url: String,
}

impl PubChemClient {
  pub fn new(config: &ProviderConfig) -> Result<Self> {
    Ok(Self { client: build_client(config.request_timeout)?, base_url: config.pubchem_base_url.clone() })
  }

  pub fn chembl_id_url(&self, cid: PubChemCid) -> String {
    join_url(&self.base_url, &format!("data/compound/{}/JSON?heading=ChEMBL%20ID", cid))
  }

  /// Devuelve el ChEMBL ID asociado al CID o `None` si PubChem no tiene la
  /// referencia.
  #[instrument(skip(self, cid), fields(cid = %cid))]
  pub async fn chembl_id_for_cid(&self, cid: PubChemCid) -> Result<Option<String>> {
    let url = self.chembl_id_url(cid);
    debug!(url = %url, "consultando ChEMBL ID en PubChem");
    let body = fetch_json("PubChem", self.client.get(&url).header("Accept", "application/json")).await?;
    Ok(body.as_ref().and_then(parse_chembl_id))
  }
}

/// Extrae el ChEMBL ID de `Record.Reference[0].SourceID`, cuyo formato es
/// `<fuente>::<CHEMBL...>`.
pub fn parse_chembl_id(body: &JsonValue) -> Option<String> {
  body.get("Record")?
      .get("Reference")?
      .as_array()?
      .first()?
      .get("SourceID")?
      .as_str()?
      .split("::")
      .nth(1)
      .filter(|id| !id.is_empty())
      .map(str::to_string)
}
