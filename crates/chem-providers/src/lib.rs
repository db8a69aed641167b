//! Crate `chem-providers`: clientes de bases de datos químicas externas
//!
//! Expone clientes HTTP asíncronos para PubChem, ChEMBL, MCULE y la API
//! CompTox de la EPA, los traits de fuente (`ActivitySource`,
//! `ToxicitySource`, `AvailabilitySource`) que consume el pipeline de
//! investigación y fuentes en memoria para pruebas.
//!
//! Todas las operaciones devuelven `Result<_, ProviderError>`; ningún fallo
//! se convierte en texto.
//!
//! Ejemplo rápido:
//! ```rust,no_run
//! use chem_providers::{ChemblActivitySource, ProviderConfig};
//! let config = ProviderConfig::from_env().expect("config");
//! let source = ChemblActivitySource::new(&config).expect("client");
//! ```
pub mod chembl;
pub mod config;
pub mod ctx;
pub mod errors;
mod http;
pub mod mcule;
pub mod pubchem;
pub mod sources;
pub mod stubs;

pub use chembl::ChemblClient;
pub use config::ProviderConfig;
pub use ctx::CtxClient;
pub use errors::{ProviderError, Result};
pub use mcule::MculeClient;
pub use pubchem::PubChemClient;
pub use sources::{ActivitySource, AvailabilitySource, ChemblActivitySource, ToxicitySource};
pub use stubs::{CallLog, InMemoryActivitySource, InMemoryAvailabilitySource, InMemoryToxicitySource};
