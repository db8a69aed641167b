//! chem-domain: tipos y reglas puras del dominio químico.
//!
//! Contiene el normalizador de registros de bioactividad (proyección,
//! filtrado de vacíos y deduplicación por organismo), el resumen de
//! registros de peligrosidad, el informe de disponibilidad y la identidad
//! validada de un compuesto. Nada en este crate hace I/O.
mod availability;
mod bioactivity;
mod compound;
mod errors;
mod normalizer;
mod toxicity;

pub use availability::AvailabilityReport;
pub use bioactivity::{present, BioactivityRecord, NormalizedRecord};
pub use compound::{CasNumber, CompoundIdentity, PubChemCid};
pub use errors::DomainError;
pub use normalizer::{deduplicate_by_organism, drop_empty, normalize_activity_records, project};
pub use toxicity::{summarize_hazards, HazardRecord, ToxicitySummary};
