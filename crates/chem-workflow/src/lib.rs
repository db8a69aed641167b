//! chem-workflow: pipeline de investigación de compuestos
//!
//! Orquesta las secciones del informe (actividad, toxicidad, disponibilidad)
//! sobre las fuentes de `chem_providers`, las ejecuta en paralelo por
//! compuesto con `ResearchEngine` y procesa lotes CSV con `BatchRunner`.

pub mod batch;
pub mod config;
pub mod engine;
pub mod errors;
pub mod factory;
pub mod flows;
pub mod report;
pub mod section_kind;
pub mod step;

pub use batch::{BatchRunner, BatchSummary, CompoundRow};
pub use config::WorkflowConfig;
pub use engine::ResearchEngine;
pub use errors::WorkflowError;
pub use factory::{ResearchEngineFactory, Sources};
pub use report::CompoundReport;
pub use section_kind::{SectionKind, ALL_SECTIONS};
pub use step::{ResearchStep, SectionOutcome, StepOutput, StepResult};
