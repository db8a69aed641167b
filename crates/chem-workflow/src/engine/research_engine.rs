use crate::report::CompoundReport;
use crate::section_kind::SectionKind;
use crate::step::{ResearchStep, SectionOutcome};
use chem_domain::CompoundIdentity;
use futures::future::join_all;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Motor que investiga un compuesto ejecutando sus pasos en paralelo.
///
/// Cada paso produce una sección del informe. Un paso que falla queda
/// registrado como `SectionOutcome::Error` y no interrumpe a los demás. Las
/// secciones aparecen en el informe en el orden en que se registraron los
/// pasos, no en el orden en que terminan.
#[derive(Clone)]
pub struct ResearchEngine {
    steps: Vec<Arc<dyn ResearchStep>>,
}

impl ResearchEngine {
    pub fn new(steps: Vec<Arc<dyn ResearchStep>>) -> Self {
        Self { steps }
    }

    pub fn sections(&self) -> Vec<SectionKind> {
        self.steps.iter().map(|s| s.kind()).collect()
    }

    #[instrument(skip(self, compound), fields(compound = %compound.name(), cid = %compound.cid()))]
    pub async fn investigate(&self, compound: &CompoundIdentity) -> CompoundReport {
        let outcomes = join_all(self.steps.iter().map(|step| run_step(step.as_ref(), compound))).await;

        let mut sections = IndexMap::with_capacity(self.steps.len());
        for (step, outcome) in self.steps.iter().zip(outcomes) {
            sections.insert(step.kind().output_key().to_string(), outcome);
        }
        let report = CompoundReport::for_compound(compound, sections);
        info!(failed_sections = report.failed_sections(), "compuesto investigado");
        report
    }
}

async fn run_step(step: &dyn ResearchStep, compound: &CompoundIdentity) -> SectionOutcome {
    if let Err(e) = step.validate(compound) {
        warn!(step = step.name(), error = %e, "validación del paso fallida");
        return SectionOutcome::Error { message: e.to_string() };
    }
    match step.execute(compound).await {
        Ok(output) => output.into_outcome(),
        Err(e) => {
            warn!(step = step.name(), error = %e, "el paso terminó con error");
            SectionOutcome::Error { message: e.to_string() }
        }
    }
}
