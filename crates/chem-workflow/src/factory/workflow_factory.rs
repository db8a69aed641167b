use crate::config::WorkflowConfig;
use crate::engine::ResearchEngine;
use crate::errors::WorkflowError;
use crate::flows::{ActivityStep, AvailabilityStep, ToxicityStep};
use crate::section_kind::SectionKind;
use crate::step::ResearchStep;
use chem_providers::{ActivitySource, AvailabilitySource, ChemblActivitySource, CtxClient, MculeClient,
                     ProviderConfig, ToxicitySource};
use std::sync::Arc;

/// Fuentes de datos que alimentan los pasos.
#[derive(Clone)]
pub struct Sources {
  pub activity: Arc<dyn ActivitySource>,
  pub toxicity: Arc<dyn ToxicitySource>,
  pub availability: Arc<dyn AvailabilitySource>,
}

impl Sources {
  /// Fuentes respaldadas por los clientes HTTP reales.
  pub fn from_provider_config(config: &ProviderConfig) -> Result<Self, WorkflowError> {
    Ok(Sources { activity: Arc::new(ChemblActivitySource::new(config)?),
                 toxicity: Arc::new(CtxClient::new(config)?),
                 availability: Arc::new(MculeClient::new(config)?) })
  }
}

/// Factory para construir motores de investigación a partir de la
/// configuración.
pub struct ResearchEngineFactory;

impl ResearchEngineFactory {
  /// Construye el motor con un paso por sección configurada, en el mismo
  /// orden.
  pub fn create(config: &WorkflowConfig, sources: &Sources) -> Result<ResearchEngine, WorkflowError> {
    config.validate()?;
    let steps: Vec<Arc<dyn ResearchStep>> = config.sections
                                                  .iter()
                                                  .map(|kind| Self::step_for(*kind, sources))
                                                  .collect();
    Ok(ResearchEngine::new(steps))
  }

  /// Igual que `create` pero con los clientes HTTP configurados desde el
  /// entorno.
  pub fn from_env(config: &WorkflowConfig) -> Result<ResearchEngine, WorkflowError> {
    let provider_config = ProviderConfig::from_env()?;
    let sources = Sources::from_provider_config(&provider_config)?;
    Self::create(config, &sources)
  }

  fn step_for(kind: SectionKind, sources: &Sources) -> Arc<dyn ResearchStep> {
    match kind {
      SectionKind::Activity => Arc::new(ActivityStep::new(sources.activity.clone())),
      SectionKind::Toxicity => Arc::new(ToxicityStep::new(sources.toxicity.clone())),
      SectionKind::Availability => Arc::new(AvailabilityStep::new(sources.availability.clone())),
    }
  }
}
