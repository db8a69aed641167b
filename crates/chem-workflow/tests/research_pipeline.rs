use chem_domain::{AvailabilityReport, BioactivityRecord, CompoundIdentity, HazardRecord};
use chem_providers::{InMemoryActivitySource, InMemoryAvailabilitySource, InMemoryToxicitySource};
use chem_workflow::flows::molsearch_flow::steps::activity_step::{NO_ACTIVITY_DATA, NO_CHEMBL_RECORD};
use chem_workflow::flows::molsearch_flow::steps::toxicity_step::{NO_DTXSID, NO_HAZARD_DATA};
use chem_workflow::flows::{ActivityStep, AvailabilityStep, ToxicityStep};
use chem_workflow::{BatchRunner, ResearchEngineFactory, ResearchStep, SectionKind, SectionOutcome, Sources,
                    WorkflowConfig, WorkflowError};
use serde_json::json;
use std::sync::Arc;

const HINOKITIOL_SMILES: &str = "CC(C)C1=CC(=O)C(=CC=C1)O";

fn hinokitiol() -> CompoundIdentity {
  CompoundIdentity::new("hinokitiol", "499-44-5", "3611", HINOKITIOL_SMILES).unwrap()
}

fn activity_records() -> Vec<BioactivityRecord> {
  serde_json::from_value(json!([
    {"standard_type": "IC50", "relation": "=", "standard_value": "10", "standard_units": "nM", "target_organism": "E. coli"},
    {"target_organism": "E. coli", "assay_description": "duplicate"},
    {"standard_type": "MIC", "relation": "=", "standard_value": "8", "standard_units": "ug.mL-1", "target_organism": "Staphylococcus aureus"}
  ])).unwrap()
}

fn full_sources() -> Sources {
  let hazard = HazardRecord { toxval_type: Some("LD50".into()),
                              toxval_numeric_qualifier: Some("=".into()),
                              toxval_numeric: Some(504.0),
                              toxval_units: Some("mg/kg".into()),
                              species_common: Some("rat".into()),
                              ..Default::default() };
  let report =
    AvailabilityReport::merge("MCULE-5000123456", json!({"best_price": 42.0}), json!({"available": true})).unwrap();
  Sources { activity: Arc::new(InMemoryActivitySource::new().with_compound(3611, "CHEMBL48310", activity_records())),
            toxicity: Arc::new(InMemoryToxicitySource::new().with_compound("499-44-5", "DTXSID0043956", vec![hazard])),
            availability: Arc::new(InMemoryAvailabilitySource::new().with_report(HINOKITIOL_SMILES, report)) }
}

fn empty_sources() -> Sources {
  Sources { activity: Arc::new(InMemoryActivitySource::new()),
            toxicity: Arc::new(InMemoryToxicitySource::new()),
            availability: Arc::new(InMemoryAvailabilitySource::new()) }
}

#[tokio::test]
async fn investigates_every_section() -> Result<(), WorkflowError> {
  let engine = ResearchEngineFactory::create(&WorkflowConfig::default(), &full_sources())?;
  let report = engine.investigate(&hinokitiol()).await;

  assert_eq!(report.failed_sections(), 0);
  let activity = report.section("activity_result").and_then(SectionOutcome::data).unwrap();
  assert_eq!(activity,
             &json!([
               {"activity_data": "IC50 = 10 nM", "target_organism": "E. coli"},
               {"activity_data": "MIC = 8 ug.mL-1", "target_organism": "Staphylococcus aureus"}
             ]));

  let toxicity = report.section("toxicity_result").and_then(SectionOutcome::data).unwrap();
  assert_eq!(toxicity[0]["ToxicityValue"], json!("LD50=504.0 mg/kg"));

  let availability = report.section("availability_result").and_then(SectionOutcome::data).unwrap();
  assert_eq!(availability["mcule_id"], json!("MCULE-5000123456"));
  assert_eq!(availability["available"], json!(true));

  match report.section("activity_result") {
    Some(SectionOutcome::Ok { metadata, .. }) => {
      assert_eq!(metadata["chembl_id"], json!("CHEMBL48310"));
      assert_eq!(metadata["raw_records"], json!(3));
      assert_eq!(metadata["normalized_records"], json!(2));
    }
    other => panic!("unexpected activity outcome: {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn sections_follow_configured_order() -> Result<(), WorkflowError> {
  let config = WorkflowConfig::default().with_sections(vec![SectionKind::Availability, SectionKind::Activity]);
  let engine = ResearchEngineFactory::create(&config, &full_sources())?;
  assert_eq!(engine.sections(), vec![SectionKind::Availability, SectionKind::Activity]);

  let report = engine.investigate(&hinokitiol()).await;
  let keys: Vec<&str> = report.sections.keys().map(String::as_str).collect();
  assert_eq!(keys, vec!["availability_result", "activity_result"]);
  Ok(())
}

#[tokio::test]
async fn missing_data_is_reported_as_empty() -> Result<(), WorkflowError> {
  let engine = ResearchEngineFactory::create(&WorkflowConfig::default(), &empty_sources())?;
  let report = engine.investigate(&hinokitiol()).await;

  assert_eq!(report.failed_sections(), 0);
  assert!(matches!(report.section("activity_result"),
                   Some(SectionOutcome::Empty { reason, .. }) if reason == NO_CHEMBL_RECORD));
  assert!(matches!(report.section("toxicity_result"),
                   Some(SectionOutcome::Empty { reason, .. }) if reason == NO_DTXSID));
  assert!(matches!(report.section("availability_result"),
                   Some(SectionOutcome::Empty { reason, .. })
                     if reason == &format!("Could not retrieve MCULE ID for SMILES: {HINOKITIOL_SMILES}")));
  Ok(())
}

#[tokio::test]
async fn compound_without_activities_is_empty() -> Result<(), WorkflowError> {
  let mut sources = empty_sources();
  sources.activity = Arc::new(InMemoryActivitySource::new().with_compound(3611, "CHEMBL48310", vec![]));
  let config = WorkflowConfig::default().with_sections(vec![SectionKind::Activity]);
  let report = ResearchEngineFactory::create(&config, &sources)?.investigate(&hinokitiol()).await;
  assert!(matches!(report.section("activity_result"),
                   Some(SectionOutcome::Empty { reason, .. }) if reason == NO_ACTIVITY_DATA));
  Ok(())
}

#[tokio::test]
async fn compound_without_hazard_records_is_empty() -> Result<(), WorkflowError> {
  let mut sources = empty_sources();
  sources.toxicity = Arc::new(InMemoryToxicitySource::new().with_compound("499-44-5", "DTXSID0043956", vec![]));
  let config = WorkflowConfig::default().with_sections(vec![SectionKind::Toxicity]);
  let report = ResearchEngineFactory::create(&config, &sources)?.investigate(&hinokitiol()).await;
  match report.section("toxicity_result") {
    Some(SectionOutcome::Empty { reason, metadata }) => {
      assert_eq!(reason, NO_HAZARD_DATA);
      assert_eq!(metadata["dtxsid"], json!("DTXSID0043956"));
      assert_eq!(metadata["records"], json!(0));
    }
    other => panic!("expected empty toxicity section, got {other:?}"),
  }
  Ok(())
}

#[tokio::test]
async fn step_metadata_is_recoverable() -> Result<(), WorkflowError> {
  let sources = full_sources();
  let compound = hinokitiol();

  let output = ActivityStep::new(sources.activity.clone()).execute(&compound).await?;
  let activity = ActivityStep::recover_metadata(&output)?;
  assert_eq!(activity.step, "activity_analysis");
  assert_eq!(activity.cid, 3611);
  assert_eq!(activity.chembl_id.as_deref(), Some("CHEMBL48310"));
  assert_eq!((activity.raw_records, activity.normalized_records), (3, 2));

  let output = ToxicityStep::new(sources.toxicity.clone()).execute(&compound).await?;
  let toxicity = ToxicityStep::recover_metadata(&output)?;
  assert_eq!(toxicity.cas, "499-44-5");
  assert_eq!(toxicity.dtxsid.as_deref(), Some("DTXSID0043956"));
  assert_eq!(toxicity.records, 1);

  let output = AvailabilityStep::new(sources.availability.clone()).execute(&compound).await?;
  let availability = AvailabilityStep::recover_metadata(&output)?;
  assert_eq!(availability.smiles, HINOKITIOL_SMILES);
  assert_eq!(availability.mcule_id.as_deref(), Some("MCULE-5000123456"));

  let empty = AvailabilityStep::new(empty_sources().availability).execute(&compound).await?;
  assert!(AvailabilityStep::recover_metadata(&empty)?.mcule_id.is_none());
  Ok(())
}

#[test]
fn metadata_of_another_step_is_rejected() {
  let output = chem_workflow::StepOutput::data(json!([]), json!({"step": "activity_analysis"}));
  assert!(matches!(ToxicityStep::recover_metadata(&output), Err(WorkflowError::Serialization(_))));
}

#[tokio::test]
async fn failing_source_does_not_affect_other_sections() -> Result<(), WorkflowError> {
  let mut sources = full_sources();
  sources.toxicity = Arc::new(InMemoryToxicitySource::failing("CompTox unavailable"));
  let engine = ResearchEngineFactory::create(&WorkflowConfig::default(), &sources)?;
  let report = engine.investigate(&hinokitiol()).await;

  assert_eq!(report.failed_sections(), 1);
  match report.section("toxicity_result") {
    Some(SectionOutcome::Error { message }) => assert!(message.contains("CompTox unavailable")),
    other => panic!("expected error outcome, got {other:?}"),
  }
  assert!(report.section("activity_result").and_then(SectionOutcome::data).is_some());
  assert!(report.section("availability_result").and_then(SectionOutcome::data).is_some());
  Ok(())
}

#[tokio::test]
async fn smiles_with_spaces_fails_availability_validation() -> Result<(), WorkflowError> {
  let sources = full_sources();
  let config = WorkflowConfig::default().with_sections(vec![SectionKind::Availability]);
  let engine = ResearchEngineFactory::create(&config, &sources)?;
  let compound = CompoundIdentity::new("broken", "499-44-5", "3611", "CC O").unwrap();
  let report = engine.investigate(&compound).await;
  assert!(report.section("availability_result").map(SectionOutcome::is_error).unwrap_or(false));
  Ok(())
}

#[test]
fn empty_section_list_is_rejected() {
  let config = WorkflowConfig::default().with_sections(vec![]);
  assert!(matches!(ResearchEngineFactory::create(&config, &empty_sources()), Err(WorkflowError::Validation(_))));
}

#[tokio::test]
async fn batch_writes_one_report_per_row() -> Result<(), WorkflowError> {
  let dir = tempfile::tempdir()?;
  let input = dir.path().join("compounds.csv");
  let output = dir.path().join("results.json");
  std::fs::write(&input,
                 format!("structure_nameTraditional,cas,cid,smiles\n\
                          hinokitiol,499-44-5,3611,{HINOKITIOL_SMILES}\n\
                          typo,499-44-4,3611,{HINOKITIOL_SMILES}\n\
                          phenol,108-95-2,996,Oc1ccccc1\n"))?;

  let mut sources = full_sources();
  sources.availability = Arc::new(InMemoryAvailabilitySource::failing("quota exceeded"));
  let engine = ResearchEngineFactory::create(&WorkflowConfig::default(), &sources)?;
  let runner = BatchRunner::new(engine, WorkflowConfig::default());

  let summary = runner.run_file(&input, &output).await?;
  assert_eq!(summary.total, 3);
  assert_eq!(summary.succeeded, 2);
  assert_eq!(summary.failed, 1);
  assert_eq!(summary.section_errors, 2);

  let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output)?)?;
  let rows = written.as_array().unwrap();
  assert_eq!(rows.len(), 3);
  assert_eq!(rows[0]["name"], json!("hinokitiol"));
  assert_eq!(rows[0]["activity_result"]["status"], json!("ok"));
  assert!(rows[1]["error"].as_str().unwrap().contains("499-44-4"));
  assert_eq!(rows[2]["cid"], json!("996"));
  assert_eq!(rows[2]["activity_result"]["status"], json!("empty"));
  assert!(!dir.path().join("results.json.tmp").exists());
  Ok(())
}

#[tokio::test]
async fn batch_without_output_keeps_reports_in_memory() -> Result<(), WorkflowError> {
  let rows = BatchRunner::read_rows("structure_nameTraditional,cas,cid,smiles\nphenol,108-95-2,996,Oc1ccccc1\n".as_bytes())?;
  let config = WorkflowConfig { checkpoint: false, ..WorkflowConfig::default() };
  let engine = ResearchEngineFactory::create(&config, &empty_sources())?;
  let (reports, summary) = BatchRunner::new(engine, config).run_rows(&rows, None).await?;
  assert_eq!(reports.len(), 1);
  assert_eq!(summary.failed, 0);
  assert_eq!(reports[0].sections.len(), 3);
  Ok(())
}
