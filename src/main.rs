use anyhow::Context;
use chem_domain::{normalize_activity_records, BioactivityRecord, CompoundIdentity};
use chem_workflow::{BatchRunner, ResearchEngineFactory, SectionKind, WorkflowConfig, ALL_SECTIONS};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI para investigar compuestos contra PubChem, ChEMBL, la API CompTox de
/// la EPA y MCULE.
///
/// Variables de entorno (también desde `.env`): `CTX_API_KEY`,
/// `MCULE_API_TOKEN` y las URLs base opcionales de cada servicio.
#[derive(Parser)]
#[command(name = "molsearch")]
#[command(about = "Investigación de compuestos: bioactividad, toxicidad y disponibilidad", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Investiga un único compuesto e imprime el informe como JSON
    Query {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        cas: String,
        #[arg(long)]
        cid: String,
        #[arg(long)]
        smiles: String,
        /// Secciones separadas por comas (activity,toxicity,availability)
        #[arg(long, env = "MOLSEARCH_SECTIONS")]
        sections: Option<String>,
    },
    /// Procesa un CSV con columnas structure_nameTraditional,cas,cid,smiles
    Batch {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "batch_results.json")]
        output: PathBuf,
        #[arg(long, env = "MOLSEARCH_SECTIONS")]
        sections: Option<String>,
        /// Escribir el archivo de salida sólo al final
        #[arg(long, default_value_t = false)]
        no_checkpoint: bool,
    },
    /// Normaliza un arreglo JSON de registros de actividad de ChEMBL
    Normalize {
        /// Archivo de entrada, o `-` para stdin
        #[arg(short, long, default_value = "-")]
        input: String,
    },
}

fn workflow_config(sections: Option<&str>, checkpoint: bool) -> anyhow::Result<WorkflowConfig> {
    let sections = match sections {
        Some(raw) => SectionKind::parse_list(raw)?,
        None => ALL_SECTIONS.to_vec(),
    };
    Ok(WorkflowConfig { sections, checkpoint })
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(input).with_context(|| format!("no se pudo leer {}", input))
}

/// Cada elemento pasa por `BioactivityRecord::from_json`, de modo que un
/// elemento que no es objeto cuenta como registro vacío y no aborta el resto.
fn parse_raw_records(raw: &str) -> anyhow::Result<Vec<BioactivityRecord>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(raw).context("se esperaba un arreglo JSON de registros de actividad")?;
    Ok(values.iter().map(BioactivityRecord::from_json).collect())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env()
                  .add_directive("molsearch=info".parse()?)
                  .add_directive("chem_workflow=info".parse()?)
                  .add_directive("chem_providers=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Query { name, cas, cid, smiles, sections } => {
            let compound = CompoundIdentity::new(&name, &cas, &cid, &smiles)?;
            let config = workflow_config(sections.as_deref(), false)?;
            let engine = ResearchEngineFactory::from_env(&config)?;
            let report = engine.investigate(&compound).await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Batch { input, output, sections, no_checkpoint } => {
            let config = workflow_config(sections.as_deref(), !no_checkpoint)?;
            let engine = ResearchEngineFactory::from_env(&config)?;
            let runner = BatchRunner::new(engine, config);
            let summary = runner.run_file(&input, &output).await?;
            info!(run_id = %summary.run_id,
                  total = summary.total,
                  failed = summary.failed,
                  section_errors = summary.section_errors,
                  "lote terminado");
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Normalize { input } => {
            let raw = read_input(&input)?;
            let records = parse_raw_records(&raw)?;
            let normalized = normalize_activity_records(&records);
            println!("{}", serde_json::to_string_pretty(&normalized)?);
        }
    }
    Ok(())
}
