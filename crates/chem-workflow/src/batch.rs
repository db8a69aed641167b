//! Procesamiento por lotes: un informe por fila de un CSV de compuestos.
//!
//! El CSV debe tener las columnas `structure_nameTraditional`, `cas`, `cid`
//! y `smiles` (otras columnas se ignoran). Las filas se procesan en orden y,
//! si el checkpoint está activo, el arreglo completo de informes se reescribe
//! en el archivo de salida tras cada fila.
use crate::config::WorkflowConfig;
use crate::engine::ResearchEngine;
use crate::errors::WorkflowError;
use crate::report::CompoundReport;
use chem_domain::CompoundIdentity;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Fila del CSV de entrada. Las columnas ausentes quedan vacías y la fila
/// fallará la validación.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompoundRow {
  #[serde(rename = "structure_nameTraditional", default)]
  pub name: String,
  #[serde(default)]
  pub cas: String,
  #[serde(default)]
  pub cid: String,
  #[serde(default)]
  pub smiles: String,
}

impl CompoundRow {
  pub fn identity(&self) -> Result<CompoundIdentity, WorkflowError> {
    Ok(CompoundIdentity::new(&self.name, &self.cas, &self.cid, &self.smiles)?)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
  pub run_id: Uuid,
  pub total: usize,
  /// Filas investigadas (aunque alguna sección haya fallado).
  pub succeeded: usize,
  /// Filas con identidad inválida.
  pub failed: usize,
  /// Total de secciones con error en todas las filas.
  pub section_errors: usize,
}

pub struct BatchRunner {
  engine: ResearchEngine,
  config: WorkflowConfig,
}

impl BatchRunner {
  pub fn new(engine: ResearchEngine, config: WorkflowConfig) -> Self {
    Self { engine, config }
  }

  /// Lee las filas del CSV. Un error de formato en cualquier fila aborta la
  /// lectura.
  pub fn read_rows<R: Read>(reader: R) -> Result<Vec<CompoundRow>, WorkflowError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize::<CompoundRow>() {
      rows.push(row?);
    }
    Ok(rows)
  }

  /// Investiga cada fila en orden. Si se indica `output` y el checkpoint
  /// está activo, el archivo se reescribe después de cada fila; en todo
  /// caso se escribe al terminar.
  pub async fn run_rows(&self,
                        rows: &[CompoundRow],
                        output: Option<&Path>)
                        -> Result<(Vec<CompoundReport>, BatchSummary), WorkflowError> {
    let mut summary =
      BatchSummary { run_id: Uuid::new_v4(), total: rows.len(), succeeded: 0, failed: 0, section_errors: 0 };
    let mut reports = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
      info!(run_id = %summary.run_id, "[{}/{}] investigando {} (CAS: {}, CID: {})",
            idx + 1, rows.len(), row.name, row.cas, row.cid);
      let report = match row.identity() {
        Ok(compound) => {
          let report = self.engine.investigate(&compound).await;
          summary.succeeded += 1;
          summary.section_errors += report.failed_sections();
          report
        }
        Err(e) => {
          warn!(row = idx + 1, error = %e, "fila inválida");
          summary.failed += 1;
          CompoundReport::invalid(&row.name, &row.cas, &row.cid, &row.smiles, e.to_string())
        }
      };
      reports.push(report);

      if let (true, Some(path)) = (self.config.checkpoint, output) {
        write_reports(path, &reports)?;
      }
    }

    if let Some(path) = output {
      write_reports(path, &reports)?;
      info!(path = %path.display(), "resultados guardados");
    }
    Ok((reports, summary))
  }

  /// Lee `input`, investiga todas las filas y guarda los informes en
  /// `output`.
  pub async fn run_file(&self, input: &Path, output: &Path) -> Result<BatchSummary, WorkflowError> {
    let rows = Self::read_rows(File::open(input)?)?;
    let (_, summary) = self.run_rows(&rows, Some(output)).await?;
    Ok(summary)
  }
}

/// Escribe los informes como JSON indentado. Se escribe a un archivo
/// temporal junto al destino y se renombra, para no dejar un JSON truncado.
pub fn write_reports(path: &Path, reports: &[CompoundReport]) -> Result<(), WorkflowError> {
  let tmp = tmp_path(path);
  {
    let mut writer = BufWriter::new(File::create(&tmp)?);
    serde_json::to_writer_pretty(&mut writer, reports)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
  }
  fs::rename(&tmp, path)?;
  Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| "batch_results.json".into());
  name.push(".tmp");
  path.with_file_name(name)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_rows_and_ignores_extra_columns() {
    let csv = "structure_nameTraditional,cas,cid,smiles,notes\n\
               hinokitiol, 499-44-5 ,3611,CC(C)C1=CC(=O)C(=CC=C1)O,x\n\
               phenol,108-95-2,996,Oc1ccccc1,\n";
    let rows = BatchRunner::read_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "hinokitiol");
    assert_eq!(rows[0].cas, "499-44-5");
    assert!(rows[1].identity().is_ok());
  }

  #[test]
  fn missing_columns_fail_validation_not_parsing() {
    let rows = BatchRunner::read_rows("cas,cid\n50-00-0,712\n".as_bytes()).unwrap();
    assert_eq!(rows[0].smiles, "");
    assert!(matches!(rows[0].identity(), Err(WorkflowError::Domain(_))));
  }

  #[test]
  fn tmp_path_sits_next_to_target() {
    assert_eq!(tmp_path(Path::new("/data/out.json")), PathBuf::from("/data/out.json.tmp"));
  }
}
