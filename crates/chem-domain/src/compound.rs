// compound.rs
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Número de registro CAS (`NNNNNNN-NN-N`) con dígito de control verificado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CasNumber(String);

impl CasNumber {
  pub fn parse(raw: &str) -> Result<Self, DomainError> {
    let cas = raw.trim();
    let parts: Vec<&str> = cas.split('-').collect();
    if parts.len() != 3 {
      return Err(DomainError::ValidationError(format!("CAS debe tener tres bloques separados por guiones: '{}'", raw)));
    }
    let (head, mid, check) = (parts[0], parts[1], parts[2]);
    if !(2..=7).contains(&head.len()) || mid.len() != 2 || check.len() != 1 {
      return Err(DomainError::ValidationError(format!("Longitud de bloques CAS inválida: '{}'", raw)));
    }
    if !cas.chars().all(|c| c.is_ascii_digit() || c == '-') {
      return Err(DomainError::ValidationError(format!("CAS contiene caracteres inválidos: '{}'", raw)));
    }

    let digits: Vec<u32> = head.chars().chain(mid.chars()).filter_map(|c| c.to_digit(10)).collect();
    let sum: u32 = digits.iter().rev().enumerate().map(|(i, d)| (i as u32 + 1) * d).sum();
    let expected = sum % 10;
    let found = check.chars().next().and_then(|c| c.to_digit(10)).unwrap_or(u32::MAX);
    if expected != found {
      return Err(DomainError::ValidationError(format!("Dígito de control CAS incorrecto en '{}': se esperaba {}",
                                                      raw, expected)));
    }
    Ok(Self(cas.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for CasNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for CasNumber {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl TryFrom<String> for CasNumber {
  type Error = DomainError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<CasNumber> for String {
  fn from(value: CasNumber) -> Self {
    value.0
  }
}

/// Identificador de compuesto en PubChem (entero positivo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PubChemCid(u64);

impl PubChemCid {
  pub fn parse(raw: &str) -> Result<Self, DomainError> {
    let trimmed = raw.trim();
    // los CSV exportados con pandas a veces escriben "3611.0"
    let trimmed = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    match trimmed.parse::<u64>() {
      Ok(0) | Err(_) => Err(DomainError::ValidationError(format!("PubChem CID inválido: '{}'", raw))),
      Ok(n) => Ok(Self(n)),
    }
  }

  pub fn value(&self) -> u64 {
    self.0
  }
}

impl fmt::Display for PubChemCid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Identidad de un compuesto a investigar: nombre, CAS, CID y SMILES.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundIdentity {
  name: String,
  cas: CasNumber,
  cid: PubChemCid,
  smiles: String,
}

impl CompoundIdentity {
  pub fn new(name: &str, cas: &str, cid: &str, smiles: &str) -> Result<Self, DomainError> {
    let cas = CasNumber::parse(cas)?;
    let cid = PubChemCid::parse(cid)?;
    if smiles.trim().is_empty() {
      return Err(DomainError::ValidationError("SMILES no puede estar vacío".to_string()));
    }
    Ok(Self { name: name.trim().to_string(), cas, cid, smiles: smiles.trim().to_string() })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn cas(&self) -> &CasNumber {
    &self.cas
  }

  pub fn cid(&self) -> PubChemCid {
    self.cid
  }

  pub fn smiles(&self) -> &str {
    &self.smiles
  }
}

impl fmt::Display for CompoundIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Compound(name: {}, CAS: {}, CID: {}, SMILES: {})",
           self.name, self.cas, self.cid, self.smiles)
  }
}
