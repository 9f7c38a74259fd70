//! Sierra contract classes, compiled (CASM) classes, and their hashes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TxHashError;
use crate::felt::Felt;
use crate::hash::compute_hash_on_elements;

/// Entry points grouped the way class JSON groups them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPointsByType<E> {
    #[serde(rename = "CONSTRUCTOR", default = "Vec::new")]
    pub constructor: Vec<E>,
    #[serde(rename = "EXTERNAL", default = "Vec::new")]
    pub external: Vec<E>,
    #[serde(rename = "L1_HANDLER", default = "Vec::new")]
    pub l1_handler: Vec<E>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SierraEntryPoint {
    pub selector: Felt,
    pub function_idx: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractClass {
    pub sierra_program: Vec<Felt>,
    pub contract_class_version: String,
    pub entry_points_by_type: EntryPointsByType<SierraEntryPoint>,
    #[serde(default)]
    pub abi: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasmEntryPoint {
    pub selector: Felt,
    pub offset: u64,
    #[serde(default)]
    pub builtins: Vec<String>,
}

/// A compiled class. Fields used only by the sequencer (hints, prime) are
/// ignored on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasmClass {
    #[serde(rename = "compiler_version")]
    pub version: String,
    pub bytecode: Vec<Felt>,
    pub entry_points_by_type: EntryPointsByType<CasmEntryPoint>,
}

fn hash_sierra_entry_points(entry_points: &[SierraEntryPoint]) -> Result<Felt, TxHashError> {
    let flattened: Vec<Felt> = entry_points
        .iter()
        .flat_map(|ep| [ep.selector, Felt::from(ep.function_idx)])
        .collect();
    compute_hash_on_elements(&flattened)
}

fn hash_casm_entry_points(entry_points: &[CasmEntryPoint]) -> Result<Felt, TxHashError> {
    let mut flattened = Vec::with_capacity(entry_points.len() * 3);
    for ep in entry_points {
        let builtins: Vec<Felt> = ep
            .builtins
            .iter()
            .map(|name| Felt::from_bytes_reduced(name.as_bytes()))
            .collect();
        flattened.push(ep.selector);
        flattened.push(Felt::from(ep.offset));
        flattened.push(compute_hash_on_elements(&builtins)?);
    }
    compute_hash_on_elements(&flattened)
}

impl ContractClass {
    /// Hash of `[version, external, l1_handler, constructor, abi, program]`,
    /// with string fields read as big-endian bytes reduced into the field.
    pub fn class_hash(&self) -> Result<Felt, TxHashError> {
        let entry_points = &self.entry_points_by_type;
        let hash = compute_hash_on_elements(&[
            Felt::from_bytes_reduced(self.contract_class_version.as_bytes()),
            hash_sierra_entry_points(&entry_points.external)?,
            hash_sierra_entry_points(&entry_points.l1_handler)?,
            hash_sierra_entry_points(&entry_points.constructor)?,
            Felt::from_bytes_reduced(self.abi.as_bytes()),
            compute_hash_on_elements(&self.sierra_program)?,
        ])?;
        debug!(%hash, program_len = self.sierra_program.len(), "computed class hash");
        Ok(hash)
    }
}

impl CasmClass {
    /// Hash of `[version, external, l1_handler, constructor, bytecode]`.
    pub fn compiled_class_hash(&self) -> Result<Felt, TxHashError> {
        let entry_points = &self.entry_points_by_type;
        let hash = compute_hash_on_elements(&[
            Felt::from_bytes_reduced(self.version.as_bytes()),
            hash_casm_entry_points(&entry_points.external)?,
            hash_casm_entry_points(&entry_points.l1_handler)?,
            hash_casm_entry_points(&entry_points.constructor)?,
            compute_hash_on_elements(&self.bytecode)?,
        ])?;
        debug!(%hash, bytecode_len = self.bytecode.len(), "computed compiled class hash");
        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_groups_hash_like_empty_lists() {
        let empty = compute_hash_on_elements(&[]).unwrap();
        assert_eq!(hash_sierra_entry_points(&[]).unwrap(), empty);
        assert_eq!(hash_casm_entry_points(&[]).unwrap(), empty);
    }

    #[test]
    fn sierra_entry_points_flatten_in_order() {
        let entry_points = [
            SierraEntryPoint {
                selector: Felt::from(10u64),
                function_idx: 1,
            },
            SierraEntryPoint {
                selector: Felt::from(20u64),
                function_idx: 2,
            },
        ];
        let expected = compute_hash_on_elements(&[
            Felt::from(10u64),
            Felt::from(1u64),
            Felt::from(20u64),
            Felt::from(2u64),
        ])
        .unwrap();
        assert_eq!(hash_sierra_entry_points(&entry_points).unwrap(), expected);
    }

    #[test]
    fn casm_entry_points_include_builtins() {
        let entry_point = CasmEntryPoint {
            selector: Felt::from(10u64),
            offset: 4,
            builtins: vec!["pedersen".to_owned(), "range_check".to_owned()],
        };
        let builtins = compute_hash_on_elements(&[
            Felt::from_short_string("pedersen").unwrap(),
            Felt::from_short_string("range_check").unwrap(),
        ])
        .unwrap();
        let expected =
            compute_hash_on_elements(&[Felt::from(10u64), Felt::from(4u64), builtins]).unwrap();
        assert_eq!(hash_casm_entry_points(&[entry_point]).unwrap(), expected);
    }

    #[test]
    fn missing_entry_point_groups_are_empty() {
        let class: CasmClass = serde_json::from_str(
            r#"{
                "compiler_version": "2.0.0",
                "bytecode": ["0x1"],
                "entry_points_by_type": {
                    "EXTERNAL": [{"selector": "0x2", "offset": 0, "builtins": ["range_check"]}]
                }
            }"#,
        )
        .unwrap();
        let entry_points = &class.entry_points_by_type;
        assert_eq!(entry_points.external.len(), 1);
        assert!(entry_points.constructor.is_empty());
        assert!(entry_points.l1_handler.is_empty());
        assert!(class.compiled_class_hash().is_ok());
    }
}
