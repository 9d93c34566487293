//! Resolution of contract factories from Hardhat compilation artifacts

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy_primitives::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    constants::{BUILD_INFO_DIR, DBG_FILE_SUFFIX},
    errors::ScriptError,
    types::BonContract,
};

/// A Hardhat contract artifact, `artifacts/<source>/<Contract>.json`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    source_name: String,
    bytecode: String,
}

/// A Hardhat debug file, pointing an artifact at the build info it was compiled in
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatDbgFile {
    build_info: PathBuf,
}

/// A Hardhat build info file. The compiler output is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatBuildInfo {
    solc_long_version: String,
    input: Value,
}

/// What a block explorer needs to reproduce a contract's compilation
#[derive(Clone, Debug, PartialEq)]
pub struct VerificationInput {
    /// `<source path>:<contract name>`
    pub fully_qualified_name: String,
    /// The full solc version, prefixed with `v` as block explorers expect
    pub compiler_version: String,
    /// The standard JSON compiler input, serialized
    pub standard_json_input: String,
}

/// Reads contract artifacts out of a Hardhat artifacts directory
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The creation bytecode of the given contract
    pub fn creation_bytecode(&self, contract: BonContract) -> Result<Bytes, ScriptError> {
        let (_, artifact) = self.read_artifact(contract)?;

        let bytecode = Bytes::from_str(&artifact.bytecode)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        if bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no creation bytecode, is it abstract?",
                contract
            )));
        }

        Ok(bytecode)
    }

    /// The compilation details needed to verify the given contract
    pub fn verification_input(
        &self,
        contract: BonContract,
    ) -> Result<VerificationInput, ScriptError> {
        let (artifact_path, artifact) = self.read_artifact(contract)?;

        let dbg_path = artifact_path.with_file_name(format!(
            "{}{}",
            contract.artifact_name(),
            DBG_FILE_SUFFIX
        ));
        let dbg_file: HardhatDbgFile = read_json(&dbg_path)?;

        // The build info path is relative to the debug file
        let build_info_path = dbg_path
            .parent()
            .map(|dir| dir.join(&dbg_file.build_info))
            .unwrap_or(dbg_file.build_info);
        let build_info: HardhatBuildInfo = read_json(&build_info_path)?;

        let standard_json_input = serde_json::to_string(&build_info.input)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        Ok(VerificationInput {
            fully_qualified_name: format!("{}:{}", artifact.source_name, artifact.contract_name),
            compiler_version: format!("v{}", build_info.solc_long_version),
            standard_json_input,
        })
    }

    /// Find and parse the artifact of the given contract
    fn read_artifact(
        &self,
        contract: BonContract,
    ) -> Result<(PathBuf, HardhatArtifact), ScriptError> {
        let file_name = format!("{}.json", contract.artifact_name());
        let path = find_file(&self.root, &file_name)?.ok_or_else(|| {
            ScriptError::ArtifactParsing(format!(
                "no artifact for {} under {}",
                contract,
                self.root.display()
            ))
        })?;

        let artifact = read_json(&path)?;
        Ok((path, artifact))
    }
}

/// Recursively search `dir` for a file named `file_name`, skipping build info
fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>, ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", dir.display(), e)))?;

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
            .path();

        if path.is_dir() {
            if !path.ends_with(BUILD_INFO_DIR) {
                subdirs.push(path);
            }
        } else if path.file_name().is_some_and(|name| name == file_name) {
            return Ok(Some(path));
        }
    }

    // Subdirectories are searched in sorted order
    subdirs.sort();
    for subdir in subdirs {
        if let Some(path) = find_file(&subdir, file_name)? {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", path.display(), e)))
}
