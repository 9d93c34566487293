//! Fixtures shared by the unit tests

use std::{fs, path::Path};

use alloy_primitives::Address;
use serde_json::json;

use crate::{
    constants::DeployConstants,
    types::{BonContract, ContractHandle, Deployment},
};

/// A small valid creation bytecode
pub const DUMMY_BYTECODE: &str = "0x6080604052348015600f57600080fd5b50";

/// The compiler version recorded in the dummy build info
pub const DUMMY_SOLC_VERSION: &str = "0.8.18+commit.87f61d96";

/// The name of the dummy build info file
const DUMMY_BUILD_INFO: &str = "5f3c1e2d9a7b4c6e8f0a1b2c3d4e5f60.json";

/// Every contract, in deployment order
pub const ALL_CONTRACTS: [BonContract; 6] = [
    BonContract::BonFlyer,
    BonContract::BonTerraPassport,
    BonContract::ElementGem,
    BonContract::SkillGem,
    BonContract::FactionGem,
    BonContract::FlyerCatalog,
];

pub fn dummy_constants() -> DeployConstants {
    DeployConstants {
        soldier_metadata_uri: "ipfs://soldiers/collection.json".to_string(),
        soldier_default_uri: "ipfs://soldiers/default.json".to_string(),
        max_gifts_per_phase: 500,
        element_gem_metadata_uri: "ipfs://gems/element/collection.json".to_string(),
        element_gem_default_uri: "ipfs://gems/element/default.json".to_string(),
        skill_gem_metadata_uri: "ipfs://gems/skill/collection.json".to_string(),
        skill_gem_default_uri: "ipfs://gems/skill/default.json".to_string(),
        faction_gem_metadata_uri: "ipfs://gems/faction/collection.json".to_string(),
        faction_gem_default_uri: "ipfs://gems/faction/default.json".to_string(),
        max_supply_for_gems: 10_000,
        catalog_metadata_uri: "ipfs://catalog/metadata.json".to_string(),
        catalog_type: "image/png".to_string(),
    }
}

/// The address each contract resolves to in the mocked deployments
pub fn mock_address(contract: BonContract) -> Address {
    let last_byte = match contract {
        BonContract::BonFlyer => 0xa,
        BonContract::BonTerraPassport => 0xb,
        BonContract::ElementGem => 0xc,
        BonContract::FactionGem => 0xd,
        BonContract::SkillGem => 0xe,
        BonContract::FlyerCatalog => 0xf,
    };
    Address::with_last_byte(last_byte)
}

pub fn mock_handle(contract: BonContract) -> ContractHandle {
    ContractHandle {
        contract,
        address: mock_address(contract),
    }
}

pub fn mock_deployment() -> Deployment {
    Deployment {
        soldier: mock_handle(BonContract::BonFlyer),
        passport: mock_handle(BonContract::BonTerraPassport),
        element_gem: mock_handle(BonContract::ElementGem),
        faction_gem: mock_handle(BonContract::FactionGem),
        skill_gem: mock_handle(BonContract::SkillGem),
        catalog: mock_handle(BonContract::FlyerCatalog),
    }
}

/// Write a Hardhat-style artifact, debug file & build info for the contract
pub fn write_artifact(root: &Path, contract: BonContract, bytecode: &str) {
    let name = contract.artifact_name();
    let source_name = format!("contracts/{}.sol", name);
    let artifact_dir = root.join(&source_name);
    fs::create_dir_all(&artifact_dir).unwrap();

    let artifact = json!({
        "_format": "hh-sol-artifact-1",
        "contractName": name,
        "sourceName": source_name,
        "abi": [],
        "bytecode": bytecode,
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {},
    });
    fs::write(
        artifact_dir.join(format!("{}.json", name)),
        artifact.to_string(),
    )
    .unwrap();

    let dbg = json!({
        "_format": "hh-sol-dbg-1",
        "buildInfo": format!("../../build-info/{}", DUMMY_BUILD_INFO),
    });
    fs::write(
        artifact_dir.join(format!("{}.dbg.json", name)),
        dbg.to_string(),
    )
    .unwrap();

    let build_info_dir = root.join("build-info");
    fs::create_dir_all(&build_info_dir).unwrap();
    let build_info = json!({
        "_format": "hh-sol-build-info-1",
        "id": "5f3c1e2d9a7b4c6e8f0a1b2c3d4e5f60",
        "solcVersion": "0.8.18",
        "solcLongVersion": DUMMY_SOLC_VERSION,
        "input": {
            "language": "Solidity",
            "sources": { source_name: { "content": "// SPDX-License-Identifier: MIT" } },
            "settings": { "optimizer": { "enabled": true, "runs": 200 } },
        },
        "output": {},
    });
    fs::write(
        build_info_dir.join(DUMMY_BUILD_INFO),
        build_info.to_string(),
    )
    .unwrap();
}

/// Write artifacts for every contract
pub fn write_artifacts(root: &Path) {
    for contract in ALL_CONTRACTS {
        write_artifact(root, contract, DUMMY_BYTECODE);
    }
}
