//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolConstructor;
use serde_json::{json, Value};

use crate::{
    constants::{
        DeployConstants, CATALOG_CONTRACT_KEY, DEPLOYMENTS_KEY, ELEMENT_GEM_CONTRACT_KEY,
        FACTION_GEM_CONTRACT_KEY, PASSPORT_CONTRACT_KEY, SKILL_GEM_CONTRACT_KEY,
        SOLDIER_CONTRACT_KEY,
    },
    solidity::constructors::{
        BonFlyer, BonTerraPassport, ElementGem, FactionGem, FlyerCatalog, SkillGem,
    },
};

/// The contracts deployed by the scripts
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BonContract {
    /// The soldier NFT contract
    BonFlyer,
    /// The passport contract
    BonTerraPassport,
    /// The element gem contract
    ElementGem,
    /// The faction gem contract
    FactionGem,
    /// The skill gem contract
    SkillGem,
    /// The catalog contract
    FlyerCatalog,
}

impl BonContract {
    /// The name of the contract's compilation artifact
    pub fn artifact_name(&self) -> &'static str {
        match self {
            BonContract::BonFlyer => "BonFlyer",
            BonContract::BonTerraPassport => "BonTerraPassport",
            BonContract::ElementGem => "ElementGem",
            BonContract::FactionGem => "FactionGem",
            BonContract::SkillGem => "SkillGem",
            BonContract::FlyerCatalog => "FlyerCatalog",
        }
    }

    /// The human-readable label used when reporting the contract
    pub fn label(&self) -> &'static str {
        match self {
            BonContract::BonFlyer => "Snake Soldier",
            BonContract::BonTerraPassport => "SerpenTerra Passport",
            BonContract::ElementGem => "Element Gem",
            BonContract::FactionGem => "Faction Gem",
            BonContract::SkillGem => "Skill Gem",
            BonContract::FlyerCatalog => "Snake Catalog",
        }
    }

    /// The key of the contract in the deployments file
    pub fn deployments_key(&self) -> &'static str {
        match self {
            BonContract::BonFlyer => SOLDIER_CONTRACT_KEY,
            BonContract::BonTerraPassport => PASSPORT_CONTRACT_KEY,
            BonContract::ElementGem => ELEMENT_GEM_CONTRACT_KEY,
            BonContract::FactionGem => FACTION_GEM_CONTRACT_KEY,
            BonContract::SkillGem => SKILL_GEM_CONTRACT_KEY,
            BonContract::FlyerCatalog => CATALOG_CONTRACT_KEY,
        }
    }
}

impl Display for BonContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.artifact_name())
    }
}

/// The arguments with which a contract is constructed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructorArgs {
    /// `BonFlyer(collectionMetadata, defaultTokenUri, maxGiftsPerPhase)`
    BonFlyer {
        collection_metadata: String,
        default_token_uri: String,
        max_gifts_per_phase: U256,
    },
    /// `BonTerraPassport(factionGem)`
    BonTerraPassport { faction_gem: Address },
    /// `ElementGem(collectionMetadata, defaultTokenUri, soldier, maxSupply)`
    ElementGem {
        collection_metadata: String,
        default_token_uri: String,
        soldier: Address,
        max_supply: U256,
    },
    /// `FactionGem(collectionMetadata, defaultTokenUri, soldier, maxSupply, passport)`
    FactionGem {
        collection_metadata: String,
        default_token_uri: String,
        soldier: Address,
        max_supply: U256,
        passport: Address,
    },
    /// `SkillGem(collectionMetadata, defaultTokenUri, soldier, maxSupply)`
    SkillGem {
        collection_metadata: String,
        default_token_uri: String,
        soldier: Address,
        max_supply: U256,
    },
    /// `FlyerCatalog(metadataUri, catalogType)`
    FlyerCatalog {
        metadata_uri: String,
        catalog_type: String,
    },
}

impl ConstructorArgs {
    /// The soldier contract's arguments
    pub fn soldier(constants: &DeployConstants) -> Self {
        ConstructorArgs::BonFlyer {
            collection_metadata: constants.soldier_metadata_uri.clone(),
            default_token_uri: constants.soldier_default_uri.clone(),
            max_gifts_per_phase: U256::from(constants.max_gifts_per_phase),
        }
    }

    /// The passport contract's arguments.
    ///
    /// The passport is constructed without a faction gem, which is
    /// linked once the faction gem has been deployed
    pub fn passport() -> Self {
        ConstructorArgs::BonTerraPassport {
            faction_gem: Address::ZERO,
        }
    }

    /// The element gem contract's arguments
    pub fn element_gem(constants: &DeployConstants, soldier: Address) -> Self {
        ConstructorArgs::ElementGem {
            collection_metadata: constants.element_gem_metadata_uri.clone(),
            default_token_uri: constants.element_gem_default_uri.clone(),
            soldier,
            max_supply: U256::from(constants.max_supply_for_gems),
        }
    }

    /// The skill gem contract's arguments
    pub fn skill_gem(constants: &DeployConstants, soldier: Address) -> Self {
        ConstructorArgs::SkillGem {
            collection_metadata: constants.skill_gem_metadata_uri.clone(),
            default_token_uri: constants.skill_gem_default_uri.clone(),
            soldier,
            max_supply: U256::from(constants.max_supply_for_gems),
        }
    }

    /// The faction gem contract's arguments
    pub fn faction_gem(constants: &DeployConstants, soldier: Address, passport: Address) -> Self {
        ConstructorArgs::FactionGem {
            collection_metadata: constants.faction_gem_metadata_uri.clone(),
            default_token_uri: constants.faction_gem_default_uri.clone(),
            soldier,
            max_supply: U256::from(constants.max_supply_for_gems),
            passport,
        }
    }

    /// The catalog contract's arguments
    pub fn catalog(constants: &DeployConstants) -> Self {
        ConstructorArgs::FlyerCatalog {
            metadata_uri: constants.catalog_metadata_uri.clone(),
            catalog_type: constants.catalog_type.clone(),
        }
    }

    /// The contract these arguments construct
    pub fn contract(&self) -> BonContract {
        match self {
            ConstructorArgs::BonFlyer { .. } => BonContract::BonFlyer,
            ConstructorArgs::BonTerraPassport { .. } => BonContract::BonTerraPassport,
            ConstructorArgs::ElementGem { .. } => BonContract::ElementGem,
            ConstructorArgs::FactionGem { .. } => BonContract::FactionGem,
            ConstructorArgs::SkillGem { .. } => BonContract::SkillGem,
            ConstructorArgs::FlyerCatalog { .. } => BonContract::FlyerCatalog,
        }
    }

    /// ABI-encode the arguments, as appended to the contract's creation bytecode
    pub fn abi_encode(&self) -> Vec<u8> {
        match self.clone() {
            ConstructorArgs::BonFlyer {
                collection_metadata,
                default_token_uri,
                max_gifts_per_phase,
            } => BonFlyer::constructorCall {
                collection_metadata,
                default_token_uri,
                max_gifts_per_phase,
            }
            .abi_encode(),
            ConstructorArgs::BonTerraPassport { faction_gem } => {
                BonTerraPassport::constructorCall { faction_gem }.abi_encode()
            }
            ConstructorArgs::ElementGem {
                collection_metadata,
                default_token_uri,
                soldier,
                max_supply,
            } => ElementGem::constructorCall {
                collection_metadata,
                default_token_uri,
                soldier,
                max_supply,
            }
            .abi_encode(),
            ConstructorArgs::FactionGem {
                collection_metadata,
                default_token_uri,
                soldier,
                max_supply,
                passport,
            } => FactionGem::constructorCall {
                collection_metadata,
                default_token_uri,
                soldier,
                max_supply,
                passport,
            }
            .abi_encode(),
            ConstructorArgs::SkillGem {
                collection_metadata,
                default_token_uri,
                soldier,
                max_supply,
            } => SkillGem::constructorCall {
                collection_metadata,
                default_token_uri,
                soldier,
                max_supply,
            }
            .abi_encode(),
            ConstructorArgs::FlyerCatalog {
                metadata_uri,
                catalog_type,
            } => FlyerCatalog::constructorCall {
                metadata_uri,
                catalog_type,
            }
            .abi_encode(),
        }
    }
}

/// A deployed contract
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContractHandle {
    /// Which contract was deployed
    pub contract: BonContract,
    /// The address at which it was deployed
    pub address: Address,
}

impl ContractHandle {
    /// The line reporting the contract's deployment
    pub fn report_line(&self) -> String {
        format!("{} deployed to {}.", self.contract.label(), self.address)
    }
}

/// The full set of deployed contracts
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub soldier: ContractHandle,
    pub passport: ContractHandle,
    pub element_gem: ContractHandle,
    pub faction_gem: ContractHandle,
    pub skill_gem: ContractHandle,
    pub catalog: ContractHandle,
}

impl Deployment {
    /// The deployed contracts, in reporting order
    pub fn handles(&self) -> [ContractHandle; 6] {
        [
            self.soldier,
            self.passport,
            self.element_gem,
            self.faction_gem,
            self.skill_gem,
            self.catalog,
        ]
    }

    /// One report line per deployed contract
    pub fn report_lines(&self) -> Vec<String> {
        self.handles().iter().map(ContractHandle::report_line).collect()
    }

    /// The deployments file contents for this deployment
    pub fn to_json(&self) -> Value {
        let addresses: serde_json::Map<String, Value> = self
            .handles()
            .iter()
            .map(|handle| {
                (
                    handle.contract.deployments_key().to_string(),
                    Value::String(handle.address.to_string()),
                )
            })
            .collect();

        json!({ DEPLOYMENTS_KEY: addresses })
    }
}
