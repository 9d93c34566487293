//! Constants used in the deploy scripts

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::errors::ScriptError;

/// The default RPC URL, a local Hardhat / Anvil node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The name of the environment variable holding the deployer private key
pub const PRIV_KEY_ENV_VAR: &str = "PKEY";

/// The name of the environment variable holding the RPC URL
pub const RPC_URL_ENV_VAR: &str = "RPC_URL";

/// The name of the environment variable holding the Etherscan API key
pub const ETHERSCAN_API_KEY_ENV_VAR: &str = "ETHERSCAN_API_KEY";

/// The default path of the deployment constants file
pub const DEFAULT_CONSTANTS_PATH: &str = "deploy-constants.json";

/// The default path of the Hardhat artifacts directory
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The name of the Hardhat directory holding build info files,
/// skipped when searching for contract artifacts
pub const BUILD_INFO_DIR: &str = "build-info";

/// The suffix of Hardhat debug files, which point an artifact at its build info
pub const DBG_FILE_SUFFIX: &str = ".dbg.json";

/// The shell through which configuration command lines are run
pub const SHELL: &str = "sh";

/// The default command running the main assets configuration routine
pub const DEFAULT_MAIN_ASSETS_CMD: &str = "npx hardhat run scripts/addMainAssets.ts";

/// The default command running the catalog configuration routine
pub const DEFAULT_CATALOG_CMD: &str = "npx hardhat run scripts/configureCatalog.ts";

/// Environment variables through which deployed addresses are handed
/// to the configuration routines
pub const SOLDIER_ADDRESS_ENV_VAR: &str = "SOLDIER_ADDRESS";
/// See [`SOLDIER_ADDRESS_ENV_VAR`]
pub const ELEMENT_GEM_ADDRESS_ENV_VAR: &str = "ELEMENT_GEM_ADDRESS";
/// See [`SOLDIER_ADDRESS_ENV_VAR`]
pub const FACTION_GEM_ADDRESS_ENV_VAR: &str = "FACTION_GEM_ADDRESS";
/// See [`SOLDIER_ADDRESS_ENV_VAR`]
pub const SKILL_GEM_ADDRESS_ENV_VAR: &str = "SKILL_GEM_ADDRESS";
/// See [`SOLDIER_ADDRESS_ENV_VAR`]
pub const CATALOG_ADDRESS_ENV_VAR: &str = "CATALOG_ADDRESS";

/// The deployments key in the deployments file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The soldier contract key in the deployments file
pub const SOLDIER_CONTRACT_KEY: &str = "soldier_contract";

/// The passport contract key in the deployments file
pub const PASSPORT_CONTRACT_KEY: &str = "passport_contract";

/// The element gem contract key in the deployments file
pub const ELEMENT_GEM_CONTRACT_KEY: &str = "element_gem_contract";

/// The faction gem contract key in the deployments file
pub const FACTION_GEM_CONTRACT_KEY: &str = "faction_gem_contract";

/// The skill gem contract key in the deployments file
pub const SKILL_GEM_CONTRACT_KEY: &str = "skill_gem_contract";

/// The catalog contract key in the deployments file
pub const CATALOG_CONTRACT_KEY: &str = "catalog_contract";

/// How long to wait between transaction receipt checks
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How many times to check for a transaction receipt before giving up
pub const RECEIPT_POLL_ATTEMPTS: usize = 180;

/// The default Etherscan API endpoint (multichain v2 API)
pub const DEFAULT_ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

/// The code format Etherscan expects for Hardhat build info input
pub const STANDARD_JSON_CODE_FORMAT: &str = "solidity-standard-json-input";

/// How long to wait between verification status checks
pub const VERIFICATION_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How many times to check the verification status before giving up
pub const VERIFICATION_POLL_ATTEMPTS: usize = 24;

/// The values used to construct the contracts, read in from the
/// constants file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConstants {
    /// The collection metadata URI of the soldier contract
    pub soldier_metadata_uri: String,
    /// The default token URI of the soldier contract
    pub soldier_default_uri: String,
    /// The maximum number of soldiers gifted per mint phase
    pub max_gifts_per_phase: u64,
    /// The collection metadata URI of the element gem contract
    pub element_gem_metadata_uri: String,
    /// The default token URI of the element gem contract
    pub element_gem_default_uri: String,
    /// The collection metadata URI of the skill gem contract
    pub skill_gem_metadata_uri: String,
    /// The default token URI of the skill gem contract
    pub skill_gem_default_uri: String,
    /// The collection metadata URI of the faction gem contract
    pub faction_gem_metadata_uri: String,
    /// The default token URI of the faction gem contract
    pub faction_gem_default_uri: String,
    /// The maximum supply of each gem contract
    pub max_supply_for_gems: u64,
    /// The metadata URI of the catalog contract
    pub catalog_metadata_uri: String,
    /// The type of the parts held in the catalog
    pub catalog_type: String,
}

impl DeployConstants {
    /// Read the deployment constants from the given JSON file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ScriptError::ReadConstants(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&contents).map_err(|e| ScriptError::ReadConstants(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use super::DeployConstants;
    use crate::{errors::ScriptError, test_helpers::dummy_constants};

    #[test]
    fn test_read_constants_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("constants.json");
        let constants = dummy_constants();
        fs::write(&path, serde_json::to_string_pretty(&constants).unwrap()).unwrap();

        assert_eq!(DeployConstants::from_file(&path).unwrap(), constants);
    }

    #[test]
    fn test_unknown_constant_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("constants.json");
        let mut value = serde_json::to_value(dummy_constants()).unwrap();
        value["max_supply_for_soldiers"] = json!(10);
        fs::write(&path, value.to_string()).unwrap();

        assert!(matches!(
            DeployConstants::from_file(&path),
            Err(ScriptError::ReadConstants(_))
        ));
    }

    #[test]
    fn test_missing_constants_file() {
        let dir = tempdir().unwrap();
        let err = DeployConstants::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
