//! Definitions of Solidity constructors & functions called during deployment

use alloy::sol;

/// Constructor bindings, used to ABI-encode the deployment arguments
pub mod constructors {
    use alloy_sol_types::sol;

    sol! {
        contract BonFlyer {
            constructor(string collection_metadata, string default_token_uri, uint256 max_gifts_per_phase);
        }

        contract BonTerraPassport {
            constructor(address faction_gem);
        }

        contract ElementGem {
            constructor(string collection_metadata, string default_token_uri, address soldier, uint256 max_supply);
        }

        contract SkillGem {
            constructor(string collection_metadata, string default_token_uri, address soldier, uint256 max_supply);
        }

        contract FactionGem {
            constructor(string collection_metadata, string default_token_uri, address soldier, uint256 max_supply, address passport);
        }

        contract FlyerCatalog {
            constructor(string metadata_uri, string catalog_type);
        }
    }
}

sol! {
    #[sol(rpc)]
    interface IBonTerraPassport {
        function setFactionGem(address faction_gem) external;
    }
}
