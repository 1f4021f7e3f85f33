mod mock_client;

pub use mock_client::{mock_address, MockCall, MockClient, MOCK_SENDER_SEED};

use serde_json::{json, Value};

/// A complete network config, bonding in community or normal mode.
pub fn mock_config_json(community: bool) -> Value {
    let owner = mock_address(10);
    let factory = mock_address(20);

    let bonding_mode = if community {
        json!({ "community": { "epochs_locked": 10 } })
    } else {
        json!({
            "normal": {
                "ust_bonding_reward_ratio": "0.6",
                "lp_bonding_discount": "0.05",
                "vesting_period_blocks": 100
            }
        })
    };

    json!({
        "initial_bro_balance_holder_address": mock_address(11),
        "bro_token": { "name": "Brotocol Token", "symbol": "BRO", "decimals": 6 },
        "airdrop": { "owner": owner },
        "vesting": { "owner": owner, "genesis_time": 1_650_000_000u64 },
        "bbro_minter": { "owner": owner, "whitelist": [] },
        "bbro_token": { "name": "Bonded BRO", "symbol": "bBRO", "decimals": 6 },
        "rewards_pool": { "owner": owner, "spend_limit": "1000000000", "whitelist": [] },
        "mvp_treasury": { "owner": owner },
        "ido_treasury": { "owner": owner },
        "op_reserve_treasury": { "owner": owner },
        "token_pool": { "owner": owner },
        "epoch_manager": {
            "owner": owner,
            "epoch": 100,
            "blocks_per_year": 5_256_000u64,
            "bbro_emission_rate": "0.5"
        },
        "staking": {
            "owner": owner,
            "unstake_period_blocks": 10,
            "min_staking_amount": "0",
            "min_lockup_period_epochs": 1,
            "max_lockup_period_epochs": 365,
            "base_rate": "0.0001",
            "linear_growth": "0.0005",
            "exponential_growth": "0.0000075"
        },
        "bonding": {
            "owner": owner,
            "astroport_factory": factory,
            "ust_bonding_discount": "0.05",
            "min_bro_payout": "10000",
            "bonding_mode": bonding_mode
        },
        "whitelist_sale": {
            "owner": owner,
            "bro_amount_per_uusd": "10",
            "bro_amount_per_nft": "1000000"
        },
        "distributor": {
            "owner": owner,
            "distribution_genesis_block": 1000,
            "staking_distribution_amount": "100",
            "bonding_distribution_amount": "100"
        },
        "oracle": { "owner": owner, "price_update_interval": 30, "price_validity_period": 60 },
        "bro_ust_pair": { "create_pair": true, "factory_address": factory },
        "bro_distributions": { "airdrop": "1000", "vesting": "2000", "rewards": "3000" },
        "ownership": { "expires_in_blocks": 500 }
    })
}

pub fn mock_config(community: bool) -> crate::config::Config {
    let config: crate::config::Config =
        serde_json::from_value(mock_config_json(community)).unwrap();
    config.validate().unwrap();
    config
}
