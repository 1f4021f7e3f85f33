use std::env::current_dir;
use std::fs::create_dir_all;
use std::path::PathBuf;

use brotocol_protocol::{
    airdrop, bbro_minter, bonding, distributor, epoch_manager, oracle, rewards, staking,
    token_pool, treasury, vesting, whitelist_sale,
};
use cosmwasm_schema::{export_schema, remove_schemas, schema_for};

fn out_dir(contract: &str) -> PathBuf {
    let mut out_dir = current_dir().unwrap();
    out_dir.push("schema");
    out_dir.push(contract);
    create_dir_all(&out_dir).unwrap();
    remove_schemas(&out_dir).unwrap();
    out_dir
}

fn main() {
    let dir = out_dir("bbro_minter");
    export_schema(&schema_for!(bbro_minter::InstantiateMsg), &dir);
    export_schema(&schema_for!(bbro_minter::ExecuteMsg), &dir);
    export_schema(&schema_for!(bbro_minter::QueryMsg), &dir);
    export_schema(&schema_for!(bbro_minter::ConfigResponse), &dir);

    let dir = out_dir("rewards");
    export_schema(&schema_for!(rewards::InstantiateMsg), &dir);
    export_schema(&schema_for!(rewards::ExecuteMsg), &dir);
    export_schema(&schema_for!(rewards::QueryMsg), &dir);
    export_schema(&schema_for!(rewards::ConfigResponse), &dir);

    let dir = out_dir("staking");
    export_schema(&schema_for!(staking::InstantiateMsg), &dir);
    export_schema(&schema_for!(staking::ExecuteMsg), &dir);
    export_schema(&schema_for!(staking::QueryMsg), &dir);

    export_schema(&schema_for!(airdrop::InstantiateMsg), &out_dir("airdrop"));
    export_schema(&schema_for!(vesting::InstantiateMsg), &out_dir("vesting"));
    export_schema(&schema_for!(treasury::InstantiateMsg), &out_dir("treasury"));
    export_schema(&schema_for!(token_pool::InstantiateMsg), &out_dir("token_pool"));
    export_schema(&schema_for!(epoch_manager::InstantiateMsg), &out_dir("epoch_manager"));
    export_schema(&schema_for!(bonding::InstantiateMsg), &out_dir("bonding"));
    export_schema(&schema_for!(whitelist_sale::InstantiateMsg), &out_dir("whitelist_sale"));
    export_schema(&schema_for!(distributor::InstantiateMsg), &out_dir("distributor"));
    export_schema(&schema_for!(oracle::InstantiateMsg), &out_dir("oracle"));
}
