pub mod airdrop;
pub mod bbro_minter;
pub mod bonding;
pub mod distributor;
pub mod epoch_manager;
pub mod oracle;
pub mod rewards;
pub mod staking;
pub mod token_pool;
pub mod treasury;
pub mod vesting;
pub mod whitelist_sale;

pub use astroport;
pub use cw20;
pub use cw20_base;
