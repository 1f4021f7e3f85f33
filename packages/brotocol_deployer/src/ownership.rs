use brotocol_protocol::{bbro_minter, rewards, staking};
use cosmwasm_std::{to_json_binary, Binary};
use serde::Deserialize;

use crate::artifact::ArtifactKey;
use crate::error::DeployError;

/// How a bootstrap contract changes hands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// `update_config { new_gov_contract }`, effective immediately.
    UpdateGov,
    /// `propose_new_owner`, then `claim_ownership` from the new owner.
    Propose,
}

impl Handoff {
    pub fn of(key: ArtifactKey) -> Self {
        match key {
            ArtifactKey::BbroMinter | ArtifactKey::RewardsPool => Handoff::UpdateGov,
            _ => Handoff::Propose,
        }
    }
}

/// Control of a contract instantiated with the deployer in charge.
#[derive(Clone, Debug, PartialEq)]
pub enum OwnershipState {
    /// The deployer still controls the contract.
    Provisional { final_owner: String },
    /// `propose_new_owner` was executed, the final owner has to claim.
    Proposed { final_owner: String },
    /// The gov contract was replaced by the final owner.
    Transferred { final_owner: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct OwnershipEntry {
    pub key: ArtifactKey,
    pub contract: String,
    pub state: OwnershipState,
}

impl OwnershipEntry {
    pub fn handoff(&self) -> Handoff {
        Handoff::of(self.key)
    }
}

/// Owner part of the staking config response.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct OwnerResponse {
    pub owner: String,
}

#[derive(Clone, Debug, Default)]
pub struct OwnershipLedger {
    entries: Vec<OwnershipEntry>,
}

impl OwnershipLedger {
    pub fn new() -> Self {
        OwnershipLedger::default()
    }

    pub fn register(&mut self, key: ArtifactKey, contract: &str, final_owner: &str) {
        self.entries.retain(|e| e.key != key);
        self.entries.push(OwnershipEntry {
            key,
            contract: contract.to_string(),
            state: OwnershipState::Provisional {
                final_owner: final_owner.to_string(),
            },
        });
    }

    /// Entries still controlled by the deployer, in registration order.
    pub fn provisional(&self) -> Vec<OwnershipEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.state, OwnershipState::Provisional { .. }))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> &[OwnershipEntry] {
        &self.entries
    }

    /// Provisional -> Proposed or Transferred, depending on the contract.
    pub fn mark_handed_off(&mut self, key: ArtifactKey) -> Result<(), DeployError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.key == key)
            .ok_or_else(|| DeployError::OwnershipNotHandedOff(vec![key.to_string()]))?;

        if let OwnershipState::Provisional { final_owner } = &entry.state {
            let final_owner = final_owner.clone();
            entry.state = match Handoff::of(key) {
                Handoff::UpdateGov => OwnershipState::Transferred { final_owner },
                Handoff::Propose => OwnershipState::Proposed { final_owner },
            };
        }
        Ok(())
    }

    pub fn ensure_handed_off(&self) -> Result<(), DeployError> {
        let pending: Vec<String> = self
            .provisional()
            .iter()
            .map(|e| e.key.to_string())
            .collect();
        if !pending.is_empty() {
            return Err(DeployError::OwnershipNotHandedOff(pending));
        }
        Ok(())
    }
}

/// Message handing `key` over to `new_owner`.
pub fn handoff_msg(
    key: ArtifactKey,
    new_owner: &str,
    expires_in_blocks: u64,
) -> Result<Binary, DeployError> {
    let new_owner = new_owner.to_string();
    let res = match key {
        ArtifactKey::BbroMinter => {
            to_json_binary(&bbro_minter::ExecuteMsg::update_gov_contract(new_owner))
        }
        ArtifactKey::RewardsPool => {
            to_json_binary(&rewards::ExecuteMsg::update_gov_contract(new_owner))
        }
        _ => to_json_binary(&staking::ExecuteMsg::ProposeNewOwner {
            new_owner,
            expires_in_blocks,
        }),
    };

    res.map_err(|source| DeployError::InvalidMessage {
        contract: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::from_json;

    #[test]
    fn handoff_lifecycle() {
        let mut ledger = OwnershipLedger::new();
        ledger.register(ArtifactKey::BbroMinter, "terra1minter", "terra1owner");
        ledger.register(ArtifactKey::Staking, "terra1staking", "terra1owner");

        match ledger.ensure_handed_off() {
            Err(DeployError::OwnershipNotHandedOff(pending)) => {
                assert_eq!(pending, vec!["bbro_minter", "staking"])
            }
            res => panic!("unexpected result: {:?}", res),
        }

        ledger.mark_handed_off(ArtifactKey::BbroMinter).unwrap();
        assert_eq!(ledger.provisional().len(), 1);
        assert_eq!(ledger.provisional()[0].contract, "terra1staking");
        assert_eq!(
            ledger.entries()[0].state,
            OwnershipState::Transferred {
                final_owner: "terra1owner".to_string()
            }
        );

        ledger.mark_handed_off(ArtifactKey::Staking).unwrap();
        ledger.ensure_handed_off().unwrap();
        assert_eq!(
            ledger.entries()[1].state,
            OwnershipState::Proposed {
                final_owner: "terra1owner".to_string()
            }
        );

        // handing off twice keeps the state
        ledger.mark_handed_off(ArtifactKey::Staking).unwrap();
        assert!(matches!(ledger.entries()[1].state, OwnershipState::Proposed { .. }));
    }

    #[test]
    fn unknown_contract_cannot_be_handed_off() {
        let mut ledger = OwnershipLedger::new();
        assert!(ledger.mark_handed_off(ArtifactKey::Staking).is_err());
    }

    #[test]
    fn handoff_kind_per_contract() {
        assert_eq!(Handoff::of(ArtifactKey::BbroMinter), Handoff::UpdateGov);
        assert_eq!(Handoff::of(ArtifactKey::RewardsPool), Handoff::UpdateGov);
        assert_eq!(Handoff::of(ArtifactKey::Staking), Handoff::Propose);
    }

    #[test]
    fn handoff_message_shape() {
        let msg = handoff_msg(ArtifactKey::RewardsPool, "terra1owner", 500).unwrap();
        assert_eq!(
            from_json::<rewards::ExecuteMsg>(&msg).unwrap(),
            rewards::ExecuteMsg::UpdateConfig {
                new_gov_contract: Some("terra1owner".to_string()),
                bro_token: None,
                spend_limit: None,
            }
        );

        let msg = handoff_msg(ArtifactKey::BbroMinter, "terra1owner", 500).unwrap();
        assert_eq!(
            from_json::<bbro_minter::ExecuteMsg>(&msg).unwrap(),
            bbro_minter::ExecuteMsg::UpdateConfig {
                new_gov_contract: Some("terra1owner".to_string()),
                bbro_token: None,
            }
        );

        let msg = handoff_msg(ArtifactKey::Staking, "terra1owner", 500).unwrap();
        assert_eq!(
            from_json::<staking::ExecuteMsg>(&msg).unwrap(),
            staking::ExecuteMsg::ProposeNewOwner {
                new_owner: "terra1owner".to_string(),
                expires_in_blocks: 500,
            }
        );
    }
}
