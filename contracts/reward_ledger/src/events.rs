use crate::types::DevSkim;
use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub principal: Address,
    pub weight: u32,
    pub total_weight: u64,
    pub reflexive: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WeightSetEvent {
    pub pool_id: u32,
    pub old_weight: u32,
    pub new_weight: u32,
    pub total_weight: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolSettledEvent {
    pub pool_id: u32,
    pub acc_reward_per_share: i128,
    pub dev_reward: i128,
    pub user_reward: i128,
    pub settled_at: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct EmissionUpdatedEvent {
    pub reward_per_interval: i128,
    pub bonus_multiplier: u32,
    pub dev_skim: DevSkim,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DepositEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub staked: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct WithdrawEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub staked: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RewardPaidEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct EmergencyWithdrawEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct BlacklistSetEvent {
    pub user: Address,
    pub blacklisted: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolLimitsSetEvent {
    pub pool_id: u32,
    pub per_user_cap: i128,
    pub cap_expiry_time: u64,
    pub eligibility_threshold: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct LifetimeCapSetEvent {
    pub cap: Option<i128>,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct EligibilityGateSetEvent {
    pub gate: Option<Address>,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PausedEvent {
    pub paused: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct AdminTransferredEvent {
    pub old_admin: Address,
    pub new_admin: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DevSetEvent {
    pub old_dev: Address,
    pub new_dev: Address,
}
