use soroban_sdk::{contracttype, Address};

/// Fixed-point scale of `Pool::acc_reward_per_share`
pub const ACC_SCALE: i128 = 1_000_000_000_000; // 1e12

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fraction {
    pub numerator: i128,
    pub denominator: i128,
}

/// How the dev address is paid out of each settlement
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DevSkim {
    /// Share of every pool reward, taken before stakers are funded
    Ratio(Fraction),
    /// Fixed amount per second, weighted like the pool reward and minted on top of it
    Flat(i128),
}

/// Global emission parameters, shared by every pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Emission {
    /// Reward units minted per second across all pools
    pub reward_per_interval: i128,
    /// Applied to `reward_per_interval`; 0 halts emission
    pub bonus_multiplier: u32,
    /// Sum of every pool's weight
    pub total_weight: u64,
    pub dev_skim: DevSkim,
    /// No reward accrues before this timestamp
    pub start_time: u64,
    /// No reward accrues after this timestamp
    pub end_time: Option<u64>,
}

/// Deposit limits attached to a pool
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolLimits {
    /// Per-user stake ceiling, 0 disables
    pub per_user_cap: i128,
    /// Seconds after pool creation during which the cap applies
    pub cap_duration: u64,
    /// Minimum gate score required to deposit, 0 disables
    pub eligibility_threshold: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub id: u32,
    /// Asset accepted as stake
    pub principal: Address,
    pub weight: u32,
    /// Reward per staked unit since inception, scaled by ACC_SCALE
    pub acc_reward_per_share: i128,
    pub last_settle_time: u64,
    pub total_staked: i128,
    pub per_user_cap: i128,
    pub cap_expiry_time: u64,
    pub eligibility_threshold: i128,
    pub created_at: u64,
    /// Principal is the reward asset, paired with the receipt token
    pub reflexive: bool,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Position {
    pub staked: i128,
    /// `staked * acc_reward_per_share / ACC_SCALE` at the last settlement
    pub reward_debt: i128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccessState {
    pub blacklisted: bool,
    pub lifetime_deposited: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DenialReason {
    Blacklisted = 0,
    CapExceeded = 1,
    LifetimeCapExceeded = 2,
    NotEligible = 3,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessDecision {
    Allowed,
    Denied(DenialReason),
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    RewardToken,
    Dev,
    Emission,
    LifetimeCap,
    EligibilityGate,
    ReceiptToken,
    ReflexivePool,
    PoolCount,
    Pool(u32),
    Position(u32, Address), // (pool_id, user)
    Access(Address),
    Initialized,
    Paused,
}
