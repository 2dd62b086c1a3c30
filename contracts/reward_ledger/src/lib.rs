#![no_std]

//! Multi-pool reward ledger.
//!
//! Stakers deposit a principal asset into weighted pools and accrue a share
//! of a globally minted reward stream. Each pool keeps a fixed-point
//! accumulator of reward per staked unit that is brought current lazily,
//! at the start of every call that touches the pool.

mod access;
mod accumulator;
mod error;
mod events;
mod ledger;
mod positions;
mod reflexive;
mod registry;
mod storage;
mod types;


pub use error::Error;
pub use types::{
    AccessDecision, AccessState, DenialReason, DevSkim, Emission, Fraction, Pool, PoolLimits,
    Position, ACC_SCALE,
};

use access::Access;
use positions::Positions;
use reflexive::Reflexive;
use registry::Registry;
use storage::Storage;

use soroban_sdk::{contract, contractimpl, Address, Env};

#[contract]
pub struct RewardLedger;

#[contractimpl]
impl RewardLedger {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger. The ledger must be made admin of
    /// `reward_token` before any reward can be minted.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidArgument`: Negative rate, end before start, or bad skim
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        dev: Address,
        reward_per_interval: i128,
        dev_skim: DevSkim,
        start_time: u64,
        end_time: Option<u64>,
    ) -> Result<(), Error> {
        Registry::initialize(
            &env,
            &admin,
            &reward_token,
            &dev,
            reward_per_interval,
            dev_skim,
            start_time,
            end_time,
        )
    }

    /// Pause deposits, withdrawals and reflexive entry/exit.
    /// Emergency withdrawal stays open.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        Access::set_paused(&env, &caller, true)
    }

    /// Unpause contract
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is not admin
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        Access::set_paused(&env, &caller, false)
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        Access::transfer_admin(&env, &caller, &new_admin)
    }

    // ============================================
    // POOL REGISTRY
    // ============================================

    /// Register a new pool. `with_update` settles every existing pool first
    /// and should only be skipped when no pool has unsettled time.
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not admin
    /// - `InvalidArgument`: Principal is the reward asset, or negative limits
    pub fn add_pool(
        env: Env,
        caller: Address,
        principal: Address,
        weight: u32,
        limits: PoolLimits,
        with_update: bool,
    ) -> Result<u32, Error> {
        Registry::add_pool(&env, &caller, &principal, weight, &limits, with_update)
    }

    /// Create the reward-asset pool backed by `receipt_token`
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not admin
    /// - `ReflexivePoolExists`: Already created
    pub fn add_reflexive_pool(
        env: Env,
        caller: Address,
        receipt_token: Address,
        weight: u32,
        with_update: bool,
    ) -> Result<u32, Error> {
        Reflexive::add_pool(&env, &caller, &receipt_token, weight, with_update)
    }

    /// Settles every pool, then re-weights `pool_id`
    ///
    /// # Errors
    /// - `Unauthorized`: Caller is not admin
    /// - `PoolNotFound`: Unknown pool
    pub fn set_weight(env: Env, caller: Address, pool_id: u32, weight: u32) -> Result<(), Error> {
        Registry::set_weight(&env, &caller, pool_id, weight)
    }

    pub fn set_pool_limits(
        env: Env,
        caller: Address,
        pool_id: u32,
        limits: PoolLimits,
    ) -> Result<(), Error> {
        Registry::set_pool_limits(&env, &caller, pool_id, &limits)
    }

    /// Settles every pool, then applies the new multiplier
    pub fn set_bonus_multiplier(env: Env, caller: Address, multiplier: u32) -> Result<(), Error> {
        Registry::set_bonus_multiplier(&env, &caller, multiplier)
    }

    /// Settles every pool, then applies the new rate
    pub fn set_reward_per_interval(
        env: Env,
        caller: Address,
        reward_per_interval: i128,
    ) -> Result<(), Error> {
        Registry::set_reward_per_interval(&env, &caller, reward_per_interval)
    }

    pub fn set_dev_skim(env: Env, caller: Address, dev_skim: DevSkim) -> Result<(), Error> {
        Registry::set_dev_skim(&env, &caller, dev_skim)
    }

    /// Current dev hands over the dev address
    pub fn set_dev(env: Env, caller: Address, new_dev: Address) -> Result<(), Error> {
        Registry::set_dev(&env, &caller, &new_dev)
    }

    /// Bring one pool's accumulator current (permissionless)
    pub fn settle_pool(env: Env, pool_id: u32) -> Result<Pool, Error> {
        Registry::settle_pool(&env, pool_id)
    }

    /// Bring every pool current (permissionless)
    pub fn settle_all(env: Env) -> Result<(), Error> {
        Registry::settle_all(&env)
    }

    // ============================================
    // ACCESS CONTROL
    // ============================================

    pub fn set_blacklist(
        env: Env,
        caller: Address,
        user: Address,
        blacklisted: bool,
    ) -> Result<(), Error> {
        Access::set_blacklist(&env, &caller, &user, blacklisted)
    }

    /// Global cap on the sum of all deposits a user ever makes; `None` lifts it
    pub fn set_lifetime_cap(env: Env, caller: Address, cap: Option<i128>) -> Result<(), Error> {
        Access::set_lifetime_cap(&env, &caller, cap)
    }

    pub fn set_eligibility_gate(
        env: Env,
        caller: Address,
        gate: Option<Address>,
    ) -> Result<(), Error> {
        Access::set_eligibility_gate(&env, &caller, gate)
    }

    // ============================================
    // USER OPERATIONS
    // ============================================

    /// Stake into a pool, paying out pending reward first. Amount 0 harvests.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidAmount`: Negative amount
    /// - `PoolNotFound`: Unknown pool
    /// - `ReflexivePoolDirectAccess`: Non-zero amount on the reflexive pool
    /// - `Blacklisted` / `CapExceeded` / `LifetimeCapExceeded` / `NotEligible`
    /// - `InsufficientBalance`: Wallet cannot cover `amount`
    pub fn deposit(env: Env, pool_id: u32, user: Address, amount: i128) -> Result<(), Error> {
        Positions::deposit(&env, pool_id, &user, amount)
    }

    /// Unstake from a pool, paying out pending reward first
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidAmount`: Negative amount
    /// - `PoolNotFound`: Unknown pool
    /// - `ReflexivePoolDirectAccess`: Non-zero amount on the reflexive pool
    /// - `InsufficientBalance`: Amount above the staked balance
    pub fn withdraw(env: Env, pool_id: u32, user: Address, amount: i128) -> Result<(), Error> {
        Positions::withdraw(&env, pool_id, &user, amount)
    }

    /// Pay out pending reward without changing the stake
    pub fn harvest(env: Env, pool_id: u32, user: Address) -> Result<(), Error> {
        Positions::deposit(&env, pool_id, &user, 0)
    }

    /// Return the full stake and forfeit pending reward. Works while paused.
    ///
    /// # Errors
    /// - `PoolNotFound`: Unknown pool
    /// - `InsufficientBalance`: Reflexive receipts no longer held
    /// - `InsufficientPoolBalance`: Custody cannot cover the stake
    pub fn emergency_withdraw(env: Env, pool_id: u32, user: Address) -> Result<i128, Error> {
        Positions::emergency_withdraw(&env, pool_id, &user)
    }

    /// Mint receipts and stake reward asset into the reflexive pool
    ///
    /// # Errors
    /// - `ReflexivePoolMissing`: No reflexive pool yet
    /// - Everything `deposit` can return
    pub fn enter_reflexive(env: Env, user: Address, amount: i128) -> Result<(), Error> {
        Reflexive::enter(&env, &user, amount)
    }

    /// Unstake reward asset from the reflexive pool and burn receipts
    ///
    /// # Errors
    /// - `ReflexivePoolMissing`: No reflexive pool yet
    /// - `InsufficientBalance`: Not enough stake or receipts
    pub fn exit_reflexive(env: Env, user: Address, amount: i128) -> Result<(), Error> {
        Reflexive::exit(&env, &user, amount)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, Error> {
        Positions::pending_reward(&env, pool_id, &user)
    }

    /// Whether a deposit of `amount` would pass the access checks right now
    pub fn check_deposit(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
    ) -> Result<AccessDecision, Error> {
        Positions::check_deposit(&env, pool_id, &user, amount)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, Error> {
        Storage::get_pool(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        Storage::pool_count(&env)
    }

    pub fn get_position(env: Env, pool_id: u32, user: Address) -> Position {
        Storage::get_position(&env, pool_id, &user)
    }

    pub fn get_access(env: Env, user: Address) -> AccessState {
        Storage::get_access(&env, &user)
    }

    pub fn get_emission(env: Env) -> Result<Emission, Error> {
        Storage::get_emission(&env)
    }

    pub fn reflexive_pool(env: Env) -> Option<u32> {
        Storage::get_reflexive_pool(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }
}
