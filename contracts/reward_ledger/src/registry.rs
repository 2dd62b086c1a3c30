use crate::access::Access;
use crate::accumulator::{self, Settlement};
use crate::error::Error;
use crate::events::{
    DevSetEvent, EmissionUpdatedEvent, PoolAddedEvent, PoolLimitsSetEvent, PoolSettledEvent,
    WeightSetEvent,
};
use crate::ledger;
use crate::storage::Storage;
use crate::types::{DevSkim, Emission, Pool, PoolLimits};
use soroban_sdk::{log, Address, Env, Symbol};

pub struct Registry;

impl Registry {
    /// One-time setup of addresses and emission parameters
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: &Env,
        admin: &Address,
        reward_token: &Address,
        dev: &Address,
        reward_per_interval: i128,
        dev_skim: DevSkim,
        start_time: u64,
        end_time: Option<u64>,
    ) -> Result<(), Error> {
        if Storage::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        if reward_per_interval < 0 || matches!(end_time, Some(end) if end <= start_time) {
            return Err(Error::InvalidArgument);
        }
        accumulator::validate_skim(&dev_skim)?;

        Storage::set_initialized(env);
        Storage::set_reward_token(env, reward_token);
        Storage::set_admin(env, admin);
        Storage::set_dev(env, dev);
        Storage::set_paused(env, false);
        Storage::set_pool_count(env, 0);
        Storage::set_emission(
            env,
            &Emission {
                reward_per_interval,
                bonus_multiplier: 1,
                total_weight: 0,
                dev_skim,
                start_time,
                end_time,
            },
        );
        Storage::bump_instance(env);

        Ok(())
    }

    /// Register a pool for `principal`; the reward asset is reserved for the reflexive pool
    pub fn add_pool(
        env: &Env,
        caller: &Address,
        principal: &Address,
        weight: u32,
        limits: &PoolLimits,
        with_update: bool,
    ) -> Result<u32, Error> {
        Access::require_admin(env, caller)?;

        if principal == &Storage::get_reward_token(env)? {
            return Err(Error::InvalidArgument);
        }
        Self::create_pool(env, principal, weight, limits, false, with_update)
    }

    pub(crate) fn create_pool(
        env: &Env,
        principal: &Address,
        weight: u32,
        limits: &PoolLimits,
        reflexive: bool,
        with_update: bool,
    ) -> Result<u32, Error> {
        Self::validate_limits(limits)?;

        if with_update {
            Self::settle_all(env)?;
        }

        let mut emission = Storage::get_emission(env)?;
        emission.total_weight = emission
            .total_weight
            .checked_add(weight as u64)
            .ok_or(Error::ArithmeticOverflow)?;

        let now = env.ledger().timestamp();
        let pool_id = Storage::pool_count(env);
        let pool = Pool {
            id: pool_id,
            principal: principal.clone(),
            weight,
            acc_reward_per_share: 0,
            last_settle_time: now.max(emission.start_time),
            total_staked: 0,
            per_user_cap: limits.per_user_cap,
            cap_expiry_time: now.saturating_add(limits.cap_duration),
            eligibility_threshold: limits.eligibility_threshold,
            created_at: now,
            reflexive,
        };

        Storage::set_pool(env, &pool);
        Storage::set_pool_count(env, pool_id + 1);
        Storage::set_emission(env, &emission);

        env.events().publish(
            (Symbol::new(env, "pool_added"), pool_id),
            PoolAddedEvent {
                pool_id,
                principal: principal.clone(),
                weight,
                total_weight: emission.total_weight,
                reflexive,
            },
        );

        Ok(pool_id)
    }

    /// Change a pool's weight. Every pool is settled under the old
    /// `total_weight` before the denominator moves.
    pub fn set_weight(env: &Env, caller: &Address, pool_id: u32, weight: u32) -> Result<(), Error> {
        Access::require_admin(env, caller)?;

        Storage::get_pool(env, pool_id)?;
        Self::settle_all(env)?;

        let mut pool = Storage::get_pool(env, pool_id)?;
        let mut emission = Storage::get_emission(env)?;
        let old_weight = pool.weight;

        emission.total_weight = emission
            .total_weight
            .checked_sub(old_weight as u64)
            .and_then(|w| w.checked_add(weight as u64))
            .ok_or(Error::ArithmeticOverflow)?;
        pool.weight = weight;

        Storage::set_pool(env, &pool);
        Storage::set_emission(env, &emission);

        env.events().publish(
            (Symbol::new(env, "weight_set"), pool_id),
            WeightSetEvent {
                pool_id,
                old_weight,
                new_weight: weight,
                total_weight: emission.total_weight,
            },
        );

        Ok(())
    }

    /// Replace a pool's deposit limits; the cap window restarts from pool creation
    pub fn set_pool_limits(
        env: &Env,
        caller: &Address,
        pool_id: u32,
        limits: &PoolLimits,
    ) -> Result<(), Error> {
        Access::require_admin(env, caller)?;
        Self::validate_limits(limits)?;

        let mut pool = Storage::get_pool(env, pool_id)?;
        pool.per_user_cap = limits.per_user_cap;
        pool.cap_expiry_time = pool.created_at.saturating_add(limits.cap_duration);
        pool.eligibility_threshold = limits.eligibility_threshold;
        Storage::set_pool(env, &pool);

        env.events().publish(
            (Symbol::new(env, "pool_limits_set"), pool_id),
            PoolLimitsSetEvent {
                pool_id,
                per_user_cap: pool.per_user_cap,
                cap_expiry_time: pool.cap_expiry_time,
                eligibility_threshold: pool.eligibility_threshold,
            },
        );
        Ok(())
    }

    /// Settle every pool at the old multiplier, then switch
    pub fn set_bonus_multiplier(env: &Env, caller: &Address, multiplier: u32) -> Result<(), Error> {
        Access::require_admin(env, caller)?;

        Self::update_emission(env, |emission| emission.bonus_multiplier = multiplier)
    }

    /// Settle every pool at the old rate, then switch
    pub fn set_reward_per_interval(
        env: &Env,
        caller: &Address,
        reward_per_interval: i128,
    ) -> Result<(), Error> {
        Access::require_admin(env, caller)?;

        if reward_per_interval < 0 {
            return Err(Error::InvalidArgument);
        }
        Self::update_emission(env, |emission| emission.reward_per_interval = reward_per_interval)
    }

    pub fn set_dev_skim(env: &Env, caller: &Address, dev_skim: DevSkim) -> Result<(), Error> {
        Access::require_admin(env, caller)?;
        accumulator::validate_skim(&dev_skim)?;

        Self::update_emission(env, |emission| emission.dev_skim = dev_skim)
    }

    /// Hand the dev address over; only the current dev may do this
    pub fn set_dev(env: &Env, caller: &Address, new_dev: &Address) -> Result<(), Error> {
        caller.require_auth();

        if caller != &Storage::get_dev(env)? {
            return Err(Error::Unauthorized);
        }
        Storage::set_dev(env, new_dev);
        Storage::bump_instance(env);

        env.events().publish(
            (Symbol::new(env, "dev_set"), new_dev.clone()),
            DevSetEvent {
                old_dev: caller.clone(),
                new_dev: new_dev.clone(),
            },
        );
        Ok(())
    }

    /// Settle one pool and persist it
    pub fn settle_pool(env: &Env, pool_id: u32) -> Result<Pool, Error> {
        let emission = Storage::get_emission(env)?;
        let mut pool = Storage::get_pool(env, pool_id)?;

        Self::settle_loaded(env, &mut pool, &emission)?;
        Storage::set_pool(env, &pool);
        Storage::bump_instance(env);

        Ok(pool)
    }

    pub fn settle_all(env: &Env) -> Result<(), Error> {
        let emission = Storage::get_emission(env)?;

        for pool_id in 0..Storage::pool_count(env) {
            let mut pool = Storage::get_pool(env, pool_id)?;
            Self::settle_loaded(env, &mut pool, &emission)?;
            Storage::set_pool(env, &pool);
        }
        Storage::bump_instance(env);
        Ok(())
    }

    /// Advance the accumulator of an already-loaded pool and mint what it earned.
    /// The caller persists the pool.
    pub(crate) fn settle_loaded(
        env: &Env,
        pool: &mut Pool,
        emission: &Emission,
    ) -> Result<Settlement, Error> {
        let now = env.ledger().timestamp();
        let settlement = accumulator::settle(pool, emission, now)?;
        if settlement.is_empty() {
            return Ok(settlement);
        }

        let reward_token = Storage::get_reward_token(env)?;
        ledger::mint_reward(env, &reward_token, &Storage::get_dev(env)?, settlement.dev_reward);
        ledger::mint_reward(
            env,
            &reward_token,
            &env.current_contract_address(),
            settlement.user_reward,
        );

        log!(
            env,
            "pool settled",
            pool.id,
            settlement.pool_reward,
            pool.acc_reward_per_share
        );
        env.events().publish(
            (Symbol::new(env, "pool_settled"), pool.id),
            PoolSettledEvent {
                pool_id: pool.id,
                acc_reward_per_share: pool.acc_reward_per_share,
                dev_reward: settlement.dev_reward,
                user_reward: settlement.user_reward,
                settled_at: pool.last_settle_time,
            },
        );

        Ok(settlement)
    }

    fn update_emission<F>(env: &Env, apply: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Emission),
    {
        Self::settle_all(env)?;

        let mut emission = Storage::get_emission(env)?;
        apply(&mut emission);
        Storage::set_emission(env, &emission);

        env.events().publish(
            (Symbol::new(env, "emission_updated"),),
            EmissionUpdatedEvent {
                reward_per_interval: emission.reward_per_interval,
                bonus_multiplier: emission.bonus_multiplier,
                dev_skim: emission.dev_skim,
            },
        );
        Ok(())
    }

    fn validate_limits(limits: &PoolLimits) -> Result<(), Error> {
        if limits.per_user_cap < 0 || limits.eligibility_threshold < 0 {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }
}
