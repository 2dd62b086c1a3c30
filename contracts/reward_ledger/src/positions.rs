use crate::access::Access;
use crate::accumulator;
use crate::error::Error;
use crate::events::{DepositEvent, EmergencyWithdrawEvent, RewardPaidEvent, WithdrawEvent};
use crate::ledger;
use crate::registry::Registry;
use crate::storage::Storage;
use crate::types::{AccessDecision, Pool, Position};
use soroban_sdk::{Address, Env, Symbol};

pub struct Positions;

impl Positions {
    /// Stake `amount` (0 harvests) into a regular pool
    pub fn deposit(env: &Env, pool_id: u32, user: &Address, amount: i128) -> Result<(), Error> {
        Access::require_not_paused(env)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        user.require_auth();

        Self::require_direct_access(env, pool_id, amount)?;
        Self::stake(env, pool_id, user, amount)
    }

    /// Unstake `amount` (0 harvests) from a regular pool
    pub fn withdraw(env: &Env, pool_id: u32, user: &Address, amount: i128) -> Result<(), Error> {
        Access::require_not_paused(env)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        user.require_auth();

        Self::require_direct_access(env, pool_id, amount)?;
        Self::unstake(env, pool_id, user, amount)
    }

    /// Return the whole stake without settling or paying rewards.
    /// Pending reward is forfeited.
    pub fn emergency_withdraw(env: &Env, pool_id: u32, user: &Address) -> Result<i128, Error> {
        user.require_auth();

        let mut pool = Storage::get_pool(env, pool_id)?;
        let position = Storage::get_position(env, pool_id, user);
        let amount = position.staked;

        pool.total_staked = pool.total_staked.saturating_sub(amount);
        Storage::set_pool(env, &pool);
        Storage::set_position(env, pool_id, user, &Position::default());
        Storage::bump_instance(env);

        if pool.reflexive && amount > 0 {
            let receipt_token = Storage::get_receipt_token(env)?;
            ledger::burn_receipt(env, &receipt_token, user, amount)?;
        }
        ledger::transfer_out(env, &pool.principal, user, amount)?;

        env.events().publish(
            (Symbol::new(env, "emergency_withdraw"), pool_id, user.clone()),
            EmergencyWithdrawEvent {
                pool_id,
                user: user.clone(),
                amount,
            },
        );

        Ok(amount)
    }

    /// Reward `user` would receive if the pool were settled now
    pub fn pending_reward(env: &Env, pool_id: u32, user: &Address) -> Result<i128, Error> {
        let emission = Storage::get_emission(env)?;
        let pool = Storage::get_pool(env, pool_id)?;
        let position = Storage::get_position(env, pool_id, user);

        let acc = accumulator::preview_acc(&pool, &emission, env.ledger().timestamp())?;
        accumulator::pending(position.staked, acc, position.reward_debt)
    }

    /// Access decision a deposit of `amount` would get right now
    pub fn check_deposit(
        env: &Env,
        pool_id: u32,
        user: &Address,
        amount: i128,
    ) -> Result<AccessDecision, Error> {
        let pool = Storage::get_pool(env, pool_id)?;
        let position = Storage::get_position(env, pool_id, user);
        Access::evaluate(env, &pool, &position, user, amount)
    }

    pub(crate) fn stake(env: &Env, pool_id: u32, user: &Address, amount: i128) -> Result<(), Error> {
        Self::with_settled_pool(env, pool_id, |pool| {
            let mut position = Storage::get_position(env, pool.id, user);
            Access::authorize(env, pool, &position, user, amount)?;

            Self::pay_pending(env, pool, &position, user)?;
            ledger::transfer_in(env, &pool.principal, user, amount)?;

            position.staked = position
                .staked
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;
            pool.total_staked = pool
                .total_staked
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;
            position.reward_debt =
                accumulator::reward_debt(position.staked, pool.acc_reward_per_share)?;
            Storage::set_position(env, pool.id, user, &position);

            env.events().publish(
                (Symbol::new(env, "deposit"), pool.id, user.clone()),
                DepositEvent {
                    pool_id: pool.id,
                    user: user.clone(),
                    amount,
                    staked: position.staked,
                },
            );
            Ok(())
        })
    }

    pub(crate) fn unstake(env: &Env, pool_id: u32, user: &Address, amount: i128) -> Result<(), Error> {
        Self::with_settled_pool(env, pool_id, |pool| {
            let mut position = Storage::get_position(env, pool.id, user);
            if amount > position.staked {
                return Err(Error::InsufficientBalance);
            }

            Self::pay_pending(env, pool, &position, user)?;

            position.staked -= amount;
            pool.total_staked = pool
                .total_staked
                .checked_sub(amount)
                .ok_or(Error::ArithmeticOverflow)?;
            ledger::transfer_out(env, &pool.principal, user, amount)?;

            position.reward_debt =
                accumulator::reward_debt(position.staked, pool.acc_reward_per_share)?;
            Storage::set_position(env, pool.id, user, &position);

            env.events().publish(
                (Symbol::new(env, "withdraw"), pool.id, user.clone()),
                WithdrawEvent {
                    pool_id: pool.id,
                    user: user.clone(),
                    amount,
                    staked: position.staked,
                },
            );
            Ok(())
        })
    }

    /// Settle the pool, run `act` against it, then persist it.
    /// Every reward-bearing mutation goes through here.
    fn with_settled_pool<R, F>(env: &Env, pool_id: u32, act: F) -> Result<R, Error>
    where
        F: FnOnce(&mut Pool) -> Result<R, Error>,
    {
        let emission = Storage::get_emission(env)?;
        let mut pool = Storage::get_pool(env, pool_id)?;

        Registry::settle_loaded(env, &mut pool, &emission)?;
        let result = act(&mut pool)?;
        Storage::set_pool(env, &pool);
        Storage::bump_instance(env);

        Ok(result)
    }

    fn pay_pending(env: &Env, pool: &Pool, position: &Position, user: &Address) -> Result<i128, Error> {
        if position.staked == 0 {
            return Ok(0);
        }

        let pending = accumulator::pending(
            position.staked,
            pool.acc_reward_per_share,
            position.reward_debt,
        )?;
        if pending > 0 {
            let reward_token = Storage::get_reward_token(env)?;
            ledger::transfer_out(env, &reward_token, user, pending)?;

            env.events().publish(
                (Symbol::new(env, "reward_paid"), pool.id, user.clone()),
                RewardPaidEvent {
                    pool_id: pool.id,
                    user: user.clone(),
                    amount: pending,
                },
            );
        }
        Ok(pending)
    }

    fn require_direct_access(env: &Env, pool_id: u32, amount: i128) -> Result<(), Error> {
        if amount != 0 && Storage::get_reflexive_pool(env) == Some(pool_id) {
            return Err(Error::ReflexivePoolDirectAccess);
        }
        Ok(())
    }
}
