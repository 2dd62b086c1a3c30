use crate::error::Error;
use crate::events::{
    AdminTransferredEvent, BlacklistSetEvent, EligibilityGateSetEvent, LifetimeCapSetEvent,
    PausedEvent,
};
use crate::ledger;
use crate::storage::Storage;
use crate::types::{AccessDecision, DenialReason, Pool, Position};
use soroban_sdk::{Address, Env, Symbol};

pub struct Access;

impl Access {
    /// Caller must authorize and be the stored admin
    pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();

        let admin = Storage::get_admin(env)?;
        if caller != &admin {
            return Err(Error::Unauthorized);
        }

        Storage::bump_instance(env);
        Ok(())
    }

    pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), Error> {
        Self::require_admin(env, caller)?;
        Storage::set_paused(env, paused);

        env.events()
            .publish((Symbol::new(env, "paused_set"),), PausedEvent { paused });
        Ok(())
    }

    pub fn transfer_admin(env: &Env, caller: &Address, new_admin: &Address) -> Result<(), Error> {
        Self::require_admin(env, caller)?;
        Storage::set_admin(env, new_admin);

        env.events().publish(
            (Symbol::new(env, "admin_transferred"), new_admin.clone()),
            AdminTransferredEvent {
                old_admin: caller.clone(),
                new_admin: new_admin.clone(),
            },
        );
        Ok(())
    }

    pub fn require_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    /// Deposit policy, checked in order and short-circuiting:
    /// blacklist, per-user cap while active, lifetime cap, gate score.
    pub fn evaluate(
        env: &Env,
        pool: &Pool,
        position: &Position,
        user: &Address,
        amount: i128,
    ) -> Result<AccessDecision, Error> {
        let state = Storage::get_access(env, user);
        if state.blacklisted {
            return Ok(AccessDecision::Denied(DenialReason::Blacklisted));
        }

        let now = env.ledger().timestamp();
        if pool.per_user_cap > 0 && now < pool.cap_expiry_time {
            let staked = position
                .staked
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;
            if staked > pool.per_user_cap {
                return Ok(AccessDecision::Denied(DenialReason::CapExceeded));
            }
        }

        if let Some(cap) = Storage::get_lifetime_cap(env) {
            let deposited = state
                .lifetime_deposited
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;
            if deposited > cap {
                return Ok(AccessDecision::Denied(DenialReason::LifetimeCapExceeded));
            }
        }

        if pool.eligibility_threshold > 0 {
            let eligible = match Storage::get_eligibility_gate(env) {
                Some(gate) => ledger::score_of(env, &gate, user) >= pool.eligibility_threshold,
                None => false,
            };
            if !eligible {
                return Ok(AccessDecision::Denied(DenialReason::NotEligible));
            }
        }

        Ok(AccessDecision::Allowed)
    }

    /// Evaluate and, when allowed, count `amount` towards the lifetime total
    pub fn authorize(
        env: &Env,
        pool: &Pool,
        position: &Position,
        user: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        if let AccessDecision::Denied(reason) = Self::evaluate(env, pool, position, user, amount)? {
            return Err(reason.into());
        }

        let mut state = Storage::get_access(env, user);
        state.lifetime_deposited = state
            .lifetime_deposited
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_access(env, user, &state);
        Ok(())
    }

    pub fn set_blacklist(
        env: &Env,
        caller: &Address,
        user: &Address,
        blacklisted: bool,
    ) -> Result<(), Error> {
        Self::require_admin(env, caller)?;

        let mut state = Storage::get_access(env, user);
        state.blacklisted = blacklisted;
        Storage::set_access(env, user, &state);

        env.events().publish(
            (Symbol::new(env, "blacklist_set"), user.clone()),
            BlacklistSetEvent {
                user: user.clone(),
                blacklisted,
            },
        );
        Ok(())
    }

    pub fn set_lifetime_cap(env: &Env, caller: &Address, cap: Option<i128>) -> Result<(), Error> {
        Self::require_admin(env, caller)?;

        if matches!(cap, Some(cap) if cap < 0) {
            return Err(Error::InvalidArgument);
        }
        Storage::set_lifetime_cap(env, cap);

        env.events().publish(
            (Symbol::new(env, "lifetime_cap_set"),),
            LifetimeCapSetEvent { cap },
        );
        Ok(())
    }

    pub fn set_eligibility_gate(
        env: &Env,
        caller: &Address,
        gate: Option<Address>,
    ) -> Result<(), Error> {
        Self::require_admin(env, caller)?;
        Storage::set_eligibility_gate(env, gate.clone());

        env.events().publish(
            (Symbol::new(env, "eligibility_gate_set"),),
            EligibilityGateSetEvent { gate },
        );
        Ok(())
    }
}
