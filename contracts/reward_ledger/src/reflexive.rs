use crate::access::Access;
use crate::error::Error;
use crate::ledger;
use crate::positions::Positions;
use crate::registry::Registry;
use crate::storage::Storage;
use crate::types::PoolLimits;
use soroban_sdk::{Address, Env};

/// The pool staking the reward asset itself. Its stake is mirrored 1:1 by
/// receipt tokens, so the receipt supply always equals `total_staked`.
pub struct Reflexive;

impl Reflexive {
    pub fn add_pool(
        env: &Env,
        caller: &Address,
        receipt_token: &Address,
        weight: u32,
        with_update: bool,
    ) -> Result<u32, Error> {
        Access::require_admin(env, caller)?;

        if Storage::get_reflexive_pool(env).is_some() {
            return Err(Error::ReflexivePoolExists);
        }

        let reward_token = Storage::get_reward_token(env)?;
        let limits = PoolLimits {
            per_user_cap: 0,
            cap_duration: 0,
            eligibility_threshold: 0,
        };
        let pool_id = Registry::create_pool(env, &reward_token, weight, &limits, true, with_update)?;
        Storage::set_reflexive(env, pool_id, receipt_token);

        Ok(pool_id)
    }

    /// Mint receipts, then stake the same amount of reward asset
    pub fn enter(env: &Env, user: &Address, amount: i128) -> Result<(), Error> {
        Access::require_not_paused(env)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        user.require_auth();

        let pool_id = Self::pool_id(env)?;
        if amount > 0 {
            let receipt_token = Storage::get_receipt_token(env)?;
            ledger::mint_receipt(env, &receipt_token, user, amount);
        }
        Positions::stake(env, pool_id, user, amount)
    }

    /// Unstake reward asset, then burn the same amount of receipts
    pub fn exit(env: &Env, user: &Address, amount: i128) -> Result<(), Error> {
        Access::require_not_paused(env)?;
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        user.require_auth();

        let pool_id = Self::pool_id(env)?;
        Positions::unstake(env, pool_id, user, amount)?;
        if amount > 0 {
            let receipt_token = Storage::get_receipt_token(env)?;
            ledger::burn_receipt(env, &receipt_token, user, amount)?;
        }
        Ok(())
    }

    fn pool_id(env: &Env) -> Result<u32, Error> {
        Storage::get_reflexive_pool(env).ok_or(Error::ReflexivePoolMissing)
    }
}
