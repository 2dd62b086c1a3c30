#![no_std]

//! Points registry consulted by the reward ledger before deposits into
//! gated pools. Scores are only ever mutated by addresses the admin has
//! granted the operator role.

mod error;
mod events;
mod storage;

pub use error::Error;
use events::ScoreChangedEvent;
use storage::{
    DataKey, INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, SCORE_BUMP_AMOUNT,
    SCORE_LIFETIME_THRESHOLD,
};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

#[contract]
pub struct EligibilityGate;

#[contractimpl]
impl EligibilityGate {
    /// Initialize with the admin that manages operators
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
        Ok(())
    }

    /// Grant or revoke the points operator role (Admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_operator(env: Env, operator: Address, enabled: bool) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        let key = DataKey::Operator(operator);
        if enabled {
            env.storage().instance().set(&key, &true);
        } else {
            env.storage().instance().remove(&key);
        }
        Ok(())
    }

    /// Add points to a user's score
    ///
    /// # Errors
    /// - `NotOperator`: Caller lacks the operator role
    /// - `InvalidAmount`: Amount <= 0
    pub fn add_points(env: Env, operator: Address, user: Address, amount: i128) -> Result<i128, Error> {
        Self::require_operator(&env, &operator)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let score = Self::score_of(env.clone(), user.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        Self::write_score(&env, &operator, &user, amount, score);
        Ok(score)
    }

    /// Remove points from a user's score
    ///
    /// # Errors
    /// - `NotOperator`: Caller lacks the operator role
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientPoints`: Score would go negative
    pub fn remove_points(
        env: Env,
        operator: Address,
        user: Address,
        amount: i128,
    ) -> Result<i128, Error> {
        Self::require_operator(&env, &operator)?;
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let current = Self::score_of(env.clone(), user.clone());
        if current < amount {
            return Err(Error::InsufficientPoints);
        }

        let score = current - amount;
        Self::write_score(&env, &operator, &user, -amount, score);
        Ok(score)
    }

    /// Current score of `user`
    pub fn score_of(env: Env, user: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Score(user))
            .unwrap_or(0)
    }

    /// Check if address holds the operator role
    pub fn is_operator(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operator(address))
            .unwrap_or(false)
    }

    fn require_operator(env: &Env, operator: &Address) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::NotInitialized);
        }
        operator.require_auth();

        if !Self::is_operator(env.clone(), operator.clone()) {
            return Err(Error::NotOperator);
        }
        Ok(())
    }

    fn write_score(env: &Env, operator: &Address, user: &Address, delta: i128, score: i128) {
        let key = DataKey::Score(user.clone());
        env.storage().persistent().set(&key, &score);
        env.storage()
            .persistent()
            .extend_ttl(&key, SCORE_LIFETIME_THRESHOLD, SCORE_BUMP_AMOUNT);

        env.events().publish(
            (Symbol::new(env, "score_changed"), user.clone()),
            ScoreChangedEvent {
                operator: operator.clone(),
                user: user.clone(),
                delta,
                score,
            },
        );
    }
}
