use crate::error::Error;
use crate::types::{AccessState, DataKey, Emission, Pool, Position};
use soroban_sdk::{Address, Env};

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 518_400;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
const PERSISTENT_BUMP_AMOUNT: u32 = 1_036_800;

pub struct Storage;

impl Storage {
    pub fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    fn bump_persistent(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }

    // Config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
    }

    pub fn get_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&DataKey::Admin, admin);
    }

    pub fn get_reward_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::RewardToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_reward_token(env: &Env, reward_token: &Address) {
        env.storage()
            .instance()
            .set(&DataKey::RewardToken, reward_token);
    }

    pub fn get_dev(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Dev)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_dev(env: &Env, dev: &Address) {
        env.storage().instance().set(&DataKey::Dev, dev);
    }

    pub fn get_emission(env: &Env) -> Result<Emission, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Emission)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_emission(env: &Env, emission: &Emission) {
        env.storage().instance().set(&DataKey::Emission, emission);
    }

    pub fn get_lifetime_cap(env: &Env) -> Option<i128> {
        env.storage().instance().get(&DataKey::LifetimeCap)
    }

    pub fn set_lifetime_cap(env: &Env, cap: Option<i128>) {
        match cap {
            Some(cap) => env.storage().instance().set(&DataKey::LifetimeCap, &cap),
            None => env.storage().instance().remove(&DataKey::LifetimeCap),
        }
    }

    pub fn get_eligibility_gate(env: &Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::EligibilityGate)
    }

    pub fn set_eligibility_gate(env: &Env, gate: Option<Address>) {
        match gate {
            Some(gate) => env.storage().instance().set(&DataKey::EligibilityGate, &gate),
            None => env.storage().instance().remove(&DataKey::EligibilityGate),
        }
    }

    pub fn get_receipt_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::ReceiptToken)
            .ok_or(Error::ReflexivePoolMissing)
    }

    pub fn get_reflexive_pool(env: &Env) -> Option<u32> {
        env.storage().instance().get(&DataKey::ReflexivePool)
    }

    pub fn set_reflexive(env: &Env, pool_id: u32, receipt_token: &Address) {
        env.storage().instance().set(&DataKey::ReflexivePool, &pool_id);
        env.storage()
            .instance()
            .set(&DataKey::ReceiptToken, receipt_token);
    }

    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    // Pools
    pub fn pool_count(env: &Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::PoolCount)
            .unwrap_or(0)
    }

    pub fn set_pool_count(env: &Env, count: u32) {
        env.storage().instance().set(&DataKey::PoolCount, &count);
    }

    pub fn get_pool(env: &Env, pool_id: u32) -> Result<Pool, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Pool(pool_id))
            .ok_or(Error::PoolNotFound)
    }

    pub fn set_pool(env: &Env, pool: &Pool) {
        let key = DataKey::Pool(pool.id);
        env.storage().persistent().set(&key, pool);
        Self::bump_persistent(env, &key);
    }

    // Positions
    pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> Position {
        env.storage()
            .persistent()
            .get(&DataKey::Position(pool_id, user.clone()))
            .unwrap_or_default()
    }

    pub fn set_position(env: &Env, pool_id: u32, user: &Address, position: &Position) {
        let key = DataKey::Position(pool_id, user.clone());
        env.storage().persistent().set(&key, position);
        Self::bump_persistent(env, &key);
    }

    // Access
    pub fn get_access(env: &Env, user: &Address) -> AccessState {
        env.storage()
            .persistent()
            .get(&DataKey::Access(user.clone()))
            .unwrap_or_default()
    }

    pub fn set_access(env: &Env, user: &Address, state: &AccessState) {
        let key = DataKey::Access(user.clone());
        env.storage().persistent().set(&key, state);
        Self::bump_persistent(env, &key);
    }
}
