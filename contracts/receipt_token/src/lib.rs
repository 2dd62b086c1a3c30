#![no_std]

//! Receipt asset for the reflexive reward pool.
//!
//! Every unit in circulation is backed 1:1 by reward tokens staked in the
//! ledger's reflexive pool. Only registered operators (the ledger contract)
//! can mint or burn; holders can move receipts freely.

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{BurnEvent, MintEvent, TransferEvent};
use storage::{
    DataKey, BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
    INSTANCE_LIFETIME_THRESHOLD,
};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

#[contract]
pub struct ReceiptToken;

#[contractimpl]
impl ReceiptToken {
    /// Initialize the token contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        Self::bump_instance(&env);

        Ok(())
    }

    /// Add an operator (the reward ledger contract)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn add_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin = Self::admin(&env)?;
        admin.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::Operators(operator), &true);
        Self::bump_instance(&env);

        Ok(())
    }

    /// Remove an operator
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn remove_operator(env: Env, operator: Address) -> Result<(), Error> {
        let admin = Self::admin(&env)?;
        admin.require_auth();

        env.storage()
            .instance()
            .remove(&DataKey::Operators(operator));

        Ok(())
    }

    /// Mint receipts to `to`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotOperator`: Caller is not a registered operator
    pub fn mint(env: Env, operator: Address, to: Address, amount: i128) -> Result<(), Error> {
        Self::require_operator(&env, &operator)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let new_balance = Self::read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        let total_supply = Self::total_supply(env.clone())
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        Self::write_balance(&env, &to, new_balance);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &total_supply);

        env.events().publish(
            (Symbol::new(&env, "mint"), to.clone()),
            MintEvent {
                operator,
                to,
                amount,
                total_supply,
            },
        );

        Ok(())
    }

    /// Burn receipts held by `from`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotOperator`: Caller is not a registered operator
    /// - `InsufficientBalance`: Not enough balance
    pub fn burn(env: Env, operator: Address, from: Address, amount: i128) -> Result<(), Error> {
        Self::require_operator(&env, &operator)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let balance = Self::read_balance(&env, &from);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let total_supply = Self::total_supply(env.clone()) - amount;

        Self::write_balance(&env, &from, balance - amount);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &total_supply);

        env.events().publish(
            (Symbol::new(&env, "burn"), from.clone()),
            BurnEvent {
                operator,
                from,
                amount,
                total_supply,
            },
        );

        Ok(())
    }

    /// Transfer receipts between holders
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientBalance`: Not enough balance
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        from.require_auth();

        let from_balance = Self::read_balance(&env, &from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let to_balance = Self::read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;

        Self::write_balance(&env, &from, from_balance - amount);
        Self::write_balance(&env, &to, to_balance);

        env.events().publish(
            (Symbol::new(&env, "transfer"), from.clone(), to.clone()),
            TransferEvent { from, to, amount },
        );

        Ok(())
    }

    /// Receipt balance of `user`
    pub fn balance(env: Env, user: Address) -> i128 {
        Self::read_balance(&env, &user)
    }

    /// Receipts in circulation
    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get::<DataKey, i128>(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    /// Check if address is an operator
    pub fn is_operator(env: Env, address: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Operators(address))
            .unwrap_or(false)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn require_operator(env: &Env, operator: &Address) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        operator.require_auth();

        if !Self::is_operator(env.clone(), operator.clone()) {
            return Err(Error::NotOperator);
        }
        Self::bump_instance(env);
        Ok(())
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    fn read_balance(env: &Env, user: &Address) -> i128 {
        env.storage()
            .persistent()
            .get::<DataKey, i128>(&DataKey::Balance(user.clone()))
            .unwrap_or(0)
    }

    fn write_balance(env: &Env, user: &Address, amount: i128) {
        let key = DataKey::Balance(user.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
            return;
        }

        env.storage().persistent().set(&key, &amount);
        env.storage()
            .persistent()
            .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    const SCALE: i128 = 10_000_000;

    fn setup(env: &Env) -> (ReceiptTokenClient<'_>, Address) {
        let contract_id = env.register(ReceiptToken, ());
        let client = ReceiptTokenClient::new(env, &contract_id);

        let admin = Address::generate(env);
        let operator = Address::generate(env);
        client.initialize(&admin);
        client.add_operator(&operator);

        (client, operator)
    }

    #[test]
    fn test_initialize() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, _) = setup(&env);
        let admin = Address::generate(&env);

        let result = client.try_initialize(&admin);
        assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
        assert_eq!(client.total_supply(), 0);
    }

    #[test]
    fn test_mint_tracks_supply() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, operator) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&operator, &user1, &(1000 * SCALE));
        client.mint(&operator, &user2, &(250 * SCALE));

        assert_eq!(client.balance(&user1), 1000 * SCALE);
        assert_eq!(client.balance(&user2), 250 * SCALE);
        assert_eq!(client.total_supply(), 1250 * SCALE);
    }

    #[test]
    fn test_only_operator_can_mint() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, operator) = setup(&env);
        let stranger = Address::generate(&env);
        let user = Address::generate(&env);

        let result = client.try_mint(&stranger, &user, &SCALE);
        assert_eq!(result, Err(Ok(Error::NotOperator)));

        client.remove_operator(&operator);
        let result = client.try_mint(&operator, &user, &SCALE);
        assert_eq!(result, Err(Ok(Error::NotOperator)));
        assert_eq!(client.total_supply(), 0);
    }

    #[test]
    fn test_burn() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, operator) = setup(&env);
        let user = Address::generate(&env);

        client.mint(&operator, &user, &(1000 * SCALE));
        client.burn(&operator, &user, &(400 * SCALE));

        assert_eq!(client.balance(&user), 600 * SCALE);
        assert_eq!(client.total_supply(), 600 * SCALE);

        let result = client.try_burn(&operator, &user, &(601 * SCALE));
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
    }

    #[test]
    fn test_transfer_keeps_supply() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, operator) = setup(&env);
        let user1 = Address::generate(&env);
        let user2 = Address::generate(&env);

        client.mint(&operator, &user1, &(1000 * SCALE));
        client.transfer(&user1, &user2, &(500 * SCALE));

        assert_eq!(client.balance(&user1), 500 * SCALE);
        assert_eq!(client.balance(&user2), 500 * SCALE);
        assert_eq!(client.total_supply(), 1000 * SCALE);

        let result = client.try_transfer(&user1, &user2, &(1500 * SCALE));
        assert_eq!(result, Err(Ok(Error::InsufficientBalance)));
    }

    #[test]
    fn test_invalid_amount() {
        let env = Env::default();
        env.mock_all_auths();

        let (client, operator) = setup(&env);
        let user = Address::generate(&env);

        assert_eq!(
            client.try_mint(&operator, &user, &0),
            Err(Ok(Error::InvalidAmount))
        );
        assert_eq!(
            client.try_burn(&operator, &user, &-1),
            Err(Ok(Error::InvalidAmount))
        );
    }

    #[test]
    fn test_error_codes_are_grouped() {
        assert_eq!(Error::AlreadyInitialized as u32, 1);
        assert_eq!(Error::NotInitialized as u32, 2);
        assert_eq!(Error::NotOperator as u32, 10);
        assert_eq!(Error::InvalidAmount as u32, 20);
        assert_eq!(Error::InsufficientBalance as u32, 30);
    }
}
