//! Value movement between users, ledger custody and the dev address.
//!
//! Every call checks the balance it depends on first, so an adapter failure
//! is reported as a contract error and the whole invocation rolls back.

use crate::error::Error;
use soroban_sdk::{token, vec, Address, Env, IntoVal, Symbol};

/// Pull `amount` of `asset` from `from` into ledger custody
pub fn transfer_in(env: &Env, asset: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let client = token::Client::new(env, asset);
    if client.balance(from) < amount {
        return Err(Error::InsufficientBalance);
    }
    client.transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

/// Pay `amount` of `asset` out of ledger custody
pub fn transfer_out(env: &Env, asset: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    if amount == 0 {
        return Ok(());
    }

    let custody = env.current_contract_address();
    let client = token::Client::new(env, asset);
    if client.balance(&custody) < amount {
        return Err(Error::InsufficientPoolBalance);
    }
    client.transfer(&custody, to, &amount);
    Ok(())
}

/// Mint fresh reward; the ledger is the reward asset's admin
pub fn mint_reward(env: &Env, reward_token: &Address, to: &Address, amount: i128) {
    if amount > 0 {
        token::StellarAssetClient::new(env, reward_token).mint(to, &amount);
    }
}

pub fn receipt_balance(env: &Env, receipt_token: &Address, user: &Address) -> i128 {
    env.invoke_contract::<i128>(
        receipt_token,
        &Symbol::new(env, "balance"),
        vec![env, user.to_val()],
    )
}

pub fn mint_receipt(env: &Env, receipt_token: &Address, to: &Address, amount: i128) {
    env.invoke_contract::<()>(
        receipt_token,
        &Symbol::new(env, "mint"),
        vec![
            env,
            env.current_contract_address().to_val(),
            to.to_val(),
            amount.into_val(env),
        ],
    );
}

pub fn burn_receipt(
    env: &Env,
    receipt_token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), Error> {
    if receipt_balance(env, receipt_token, from) < amount {
        return Err(Error::InsufficientBalance);
    }

    env.invoke_contract::<()>(
        receipt_token,
        &Symbol::new(env, "burn"),
        vec![
            env,
            env.current_contract_address().to_val(),
            from.to_val(),
            amount.into_val(env),
        ],
    );
    Ok(())
}

/// Score reported by the eligibility gate
pub fn score_of(env: &Env, gate: &Address, user: &Address) -> i128 {
    env.invoke_contract::<i128>(gate, &Symbol::new(env, "score_of"), vec![env, user.to_val()])
}
