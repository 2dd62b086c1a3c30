use soroban_sdk::contracterror;

use crate::types::DenialReason;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is not the admin (or not the dev for dev-only calls)
    Unauthorized = 10,

    // ============================================
    // POOL ERRORS (20-29)
    // ============================================
    /// Pool id was never registered
    PoolNotFound = 20,
    /// The reflexive pool can only be created once
    ReflexivePoolExists = 21,
    /// No reflexive pool has been created yet
    ReflexivePoolMissing = 22,
    /// Non-zero deposits/withdrawals on the reflexive pool go through enter/exit
    ReflexivePoolDirectAccess = 23,

    // ============================================
    // ARGUMENT ERRORS (30-39)
    // ============================================
    /// Amount must not be negative
    InvalidAmount = 30,
    /// Parameter outside its accepted range
    InvalidArgument = 31,

    // ============================================
    // BALANCE ERRORS (40-49)
    // ============================================
    /// Position or wallet holds less than requested
    InsufficientBalance = 40,
    /// Contract custody cannot cover the payout
    InsufficientPoolBalance = 41,

    // ============================================
    // ACCESS DENIALS (50-59)
    // ============================================
    /// User is blacklisted
    Blacklisted = 50,
    /// Deposit would exceed the pool's per-user cap
    CapExceeded = 51,
    /// Deposit would exceed the global lifetime cap
    LifetimeCapExceeded = 52,
    /// Gate score below the pool threshold
    NotEligible = 53,

    // ============================================
    // ARITHMETIC ERRORS (60-69)
    // ============================================
    ArithmeticOverflow = 60,

    // ============================================
    // OPERATIONAL ERRORS (70-79)
    // ============================================
    /// Contract is paused
    ContractPaused = 70,
}

impl From<DenialReason> for Error {
    fn from(reason: DenialReason) -> Self {
        match reason {
            DenialReason::Blacklisted => Error::Blacklisted,
            DenialReason::CapExceeded => Error::CapExceeded,
            DenialReason::LifetimeCapExceeded => Error::LifetimeCapExceeded,
            DenialReason::NotEligible => Error::NotEligible,
        }
    }
}
