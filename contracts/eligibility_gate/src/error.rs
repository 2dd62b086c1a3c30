use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Caller does not hold the points operator role
    NotOperator = 10,
    /// Points amount must be positive
    InvalidAmount = 20,
    /// Removal would take the score below zero
    InsufficientPoints = 21,
}
