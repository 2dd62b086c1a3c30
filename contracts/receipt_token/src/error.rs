use soroban_sdk::contracterror;

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
    /// Caller does not hold the mint/burn operator role
    NotOperator = 10,

    // ============================================
    // ARGUMENT ERRORS (20-29)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 20,

    // ============================================
    // BALANCE ERRORS (30-39)
    // ============================================
    /// Holder has fewer receipts than requested
    InsufficientBalance = 30,
}
