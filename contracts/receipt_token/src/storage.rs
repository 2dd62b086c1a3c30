use soroban_sdk::{contracttype, Address};

pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 518_400;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = 120_960;
pub const BALANCE_BUMP_AMOUNT: u32 = 1_036_800;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Operators(Address),
    Balance(Address),
    TotalSupply,
    Initialized,
}
