use soroban_sdk::{contracttype, Address};

pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 518_400;
pub const SCORE_LIFETIME_THRESHOLD: u32 = 120_960;
pub const SCORE_BUMP_AMOUNT: u32 = 1_036_800;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Operator(Address),
    Score(Address),
}
