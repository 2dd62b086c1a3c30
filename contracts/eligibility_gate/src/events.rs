use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoreChangedEvent {
    pub operator: Address,
    pub user: Address,
    pub delta: i128,
    pub score: i128,
}
