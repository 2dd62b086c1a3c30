use crate::error::Error;
use crate::types::{DevSkim, Emission, Pool, ACC_SCALE};

/// Reward minted by one settlement of one pool
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settlement {
    /// Weighted share of the global emission for the elapsed window
    pub pool_reward: i128,
    /// Minted to the dev address
    pub dev_reward: i128,
    /// Minted into custody and credited to stakers through the accumulator
    pub user_reward: i128,
}

impl Settlement {
    pub fn is_empty(&self) -> bool {
        self.dev_reward == 0 && self.user_reward == 0
    }
}

/// Bring `pool.acc_reward_per_share` current as of `now`
///
/// Formula:
/// - pool_reward = elapsed × reward_per_interval × bonus_multiplier × weight / total_weight
/// - acc_reward_per_share += user_reward × ACC_SCALE / total_staked
///
/// Every division floors, so the ledger can under-distribute a fractional
/// remainder but never mints more than the emission allows.
pub fn settle(pool: &mut Pool, emission: &Emission, now: u64) -> Result<Settlement, Error> {
    let to = match emission.end_time {
        Some(end_time) => now.min(end_time),
        None => now,
    };
    if to <= pool.last_settle_time {
        return Ok(Settlement::default());
    }

    let settlement = accrue(pool, emission, to)?;
    if settlement.user_reward > 0 {
        let increment = mul_div(settlement.user_reward, ACC_SCALE, pool.total_staked)?;
        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(increment)
            .ok_or(Error::ArithmeticOverflow)?;
    }
    pool.last_settle_time = to;

    Ok(settlement)
}

/// Accumulator value `settle` would produce at `now`, without touching the pool
pub fn preview_acc(pool: &Pool, emission: &Emission, now: u64) -> Result<i128, Error> {
    let mut snapshot = pool.clone();
    settle(&mut snapshot, emission, now)?;
    Ok(snapshot.acc_reward_per_share)
}

/// Reward debt of a stake at the given accumulator
pub fn reward_debt(staked: i128, acc_reward_per_share: i128) -> Result<i128, Error> {
    mul_div(staked, acc_reward_per_share, ACC_SCALE)
}

/// Reward earned since the debt was last recorded
pub fn pending(staked: i128, acc_reward_per_share: i128, debt: i128) -> Result<i128, Error> {
    reward_debt(staked, acc_reward_per_share)?
        .checked_sub(debt)
        .ok_or(Error::ArithmeticOverflow)
}

/// Reject skims that could pay the dev more than the pool reward
pub fn validate_skim(skim: &DevSkim) -> Result<(), Error> {
    let valid = match skim {
        DevSkim::Ratio(fraction) => {
            fraction.denominator > 0
                && fraction.numerator >= 0
                && fraction.numerator <= fraction.denominator
        }
        DevSkim::Flat(per_interval) => *per_interval >= 0,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidArgument)
    }
}

fn accrue(pool: &Pool, emission: &Emission, to: u64) -> Result<Settlement, Error> {
    if pool.total_staked <= 0 || emission.total_weight == 0 {
        return Ok(Settlement::default());
    }

    let from = pool.last_settle_time.max(emission.start_time);
    if to <= from {
        return Ok(Settlement::default());
    }

    let elapsed = (to - from) as i128;
    let weight = pool.weight as i128;
    let total_weight = emission.total_weight as i128;

    let emitted = elapsed
        .checked_mul(emission.reward_per_interval)
        .and_then(|v| v.checked_mul(emission.bonus_multiplier as i128))
        .and_then(|v| v.checked_mul(weight))
        .ok_or(Error::ArithmeticOverflow)?;
    let pool_reward = emitted / total_weight;

    let (dev_reward, user_reward) = match emission.dev_skim {
        DevSkim::Ratio(fraction) => {
            let dev_reward = mul_div(pool_reward, fraction.numerator, fraction.denominator)?;
            (dev_reward, pool_reward - dev_reward)
        }
        DevSkim::Flat(per_interval) => {
            let dev_reward = elapsed
                .checked_mul(per_interval)
                .and_then(|v| v.checked_mul(weight))
                .ok_or(Error::ArithmeticOverflow)?
                / total_weight;
            (dev_reward, pool_reward)
        }
    };

    Ok(Settlement {
        pool_reward,
        dev_reward,
        user_reward,
    })
}

fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    a.checked_mul(b)
        .and_then(|v| v.checked_div(denominator))
        .ok_or(Error::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Fraction;
    use soroban_sdk::{testutils::Address as _, Address, Env};

    fn create_test_pool(env: &Env, weight: u32, total_staked: i128) -> Pool {
        Pool {
            id: 0,
            principal: Address::generate(env),
            weight,
            acc_reward_per_share: 0,
            last_settle_time: 1000,
            total_staked,
            per_user_cap: 0,
            cap_expiry_time: 0,
            eligibility_threshold: 0,
            created_at: 1000,
            reflexive: false,
        }
    }

    fn create_test_emission(reward_per_interval: i128, total_weight: u64, dev_skim: DevSkim) -> Emission {
        Emission {
            reward_per_interval,
            bonus_multiplier: 1,
            total_weight,
            dev_skim,
            start_time: 1000,
            end_time: None,
        }
    }

    fn no_skim() -> DevSkim {
        DevSkim::Ratio(Fraction {
            numerator: 0,
            denominator: 1,
        })
    }

    #[test]
    fn test_weighted_split() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 2, 100);
        let emission = create_test_emission(30, 3, no_skim());

        let settlement = settle(&mut pool, &emission, 1010).unwrap();

        // 10 × 30 × 2/3 = 200
        assert_eq!(settlement.pool_reward, 200);
        assert_eq!(settlement.user_reward, 200);
        assert_eq!(pool.acc_reward_per_share, 2 * ACC_SCALE);
        assert_eq!(pool.last_settle_time, 1010);
        assert_eq!(pending(100, pool.acc_reward_per_share, 0).unwrap(), 200);
    }

    #[test]
    fn test_ratio_skim() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 1, 50);
        let emission = create_test_emission(
            10,
            1,
            DevSkim::Ratio(Fraction {
                numerator: 1,
                denominator: 10,
            }),
        );

        let settlement = settle(&mut pool, &emission, 1010).unwrap();

        assert_eq!(settlement.pool_reward, 100);
        assert_eq!(settlement.dev_reward, 10);
        assert_eq!(settlement.user_reward, 90);
        assert_eq!(pending(50, pool.acc_reward_per_share, 0).unwrap(), 90);
    }

    #[test]
    fn test_flat_skim_is_minted_on_top() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 1, 50);
        let emission = create_test_emission(10, 2, DevSkim::Flat(4));

        let settlement = settle(&mut pool, &emission, 1010).unwrap();

        // pool: 10 × 10 × 1/2, dev: 10 × 4 × 1/2
        assert_eq!(settlement.pool_reward, 50);
        assert_eq!(settlement.dev_reward, 20);
        assert_eq!(settlement.user_reward, 50);
    }

    #[test]
    fn test_empty_pool_only_advances_time() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 1, 0);
        let emission = create_test_emission(10, 1, no_skim());

        let settlement = settle(&mut pool, &emission, 1500).unwrap();

        assert!(settlement.is_empty());
        assert_eq!(pool.acc_reward_per_share, 0);
        assert_eq!(pool.last_settle_time, 1500);
    }

    #[test]
    fn test_zero_total_weight_mints_nothing() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 0, 100);
        let emission = create_test_emission(10, 0, no_skim());

        let settlement = settle(&mut pool, &emission, 1100).unwrap();

        assert!(settlement.is_empty());
        assert_eq!(pool.last_settle_time, 1100);
    }

    #[test]
    fn test_end_time_caps_window() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 1, 10);
        let mut emission = create_test_emission(1, 1, no_skim());
        emission.end_time = Some(1005);

        let settlement = settle(&mut pool, &emission, 2000).unwrap();
        assert_eq!(settlement.pool_reward, 5);
        assert_eq!(pool.last_settle_time, 1005);

        let settlement = settle(&mut pool, &emission, 3000).unwrap();
        assert!(settlement.is_empty());
        assert_eq!(pool.last_settle_time, 1005);
    }

    #[test]
    fn test_before_start_is_noop() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 1, 10);
        let emission = create_test_emission(1, 1, no_skim());

        let settlement = settle(&mut pool, &emission, 900).unwrap();

        assert!(settlement.is_empty());
        assert_eq!(pool.last_settle_time, 1000);
    }

    #[test]
    fn test_rounding_never_over_distributes() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 1, 3);
        let emission = create_test_emission(1, 3, no_skim());

        // 1 × 1 × 1/3 floors to zero
        let settlement = settle(&mut pool, &emission, 1001).unwrap();
        assert_eq!(settlement.pool_reward, 0);

        // 100 × 1 × 1/3 = 33, spread over 3 units of stake
        let settlement = settle(&mut pool, &emission, 1101).unwrap();
        assert_eq!(settlement.pool_reward, 33);
        assert!(pending(3, pool.acc_reward_per_share, 0).unwrap() <= 33);
    }

    #[test]
    fn test_accumulator_is_monotonic() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 3, 7);
        let emission = create_test_emission(11, 5, no_skim());

        let mut previous = pool.acc_reward_per_share;
        for now in [1001u64, 1003, 1003, 1050, 1049, 1200] {
            settle(&mut pool, &emission, now).unwrap();
            assert!(pool.acc_reward_per_share >= previous);
            previous = pool.acc_reward_per_share;
        }
    }

    #[test]
    fn test_preview_matches_settle() {
        let env = Env::default();
        let mut pool = create_test_pool(&env, 2, 40);
        let emission = create_test_emission(7, 3, no_skim());

        let preview = preview_acc(&pool, &emission, 1033).unwrap();
        assert_eq!(pool.last_settle_time, 1000);

        settle(&mut pool, &emission, 1033).unwrap();
        assert_eq!(preview, pool.acc_reward_per_share);
    }

    #[test]
    fn test_validate_skim() {
        assert!(validate_skim(&no_skim()).is_ok());
        assert!(validate_skim(&DevSkim::Flat(0)).is_ok());
        assert_eq!(
            validate_skim(&DevSkim::Ratio(Fraction {
                numerator: 2,
                denominator: 1,
            })),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            validate_skim(&DevSkim::Ratio(Fraction {
                numerator: 0,
                denominator: 0,
            })),
            Err(Error::InvalidArgument)
        );
        assert_eq!(validate_skim(&DevSkim::Flat(-1)), Err(Error::InvalidArgument));
    }
}
