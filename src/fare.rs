use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::entities::Driver;
use crate::error::{invalid_input_error, unexpected_error, Error};

pub const BASE_FARE: u32 = 40;
pub const MIN_PASSENGERS: u32 = 1;
pub const MAX_PASSENGERS: u32 = 10;

const MIN_SURCHARGE: u32 = 5;
const MAX_SURCHARGE: u32 = 15;

/// Prices a ride and picks its driver. Randomness comes from the caller so a seeded source
/// gives repeatable results.
#[derive(Clone, Debug)]
pub struct FareRule {
    drivers: Vec<Driver>,
    surcharge: Uniform<u32>,
}

impl Default for FareRule {
    fn default() -> Self {
        Self::new(Driver::pool())
    }
}

impl FareRule {
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self {
            drivers,
            surcharge: Uniform::new_inclusive(MIN_SURCHARGE, MAX_SURCHARGE),
        }
    }

    /// `BASE_FARE + r * passengers` with `r` drawn from 5..=15 on every call.
    pub fn compute_fare<R: Rng + ?Sized>(&self, rng: &mut R, passengers: u32) -> Result<u32, Error> {
        if !(MIN_PASSENGERS..=MAX_PASSENGERS).contains(&passengers) {
            return Err(invalid_input_error());
        }

        let surcharge = self.surcharge.sample(rng);

        Ok(BASE_FARE + surcharge * passengers)
    }

    /// Uniform pick from the pool. A driver can hold any number of bookings at once.
    pub fn assign_driver<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Driver, Error> {
        self.drivers.choose(rng).cloned().ok_or_else(unexpected_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn fare_stays_within_surcharge_bounds() {
        let rule = FareRule::default();
        let mut rng = StdRng::seed_from_u64(7);

        for passengers in MIN_PASSENGERS..=MAX_PASSENGERS {
            for _ in 0..50 {
                let fare = rule.compute_fare(&mut rng, passengers).unwrap();

                assert!(fare >= BASE_FARE + 5 * passengers);
                assert!(fare <= BASE_FARE + 15 * passengers);
            }
        }
    }

    #[test]
    fn fare_is_a_multiple_of_passengers_over_base() {
        let rule = FareRule::default();
        let mut rng = StdRng::seed_from_u64(11);

        let fare = rule.compute_fare(&mut rng, 3).unwrap();
        assert_eq!((fare - BASE_FARE) % 3, 0);
    }

    #[test]
    fn seeded_source_repeats() {
        let rule = FareRule::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        for passengers in 1..=10 {
            assert_eq!(
                rule.compute_fare(&mut a, passengers).unwrap(),
                rule.compute_fare(&mut b, passengers).unwrap()
            );
            assert_eq!(
                rule.assign_driver(&mut a).unwrap(),
                rule.assign_driver(&mut b).unwrap()
            );
        }
    }

    #[test]
    fn passenger_count_out_of_range_is_rejected() {
        let rule = FareRule::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(rule.compute_fare(&mut rng, 0).unwrap_err().is_invalid_input_error());
        assert!(rule.compute_fare(&mut rng, 11).unwrap_err().is_invalid_input_error());
    }

    #[test]
    fn driver_comes_from_pool() {
        let rule = FareRule::default();
        let mut rng = StdRng::seed_from_u64(3);
        let pool = Driver::pool();

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let driver = rule.assign_driver(&mut rng).unwrap();
            assert!(pool.contains(&driver));
            seen.insert(driver.name);
        }

        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn empty_pool_is_an_error() {
        let rule = FareRule::new(vec![]);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(rule.assign_driver(&mut rng).is_err());
    }
}
