//! Explicit random source for fixture generation.
//!
//! Every test run owns its [`Generator`]; seed it to make a run reproducible.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{Error, Result},
    types::timestamp::Timestamp,
};

pub const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone)]
pub struct Generator {
    rng:  StdRng,
    seed: Option<u64>,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            rng:  StdRng::from_os_rng(),
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng:  StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform integer in `[low, high)`.
    pub fn number(&mut self, low: i64, high: i64) -> Result<i64> {
        if low >= high {
            return Err(Error::invalid_argument(format!(
                "the 'low' parameter ({low}) must be less than the 'high' parameter ({high})"
            )));
        }
        Ok(self.rng.random_range(low..high))
    }

    /// `length` characters drawn uniformly from [`LETTERS`].
    pub fn string(&mut self, length: usize) -> Result<String> {
        if length == 0 {
            return Err(Error::invalid_argument("length must be greater than zero"));
        }
        Ok((0..length)
            .map(|_| LETTERS[self.rng.random_range(0..LETTERS.len())] as char)
            .collect())
    }

    /// Current UTC instant at wire precision.
    pub fn utc_timestamp(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn number_stays_in_half_open_range() {
        let mut gen = Generator::seeded(7);
        for _ in 0..1000 {
            let n = gen.number(-1000, -1).unwrap();
            assert!((-1000..-1).contains(&n));
        }
        assert_eq!(gen.number(5, 6).unwrap(), 5);
    }

    #[test]
    fn number_rejects_empty_range() {
        let mut gen = Generator::seeded(7);
        assert!(matches!(gen.number(10, 10), Err(Error::InvalidArgument(_))));
        assert!(matches!(gen.number(11, 10), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn string_has_exact_length_and_only_letters() {
        let mut gen = Generator::seeded(42);
        let s = gen.string(100).unwrap();
        assert_eq!(s.len(), 100);
        assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
        assert!(matches!(gen.string(0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn same_seed_same_values() {
        let mut a = Generator::seeded(1234);
        let mut b = Generator::seeded(1234);
        assert_eq!(a.string(15).unwrap(), b.string(15).unwrap());
        assert_eq!(a.number(0, 1_000_000).unwrap(), b.number(0, 1_000_000).unwrap());
        assert_eq!(a.seed(), Some(1234));
        assert_eq!(Generator::new().seed(), None);
    }
}
