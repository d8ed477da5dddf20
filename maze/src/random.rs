//! Source of randomness for every randomized phase.
//!
//! Phases take a `&mut R` where `R: RandomSource`, so tests can feed a seeded
//! generator and obtain reproducible mazes. Any `rand` generator qualifies.

use rand::{Rng, RngCore};

pub trait RandomSource {
    /// Next float, uniform in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `0..len`. Panics if `len` is zero.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "Cannot pick from an empty range");
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// Uniform integer in `min..=max`
    fn pick_between(&mut self, min: usize, max: usize) -> usize {
        debug_assert!(min <= max);
        min + self.pick_index(max - min + 1)
    }

    /// Fair coin
    fn flip(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

impl<R> RandomSource for R
where
    R: RngCore,
{
    fn next_f64(&mut self) -> f64 {
        self.gen()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_wyrand::WyRand;

    use super::RandomSource;

    #[test]
    fn picks_stay_in_range() {
        let mut rng = WyRand::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(rng.pick_index(3) < 3);
            let v = rng.pick_between(5, 8);
            assert!((5..=8).contains(&v));
            let f = rng.next_f64();
            assert!((0. ..1.).contains(&f));
        }
    }

    #[test]
    fn single_value_range() {
        let mut rng = WyRand::seed_from_u64(0);
        assert_eq!(rng.pick_between(4, 4), 4);
        assert_eq!(rng.pick_index(1), 0);
    }

    /// Replays a fixed list of draws, cycling when it runs out
    struct Scripted {
        draws: Vec<f64>,
        next: usize,
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let draw = self.draws[self.next % self.draws.len()];
            self.next += 1;
            draw
        }
    }

    #[test]
    fn helpers_only_need_next_f64() {
        let mut source = Scripted {
            draws: vec![0., 0.99, 0.5, 0.25, 0.75],
            next: 0,
        };
        assert_eq!(source.pick_index(4), 0);
        assert_eq!(source.pick_index(4), 3);
        assert_eq!(source.pick_between(3, 6), 5);
        assert!(source.flip());
        assert!(!source.flip());
    }
}
