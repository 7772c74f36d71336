use rand::{Rng, seq::SliceRandom};

/// Randomness consumed by the optimizer.
///
/// Every [`rand::Rng`] is a source, so production code passes an entropy-seeded
/// generator and tests pass `StdRng::seed_from_u64`.
pub trait RandomSource {
    /// Uniformly permutes `order` in place.
    fn shuffle(&mut self, order: &mut [usize]);
    /// Two distinct positions in `0..len`, uniformly. `len` must be at least 2.
    fn index_pair(&mut self, len: usize) -> (usize, usize);
    /// Seed for an independent child generator.
    fn next_seed(&mut self) -> u64;
}

impl<R: Rng> RandomSource for R {
    fn shuffle(&mut self, order: &mut [usize]) {
        order.shuffle(self);
    }

    fn index_pair(&mut self, len: usize) -> (usize, usize) {
        debug_assert!(len >= 2, "index_pair needs at least two positions");
        let i = self.random_range(0..len);
        let mut j = self.random_range(0..len - 1);
        if j >= i {
            j += 1;
        }
        (i, j)
    }

    fn next_seed(&mut self) -> u64 {
        self.random()
    }
}
