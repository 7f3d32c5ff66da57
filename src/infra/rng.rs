use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::RandomSource;

/// RNG на `thread_rng` — для локального запуска.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn gen_index(&mut self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же перемешивания при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Тот же генератор, но с seed из энтропии ОС. Так делает сервер без seed в конфиге.
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn gen_index(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}
