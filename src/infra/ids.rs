use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::domain::{GameId, GAME_ID_BYTES};

/// Генерация id игр в формате object id:
/// 4 байта — секунды unix (big-endian),
/// 5 байт — случайное значение на процесс,
/// 3 байта — счётчик (big-endian, по модулю 2^24).
///
/// Уникальность внутри процесса даёт счётчик, между процессами — случайная часть.
#[derive(Debug)]
pub struct IdGenerator {
    process_unique: [u8; 5],
    counter: AtomicU32,
}

impl IdGenerator {
    /// Генератор со случайной солью процесса и случайным стартом счётчика.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            process_unique: rng.gen(),
            counter: AtomicU32::new(rng.gen_range(0..0x00ff_ffff)),
        }
    }

    /// Детерминированный генератор (для тестов).
    pub fn with_parts(process_unique: [u8; 5], counter_start: u32) -> Self {
        Self {
            process_unique,
            counter: AtomicU32::new(counter_start),
        }
    }

    #[inline]
    pub fn next_game_id(&self) -> GameId {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        self.game_id_at(secs)
    }

    /// Id с заданной меткой времени.
    pub fn game_id_at(&self, unix_secs: u32) -> GameId {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; GAME_ID_BYTES];
        bytes[..4].copy_from_slice(&unix_secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_unique);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
        GameId::from_bytes(bytes)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
