use crate::domain::password::InitialPasswordGenerator;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const DEFAULT_PASSWORD_LENGTH: usize = 8;

/// Short lowercase base-36 passwords, easy to read out to a driver.
#[derive(Debug, Clone)]
pub struct RandomPasswordGenerator {
    length: usize,
}

impl RandomPasswordGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomPasswordGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PASSWORD_LENGTH)
    }
}

impl InitialPasswordGenerator for RandomPasswordGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.gen_range(0..ALPHABET.len());
                ALPHABET.get(idx).copied().map_or('0', char::from)
            })
            .collect()
    }
}
