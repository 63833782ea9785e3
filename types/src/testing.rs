//! An RNG for testing purposes.

use std::env;

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

type Seed = <Pcg64Mcg as SeedableRng>::Seed; // [u8; 16]

const TEST_SEED_ENV_VAR: &str = "VELLUM_TEST_SEED";

/// A fast, seedable pseudorandom number generator for use in tests.
///
/// The seed is taken from the env var `VELLUM_TEST_SEED` if set (hex-encoded, 16 bytes), and
/// from entropy otherwise. The seed is printed on creation so a failing test run can be
/// reproduced by exporting it.
pub struct TestRng {
    seed: Seed,
    rng: Pcg64Mcg,
}

impl TestRng {
    /// Constructs a new `TestRng`.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let mut seed = Seed::default();
        match env::var(TEST_SEED_ENV_VAR) {
            Ok(seed_as_hex) => {
                base16::decode_slice(&seed_as_hex, &mut seed).unwrap_or_else(|error| {
                    panic!(
                        "can't parse '{}' as a TestRng seed: {}",
                        seed_as_hex, error
                    )
                });
            }
            Err(_) => {
                rand::thread_rng().fill(&mut seed);
            }
        }
        println!(
            "TestRng seed: {} (set {}={0} to reproduce)",
            base16::encode_lower(&seed),
            TEST_SEED_ENV_VAR
        );
        let rng = Pcg64Mcg::from_seed(seed);
        TestRng { seed, rng }
    }

    /// Constructs a new `TestRng` from the given seed.
    pub fn from_seed(seed: Seed) -> Self {
        let rng = Pcg64Mcg::from_seed(seed);
        TestRng { seed, rng }
    }

    /// Returns the seed this RNG was created with.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
