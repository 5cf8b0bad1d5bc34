//! Stateless seed mixing shared by map generation, the opponent policy, and rematch seeding.

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

pub(crate) fn random_usize(seed: u64, stream: u64, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = max_value - min_value + 1;
    min_value + (mix_seed_stream(seed, stream) as usize % range_size)
}

pub(crate) fn random_i32(seed: u64, stream: u64, min_value: i32, max_value: i32) -> i32 {
    debug_assert!(min_value <= max_value);
    let range_size = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
    min_value + (mix_seed_stream(seed, stream) % range_size) as i32
}

/// Uniform value in `[0, 1)` from the top 53 bits of a mixed stream.
pub(crate) fn unit_interval(seed: u64, stream: u64) -> f64 {
    (mix_seed_stream(seed, stream) >> 11) as f64 / (1_u64 << 53) as f64
}

pub(crate) fn derive_rematch_seed(match_seed: u64) -> u64 {
    let mut mixed = match_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= mixed >> 30;
    mixed = mixed.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= mixed >> 27;
    mixed = mixed.wrapping_mul(0x94D0_49BB_1331_11EB);
    mixed ^ (mixed >> 31)
}

/// Sequential draws over one seed, each on its own stream.
pub(crate) struct SeedStreams {
    seed: u64,
    next_stream: u64,
}

impl SeedStreams {
    pub(crate) fn new(seed: u64) -> Self {
        Self { seed, next_stream: 0 }
    }

    fn advance(&mut self) -> u64 {
        let stream = self.next_stream;
        self.next_stream += 1;
        stream
    }

    pub(crate) fn usize_in(&mut self, (min_value, max_value): (usize, usize)) -> usize {
        let stream = self.advance();
        random_usize(self.seed, stream, min_value, max_value.max(min_value))
    }

    pub(crate) fn i32_in(&mut self, min_value: i32, max_value: i32) -> i32 {
        let stream = self.advance();
        random_i32(self.seed, stream, min_value, max_value.max(min_value))
    }

    pub(crate) fn chance(&mut self, probability: f64) -> bool {
        let stream = self.advance();
        unit_interval(self.seed, stream) < probability
    }
}
