// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It is used only for initial conditions and per-trial jitter, so seeded
// runs reproduce exactly.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
    spare_normal: Option<f64>,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self {
            state: seed,
            spare_normal: None,
        }
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in [0,1) with 53 bits of precision.
    #[inline]
    pub fn next_f64_01(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    #[inline]
    pub fn gen_range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64_01()
    }

    /// Standard normal sample (Marsaglia polar method).
    ///
    /// Each accepted pair yields two samples; the second is kept for the next call.
    pub fn next_standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare_normal.take() {
            return z;
        }
        loop {
            let x = self.gen_range_f64(-1.0, 1.0);
            let y = self.gen_range_f64(-1.0, 1.0);
            let r = x * x + y * y;
            if r == 0.0 || r >= 1.0 {
                continue;
            }
            let k = (-2.0 * r.ln() / r).sqrt();
            self.spare_normal = Some(x * k);
            return y * k;
        }
    }

    #[inline]
    pub fn next_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.next_standard_normal()
    }
}
