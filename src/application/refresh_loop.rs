// Simulated telemetry jitter applied on every refresh tick
use crate::domain::battery::Battery;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Maximum state-of-charge change per tick, in percentage points.
pub const SOC_JITTER: f64 = 2.0;
/// Maximum temperature change per tick, in degrees Celsius.
pub const TEMP_JITTER_C: f64 = 1.0;

/// Random source for telemetry perturbation. Seed it for reproducible runs.
#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
}

impl Jitter {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }

    fn sample(&mut self, amplitude: f64) -> f64 {
        self.rng.random_range(-amplitude..=amplitude)
    }

    /// Perturb every battery: SOC by up to ±2 points, temperature by up to ±1 °C.
    pub fn perturb(&mut self, batteries: &mut [Battery]) {
        for battery in batteries.iter_mut() {
            let soc_delta = self.sample(SOC_JITTER);
            battery.nudge_soc(soc_delta);
            let temp_delta = self.sample(TEMP_JITTER_C);
            battery.nudge_temp(temp_delta);
        }
    }
}
