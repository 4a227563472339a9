use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tracing::info;

use crate::metrics::{SAMPLE_CPU_USAGE, SAMPLE_MEMORY_USAGE};

const TICK_INTERVAL: Duration = Duration::from_secs(15);

/// Drives the synthetic resource gauges of the sample workload. Runs as an
/// independent task and shares no locks with the remediation path.
pub struct LoadSimulator {
    high_load: bool,
}

impl LoadSimulator {
    pub fn new(high_load: bool) -> Self {
        Self { high_load }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(TICK_INTERVAL);
            loop {
                ticker.tick().await;
                self.tick();
            }
        })
    }

    fn tick(&self) {
        if self.high_load {
            SAMPLE_MEMORY_USAGE.set(90);
            SAMPLE_CPU_USAGE.set(90);
            info!("Simulating high resource usage...");
        } else {
            let mut rng = rand::thread_rng();
            let memory = rng.gen_range(30..=70);
            let cpu = rng.gen_range(10..=50);
            SAMPLE_MEMORY_USAGE.set(memory);
            SAMPLE_CPU_USAGE.set(cpu);
            info!("Normal operation - Memory: {}%, CPU: {}%", memory, cpu);
        }
    }
}
