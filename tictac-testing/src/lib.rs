pub mod fault_injection;
pub mod scenarios;

pub use fault_injection::{FaultType, FaultyStorage};
pub use scenarios::{play_moves, standard_scenarios, GameScenario, ScenarioResult};

/// Install a test subscriber once; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
