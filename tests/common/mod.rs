pub mod mocks;

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Install the test tracing subscriber once per process.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}
