//! Binary entry point that wires environment bootstrap and launches the
//! interactive Stark console session.

use anyhow::Result;

use stark::assistant;

/// Bootstraps environment variables and logging, then runs the session
/// until the user exits.
fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    assistant::run_assistant()
}
