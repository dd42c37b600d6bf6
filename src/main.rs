//! Dev-Console: an interactive developer toolbox
//!
//! This is the main entry point for the application.

use anyhow::Result;
use dev_console::Console;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Diagnostics stay on stderr behind RUST_LOG; default warn so they
    // never interleave with REPL output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let console = Console::with_system_opener();
    debug!(
        "registry initialized with {} engines",
        console.registry().len()
    );

    println!("dev-console v{} (输入 exit 退出)", dev_console::VERSION);
    println!("{}", console.registry().describe_commands());
    println!();

    console.run()
}
