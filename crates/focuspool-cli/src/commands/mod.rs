pub mod character;
pub mod config;
pub mod data;
pub mod pool;
pub mod task;
pub mod timer;

use clap::CommandFactory;

/// Generate shell completions to stdout.
pub fn completions(shell: clap_complete::Shell) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = crate::Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
