use clap::Subcommand;
use focuspool_core::store::{reset_data, FileStore};
use focuspool_core::DataResetOptions;

#[derive(Subcommand)]
pub enum DataAction {
    /// Clear persisted data. With no flags, clears tasks, pools and the
    /// character image but keeps settings.
    Reset {
        /// Clear the task list
        #[arg(long)]
        todos: bool,
        /// Clear both time pools
        #[arg(long)]
        pools: bool,
        /// Clear the character image
        #[arg(long)]
        character: bool,
        /// Clear settings too
        #[arg(long)]
        settings: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;

    match action {
        DataAction::Reset {
            todos,
            pools,
            character,
            settings,
        } => {
            let options = if !todos && !pools && !character && !settings {
                DataResetOptions::user_data()
            } else {
                DataResetOptions {
                    todos,
                    pools,
                    character_image: character,
                    settings,
                }
            };
            let summary = reset_data(&store, options)?;
            println!("cleared {} keys", summary.cleared_keys);
        }
    }
    Ok(())
}
