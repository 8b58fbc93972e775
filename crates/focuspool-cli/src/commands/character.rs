use std::path::PathBuf;

use clap::Subcommand;
use focuspool_core::character;
use focuspool_core::store::FileStore;

#[derive(Subcommand)]
pub enum CharacterAction {
    /// Set the character image from a file
    Set {
        /// Image file (png, jpg, gif or webp)
        path: PathBuf,
    },
    /// Print the stored data URL
    Show,
    /// Remove the character image
    Clear,
}

pub fn run(action: CharacterAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;

    match action {
        CharacterAction::Set { path } => {
            let url = character::set_image(&store, &path)?;
            println!("character image set ({} bytes encoded)", url.len());
        }
        CharacterAction::Show => match character::image(&store)? {
            Some(url) => println!("{url}"),
            None => println!("no character image set"),
        },
        CharacterAction::Clear => {
            character::clear(&store)?;
            println!("character image cleared");
        }
    }
    Ok(())
}
