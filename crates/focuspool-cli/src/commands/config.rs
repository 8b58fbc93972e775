use clap::Subcommand;
use focuspool_core::store::FileStore;
use focuspool_core::Settings;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting value
    Get {
        /// Setting key (workTime, breakTime, soundEnabled, autoStart)
        key: String,
    },
    /// Set a setting value
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    let mut settings = Settings::load(&store)?;

    match action {
        ConfigAction::Get { key } => {
            let value = match key.as_str() {
                "workTime" => settings.work_secs.to_string(),
                "breakTime" => settings.break_secs.to_string(),
                "soundEnabled" => settings.sound_enabled.to_string(),
                "autoStart" => settings.auto_start.to_string(),
                _ => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            };
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            match key.as_str() {
                "workTime" => settings.work_secs = parse_secs(&key, &value)?,
                "breakTime" => settings.break_secs = parse_secs(&key, &value)?,
                "soundEnabled" => settings.sound_enabled = parse_bool(&key, &value)?,
                "autoStart" => settings.auto_start = parse_bool(&key, &value)?,
                _ => return Err(format!("unknown key: {key}").into()),
            }
            settings.save(&store)?;
            println!("ok");
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Reset => {
            Settings::default().save(&store)?;
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

fn parse_secs(key: &str, value: &str) -> Result<u64, Box<dyn std::error::Error>> {
    value
        .parse::<u64>()
        .map_err(|_| format!("cannot parse '{value}' as seconds for {key}").into())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, Box<dyn std::error::Error>> {
    value
        .parse::<bool>()
        .map_err(|_| format!("cannot parse '{value}' as boolean for {key}").into())
}
