//! Configuration management commands.

use clap::Subcommand;
use rollcall_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Point at a sync agent (probed again on next run)
    SetAgent {
        /// Agent base URL, e.g. http://127.0.0.1:7878
        url: String,
    },
    /// Forget the sync agent; records wait for the next launch
    ClearAgent,
    /// Change the tag sent with sync requests
    SetTag {
        /// New sync tag
        tag: String,
    },
}

/// Run the config command.
pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let cfg = Config::load()?;
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigAction::SetAgent { url } => {
            let mut cfg = Config::load()?;
            cfg.sync.agent_url = Some(url);
            cfg.save()?;
            println!("Sync agent updated.");
        }
        ConfigAction::ClearAgent => {
            let mut cfg = Config::load()?;
            cfg.sync.agent_url = None;
            cfg.save()?;
            println!("Sync agent cleared.");
        }
        ConfigAction::SetTag { tag } => {
            let mut cfg = Config::load()?;
            cfg.sync.tag = tag;
            cfg.save()?;
            println!("Sync tag updated.");
        }
    }
    Ok(())
}
