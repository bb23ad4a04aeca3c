//! Profile command - manage the credentials stored in the config file.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use crate::config::{Profile, Region};
use crate::factory::Factory;

#[derive(Args)]
pub struct ProfileCmd {
    #[command(subcommand)]
    pub command: ProfileSubCmd,
}

#[derive(Subcommand)]
pub enum ProfileSubCmd {
    /// Add a profile
    Add(AddCmd),

    /// List profiles
    #[command(visible_alias = "l")]
    List,

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove(NameArg),

    /// Make a profile the default one
    Setdefault(NameArg),
}

/// Credentials come from the global `--application-id` and `--api-key`.
#[derive(Args)]
pub struct AddCmd {
    /// Profile name
    pub name: String,

    /// Ingestion API region
    #[arg(long, value_enum)]
    pub region: Option<Region>,

    /// Make this the default profile
    #[arg(short, long)]
    pub default: bool,
}

#[derive(Args)]
pub struct NameArg {
    /// Profile name
    pub name: String,
}

impl ProfileCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let mut config = f.config()?;
        let cs = f.io.color_scheme();

        match &self.command {
            ProfileSubCmd::Add(cmd) => {
                let overrides = f.overrides();
                let (Some(application_id), Some(api_key)) =
                    (overrides.application_id.clone(), overrides.api_key.clone())
                else {
                    bail!("--application-id and --api-key are required to add a profile");
                };

                let mut profile = Profile::new(&application_id, api_key);
                profile.region = cmd.region;
                profile.default = cmd.default;
                config.add_profile(&cmd.name, profile)?;
                f.save_config(&config)?;

                writeln!(
                    f.io.out(),
                    "{} Profile '{}' (application {}) added",
                    cs.success_icon(),
                    cmd.name,
                    application_id
                )?;
            }
            ProfileSubCmd::List => {
                let path = f.config_path()?;
                writeln!(f.io.out(), "Config: {}", path.display())?;
                writeln!(f.io.out())?;

                if config.profiles.is_empty() {
                    writeln!(f.io.out(), "No profiles configured. Run `algolia profile add`.")?;
                    return Ok(());
                }

                for (name, profile) in &config.profiles {
                    let marker = if profile.default { "*" } else { " " };
                    let key = if profile.has_api_key() { "(set)" } else { "(not set)" };
                    writeln!(
                        f.io.out(),
                        "{} {}  application_id={}  region={}  api_key={}",
                        marker,
                        cs.bold(name),
                        profile.application_id,
                        profile.region.unwrap_or_default().as_str(),
                        key
                    )?;
                }
            }
            ProfileSubCmd::Remove(cmd) => {
                let removed = config.remove_profile(&cmd.name)?;
                f.save_config(&config)?;

                writeln!(f.io.out(), "{} Profile '{}' removed", cs.success_icon(), cmd.name)?;
                if removed.default {
                    writeln!(
                        f.io.out(),
                        "No default profile left. Run `algolia profile setdefault <name>`."
                    )?;
                }
            }
            ProfileSubCmd::Setdefault(cmd) => {
                config.set_default(&cmd.name)?;
                f.save_config(&config)?;

                writeln!(
                    f.io.out(),
                    "{} Default profile set to '{}'",
                    cs.success_icon(),
                    cmd.name
                )?;
            }
        }

        Ok(())
    }
}
