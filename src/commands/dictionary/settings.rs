use std::collections::BTreeMap;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use crate::factory::Factory;
use crate::io::PrintFlags;
use crate::types::{DictionarySettings, LANGUAGES_WITH_STOPWORDS, has_stopwords_support};

#[derive(Args)]
pub struct SettingsCmd {
    #[command(subcommand)]
    pub command: SettingsSubCmd,
}

#[derive(Subcommand)]
pub enum SettingsSubCmd {
    /// Turn standard stop words on or off per language
    Set(SetCmd),

    /// Show dictionary settings
    Get(GetCmd),
}

impl SettingsCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        match &self.command {
            SettingsSubCmd::Set(cmd) => cmd.run(f).await,
            SettingsSubCmd::Get(cmd) => cmd.run(f).await,
        }
    }
}

#[derive(Args, Default)]
pub struct SetCmd {
    /// Disable standard entries for the given languages
    #[arg(short, long = "disable-standard-entries", value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Enable standard entries for the given languages
    #[arg(short, long = "enable-standard-entries", value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Reset standard entries to their default values
    #[arg(short, long = "reset-standard-entries")]
    pub reset: bool,
}

impl SetCmd {
    pub fn validate(&self) -> Result<()> {
        if !self.reset && self.disable.is_empty() && self.enable.is_empty() {
            bail!(
                "Either --disable-standard-entries and/or --enable-standard-entries or --reset-standard-entries must be set"
            );
        }

        if self.reset && (!self.disable.is_empty() || !self.enable.is_empty()) {
            bail!(
                "You cannot reset standard entries and disable or enable standard entries at the same time"
            );
        }

        if let Some(language) = self.disable.iter().find(|l| self.enable.contains(l)) {
            bail!(
                "You cannot disable and enable standard entries for the same language: {}",
                language
            );
        }

        if let Some(language) = self
            .disable
            .iter()
            .chain(&self.enable)
            .find(|l| !has_stopwords_support(l))
        {
            let supported = LANGUAGES_WITH_STOPWORDS
                .iter()
                .map(|(code, _)| *code)
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "Language {} has no standard stop words. Supported languages: {}",
                language,
                supported
            );
        }

        Ok(())
    }

    pub fn settings(&self) -> DictionarySettings {
        if self.reset {
            return DictionarySettings::reset();
        }

        let mut stopwords = BTreeMap::new();
        for language in &self.disable {
            stopwords.insert(language.clone(), true);
        }
        for language in &self.enable {
            stopwords.insert(language.clone(), false);
        }
        DictionarySettings::with_stopwords(stopwords)
    }

    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        self.validate()?;
        let client = f.search_client()?;

        f.io.start_progress("Updating dictionary settings");
        let result = async {
            let res = client.set_dictionary_settings(&self.settings()).await?;
            client.wait_for_app_task(res.task_id).await?;
            anyhow::Ok(())
        }
        .await;
        f.io.stop_progress();
        result?;

        if f.io.is_stdout_tty() {
            let cs = f.io.color_scheme();
            writeln!(
                f.io.out(),
                "{} Dictionary settings successfully updated",
                cs.success_icon()
            )?;
        }

        Ok(())
    }
}

#[derive(Args)]
pub struct GetCmd {
    #[command(flatten)]
    pub print: PrintFlags,
}

impl GetCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.search_client()?;

        f.io.start_progress("Fetching dictionary settings");
        let res = client.get_dictionary_settings().await;
        f.io.stop_progress();

        self.print.print(&mut f.io, &res?)
    }
}
