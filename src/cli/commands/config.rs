//! Config command implementation.
//!
//! Provides `cacert-refresh config show` and `cacert-refresh config set`.

use clap::{Args, Subcommand, ValueEnum};

use crate::cli::context::AppContext;
use crate::config::{AllowedProtocol, ConfigStore, Configuration, Protocol};
use crate::error::{CertError, Result};
use crate::ui::UserInterface;
use crate::updater::coerce_max_age;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the config command.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

/// Config subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective settings.
    Show {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Change a setting.
    Set {
        /// Setting to change.
        #[arg(value_enum)]
        key: SettingName,
        /// New value. An empty source URI disables that source.
        value: String,
    },
}

/// Settings that can be changed from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingName {
    /// Bundle path (may start with <APPLICATION>)
    Path,
    /// Maximum age in seconds
    MaxAge,
    /// Allowed protocol: https, http or any
    Protocol,
    /// HTTPS source URL
    HttpsUri,
    /// HTTP source URL
    HttpUri,
}

/// The config command implementation.
pub struct ConfigCommand {
    context: AppContext,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(context: AppContext, args: ConfigArgs) -> Self {
        Self { context, args }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = self.context.configuration()?;

        match &self.args.command {
            ConfigSubcommand::Show { json } => show_settings(&self.context, &config, *json, ui)?,
            ConfigSubcommand::Set { key, value } => {
                set_setting(&mut config, *key, value)?;
                ui.success(&format!("Saved {}", key_label(*key)));
            }
        }

        Ok(CommandResult::success())
    }
}

fn key_label(key: SettingName) -> &'static str {
    match key {
        SettingName::Path => "path",
        SettingName::MaxAge => "max-age",
        SettingName::Protocol => "protocol",
        SettingName::HttpsUri => "https-uri",
        SettingName::HttpUri => "http-uri",
    }
}

/// Validate `value` for `key` and persist it.
pub fn set_setting<S: ConfigStore>(
    config: &mut Configuration<S>,
    key: SettingName,
    value: &str,
) -> Result<()> {
    match key {
        SettingName::Path => {
            config.resolve_certificate_filename(value)?;
            config.set_certificate_path(value.trim())
        }
        SettingName::MaxAge => {
            let max_age = coerce_max_age(&value.into());
            if max_age <= 0 {
                return Err(CertError::invalid_parameter("maxAge"));
            }
            config.set_certificate_max_age(max_age)
        }
        SettingName::Protocol => {
            let protocol: AllowedProtocol = value.parse()?;
            config.set_allowed_protocol(protocol)
        }
        SettingName::HttpsUri => set_source(config, Protocol::Https, value),
        SettingName::HttpUri => set_source(config, Protocol::Http, value),
    }
}

fn set_source<S: ConfigStore>(
    config: &mut Configuration<S>,
    protocol: Protocol,
    value: &str,
) -> Result<()> {
    let value = value.trim();
    let scheme = format!("{}://", protocol);
    if !value.is_empty() && !value.to_lowercase().starts_with(&scheme) {
        return Err(CertError::invalid_parameter(format!("{}-uri", protocol)));
    }
    config.set_remote_file_uri(protocol, value)
}

fn show_settings<S: ConfigStore>(
    context: &AppContext,
    config: &Configuration<S>,
    json: bool,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let path = config.certificate_path();
    let resolved = config
        .resolve_certificate_filename(&path)
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let max_age = config.certificate_max_age().to_string();
    let protocol = config.allowed_protocol();
    let https_uri = config.remote_file_uri(Protocol::Https);
    let http_uri = config.remote_file_uri(Protocol::Http);
    let active = config
        .active_certificate_file()
        .map(|p| p.display().to_string());

    if json {
        let value = serde_json::json!({
            "settings_file": context.settings_file(),
            "application_root": config.application_root(),
            "path": path,
            "resolved_path": resolved,
            "max_age": max_age,
            "protocol": protocol,
            "https_uri": https_uri,
            "http_uri": http_uri,
            "active_certificate_file": active,
        });
        let output = serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?;
        ui.data(&output);
        return Ok(());
    }

    ui.message(&format!("# {}", context.settings_file().display()));
    ui.message(&format!("root:       {}", config.application_root().display()));
    ui.message(&format!("path:       {} ({})", path, resolved));
    ui.message(&format!("max-age:    {}", max_age));
    ui.message(&format!("protocol:   {}", protocol));
    ui.message(&format!(
        "https-uri:  {}",
        https_uri.as_deref().unwrap_or("(disabled)")
    ));
    ui.message(&format!(
        "http-uri:   {}",
        http_uri.as_deref().unwrap_or("(disabled)")
    ));
    ui.message(&format!(
        "active:     {}",
        active.as_deref().unwrap_or("(not set)")
    ));

    Ok(())
}
