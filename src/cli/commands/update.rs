//! Update command implementation.
//!
//! Provides `cacert-refresh update`, also run when no subcommand is given.

use crate::cli::args::UpdateArgs;
use crate::cli::context::AppContext;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::updater::UpdateOptions;

use super::dispatcher::{Command, CommandResult};
use super::display::{format_timestamp, next_refresh_line, result_headline};

/// The update command implementation.
pub struct UpdateCommand {
    context: AppContext,
    args: UpdateArgs,
}

impl UpdateCommand {
    /// Create a new update command.
    pub fn new(context: AppContext, args: UpdateArgs) -> Self {
        Self { context, args }
    }

    /// Translate flags into updater overrides.
    pub fn options(&self) -> UpdateOptions {
        UpdateOptions {
            path: self.args.path.clone(),
            max_age: self.args.max_age.clone().map(Into::into),
            allowed_protocol: self.args.protocol.clone(),
            persist_options: self.args.persist,
        }
    }
}

impl Command for UpdateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut updater = self.context.updater()?;

        if !self.args.json {
            ui.message("Updating the HTTPS client certificate file...");
        }

        let result = updater.update(&self.options(), self.args.force)?;

        if self.args.json {
            let output = serde_json::to_string_pretty(&result).map_err(anyhow::Error::from)?;
            ui.data(&output);
            return Ok(CommandResult::success());
        }

        ui.success(result_headline(&result));
        ui.message(&next_refresh_line(&result));

        ui.detail("file", &result.filename().display().to_string());
        if let Some(source) = result.source() {
            ui.detail("source", source);
        }
        if let Some(previous) = result.current_date() {
            ui.detail("previous", &format_timestamp(previous));
        }

        Ok(CommandResult::success())
    }
}
