//! Status command implementation.
//!
//! Reports whether the cached bundle is due for a refresh, without
//! touching the network or the file.

use chrono::Utc;

use crate::cli::args::StatusArgs;
use crate::cli::context::AppContext;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::updater::{CertificateStatus, UpdateOptions};

use super::dispatcher::{Command, CommandResult};
use super::display::{format_seconds, format_timestamp};

/// The status command implementation.
pub struct StatusCommand {
    context: AppContext,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(context: AppContext, args: StatusArgs) -> Self {
        Self { context, args }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let updater = self.context.updater()?;
        let options = UpdateOptions {
            path: self.args.path.clone(),
            max_age: self.args.max_age.clone().map(Into::into),
            ..Default::default()
        };

        let status = updater.status(&options, Utc::now())?;

        if self.args.json {
            let output = serde_json::to_string_pretty(&status).map_err(anyhow::Error::from)?;
            ui.data(&output);
        } else {
            show_status(&status, ui);
        }

        Ok(CommandResult::success())
    }
}

fn show_status(status: &CertificateStatus, ui: &mut dyn UserInterface) {
    ui.message(&format!("Certificate bundle: {}", status.filename.display()));

    match (status.current_date, status.age_seconds) {
        (Some(date), Some(age)) => ui.message(&format!(
            "  Last updated: {} ({} ago)",
            format_timestamp(date),
            format_seconds(age)
        )),
        _ => ui.message("  Last updated: never"),
    }
    ui.message(&format!("  Max age: {}", format_seconds(status.max_age)));

    if status.refresh_due {
        ui.warning("A refresh is due; run `cacert-refresh update`");
    } else {
        ui.success(&format!(
            "Fresh until {}",
            format_timestamp(status.next_refresh_at)
        ));
    }
}
