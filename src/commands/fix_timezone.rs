use crate::{
    db::records::Records,
    libs::{
        clock::{parse_date, TimezoneMode},
        config::Config,
        messages::Message,
    },
    msg_info, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct FixTimezoneArgs {
    /// First day to correct (YYYY-MM-DD)
    #[arg(long)]
    from: String,
    /// Last day to correct, inclusive
    #[arg(long)]
    to: String,
    /// Only records of this user
    #[arg(long)]
    user: Option<String>,
    /// Offset in hours; the configured one when omitted
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,
    /// Skip the confirmation
    #[arg(long)]
    force: bool,
}

pub async fn cmd(args: FixTimezoneArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let from = parse_date(&args.from, today)?;
    let to = parse_date(&args.to, today)?;

    let config = Config::read()?;
    let attendance = config.attendance();
    let policy = attendance.timezone_policy();
    let offset = args.offset.unwrap_or(attendance.timezone_offset_hours);

    if attendance.timezone_mode == TimezoneMode::OnRead {
        msg_warning!(Message::TimezoneFixModeWarning(attendance.timezone_mode));
    }

    let records = Records::new()?;
    let mut changed = Vec::new();
    for mut record in records.fetch_range(args.user.as_deref(), from, to)? {
        if record.shift_clock(offset, &policy) {
            changed.push(record);
        }
    }

    if changed.is_empty() {
        msg_info!(Message::TimezoneFixNothingToDo);
        return Ok(());
    }

    msg_info!(Message::TimezoneFixPreview(changed.len(), offset));
    if !args.force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmTimezoneFix.to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::TimezoneFixCancelled);
            return Ok(());
        }
    }

    for record in &changed {
        records.upsert(record)?;
    }
    msg_success!(Message::TimezoneFixApplied(changed.len()));

    Ok(())
}
