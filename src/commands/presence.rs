use super::event;
use crate::{
    db::records::Records,
    libs::{
        config::Config,
        event::EventType,
        messages::Message,
        presence::{decide_action, PresenceAction, PresenceStatus},
    },
    msg_info,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct PresenceArgs {
    /// Discord id of the employee
    #[arg(short, long)]
    user: String,
    /// Display name of the employee
    #[arg(short, long)]
    name: String,
    /// Previous status
    #[arg(long, value_enum)]
    from: PresenceStatus,
    /// New status
    #[arg(long, value_enum)]
    to: PresenceStatus,
}

pub async fn cmd(args: PresenceArgs) -> Result<()> {
    let now = Local::now().fixed_offset();
    let config = Config::read()?;
    let records = Records::new()?;

    // Only a day in progress can take or end breaks
    let today = records
        .fetch(&args.user, now.date_naive())?
        .filter(|r| r.entrada.is_some() && r.saida.is_none());
    let has_open_break = today.as_ref().is_some_and(|r| r.has_open_break());

    let event_type = match decide_action(args.from, args.to, has_open_break) {
        PresenceAction::StartBreak => EventType::PausaInicio,
        PresenceAction::EndBreak => EventType::PausaFim,
        PresenceAction::None => {
            msg_info!(Message::PresenceNoAction(args.from, args.to));
            return Ok(());
        }
    };

    if today.is_none() {
        msg_info!(Message::PresenceWithoutRecord(args.name));
        return Ok(());
    }

    event::record(&records, &config, &args.user, &args.name, event_type, now).await?;
    Ok(())
}
