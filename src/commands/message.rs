use super::event;
use crate::{
    db::records::Records,
    libs::{config::Config, event::EventType, messages::Message},
    msg_debug, msg_info,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// Discord id of the author
    #[arg(short, long)]
    user: String,
    /// Display name of the author
    #[arg(short, long)]
    name: String,
    /// Message text
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

pub async fn cmd(args: MessageArgs) -> Result<()> {
    let text = args.text.join(" ");
    let Some(event_type) = EventType::from_message(&text) else {
        msg_info!(Message::NoEventInMessage);
        return Ok(());
    };
    msg_debug!(Message::EventDetected(event_type));

    let config = Config::read()?;
    let records = Records::new()?;
    event::record(&records, &config, &args.user, &args.name, event_type, Local::now().fixed_offset()).await?;

    Ok(())
}
