use super::records::WindowArgs;
use crate::{
    db::records::Records,
    libs::{
        balance::UserBalance,
        config::Config,
        export::{ExportData, ExportFormat, Exporter},
        messages::Message,
        pagination::walk_all,
        record::RecordView,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_enum, default_value = "records")]
    data: ExportData,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only records of this user
    #[arg(long = "discord-id")]
    discord_id: Option<String>,

    #[command(flatten)]
    window: WindowArgs,
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let today = Local::now().date_naive();
    let (filter, settings) = args.window.resolve(args.discord_id, &config, today)?;

    let (from, to) = WindowArgs::describe(&filter, today);
    msg_info!(Message::ExportingRecords(from, to));

    let views = walk_all(&Records::new()?, &filter, &settings)?;
    if views.is_empty() {
        msg_info!(Message::NoDataToExport);
        return Ok(());
    }

    let exporter = Exporter::new(args.format, args.output);
    match args.data {
        ExportData::Records => exporter.export_records(&views)?,
        ExportData::Balance => exporter.export_balances(&group_by_user(&views))?,
    }

    msg_success!(Message::ExportCompleted(exporter.output_path().display().to_string()));
    Ok(())
}

/// Per-user totals, ordered by discord id.
fn group_by_user(views: &[RecordView]) -> Vec<UserBalance> {
    let mut by_user: BTreeMap<&str, Vec<RecordView>> = BTreeMap::new();
    for view in views {
        by_user.entry(view.discord_id.as_str()).or_default().push(view.clone());
    }

    by_user
        .into_iter()
        .map(|(discord_id, days)| {
            // Views arrive newest first; the newest name wins
            let usuario = days.first().map(|v| v.usuario.clone()).unwrap_or_default();
            UserBalance::from_views(discord_id, &usuario, &days)
        })
        .collect()
}
