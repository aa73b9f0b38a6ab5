use super::records::WindowArgs;
use crate::{
    db::records::Records,
    libs::{balance::UserBalance, config::Config, messages::Message, pagination::walk_all, view::View},
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::collections::HashMap;

#[derive(Debug, Args)]
pub struct BalanceArgs {
    /// Discord ids to include; all known users when omitted
    #[arg(long, num_args = 1..)]
    users: Vec<String>,
    #[command(flatten)]
    window: WindowArgs,
    /// Print the balances as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(args: BalanceArgs) -> Result<()> {
    let config = Config::read()?;
    let today = Local::now().date_naive();

    let known: HashMap<String, String> = Records::new()?.users()?.into_iter().collect();
    let users: Vec<(String, String)> = if args.users.is_empty() {
        known.into_iter().collect()
    } else {
        args.users
            .into_iter()
            .map(|id| {
                let name = known.get(&id).cloned().unwrap_or_else(|| id.clone());
                (id, name)
            })
            .collect()
    };

    if users.is_empty() {
        msg_info!(Message::NoUsersFound);
        return Ok(());
    }

    // One scan per user, each on its own connection
    let mut handles = Vec::with_capacity(users.len());
    for (discord_id, usuario) in users {
        let (filter, settings) = args.window.resolve(Some(discord_id.clone()), &config, today)?;
        let label = format!("{} ({})", usuario, discord_id);
        let handle = tokio::task::spawn_blocking(move || -> Result<UserBalance> {
            let records = Records::new()?;
            let views = walk_all(&records, &filter, &settings)?;
            Ok(UserBalance::from_views(&discord_id, &usuario, &views))
        });
        handles.push((label, handle));
    }

    let mut balances = Vec::with_capacity(handles.len());
    for (label, handle) in handles {
        let balance = handle.await?.map_err(|e| msg_error_anyhow!(Message::BalanceUserFailed(label, e.to_string())))?;
        balances.push(balance);
    }
    balances.sort_by(|a, b| a.usuario.cmp(&b.usuario).then_with(|| a.discord_id.cmp(&b.discord_id)));

    if args.json {
        msg_print!(serde_json::to_string_pretty(&balances)?);
        return Ok(());
    }

    let (filter, _) = args.window.resolve(None, &config, today)?;
    let (from, to) = WindowArgs::describe(&filter, today);
    msg_print!(Message::BalanceHeader(from, to), true);
    View::balances(&balances)?;

    Ok(())
}
