use crate::{
    api::{EventPayload, PontoApi},
    db::records::Records,
    libs::{
        clock::parse_moment,
        config::Config,
        event::EventType,
        messages::Message,
        record::AttendanceRecord,
    },
    msg_debug, msg_error_anyhow, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local};
use clap::Args;

#[derive(Debug, Args)]
pub struct EventArgs {
    #[arg(value_enum)]
    event_type: EventType,
    /// Discord id of the employee
    #[arg(short, long)]
    user: String,
    /// Display name of the employee
    #[arg(short, long)]
    name: String,
    /// Moment of the event: HH:MM today or an RFC 3339 timestamp
    #[arg(long)]
    at: Option<String>,
}

pub async fn cmd(args: EventArgs) -> Result<()> {
    let now = Local::now().fixed_offset();
    let at = match args.at.as_deref() {
        Some(text) => parse_moment(text, now)?,
        None => now,
    };

    let config = Config::read()?;
    let records = Records::new()?;
    record(&records, &config, &args.user, &args.name, args.event_type, at).await?;

    Ok(())
}

/// Applies an event to the stored day record and mirrors it to the server.
///
/// Rule violations (a second break, clock-out without clock-in, ...) are
/// returned as errors and nothing is written.
pub async fn record(
    records: &Records,
    config: &Config,
    discord_id: &str,
    usuario: &str,
    event: EventType,
    at: DateTime<FixedOffset>,
) -> Result<AttendanceRecord> {
    let policy = config.attendance().timezone_policy();
    let existing = records.fetch(discord_id, at.date_naive())?;

    let record = AttendanceRecord::apply_event(existing, usuario, discord_id, event, at, &policy)
        .map_err(|e| msg_error_anyhow!(Message::EventRejected(event, e.to_string())))?;
    records.upsert(&record)?;

    match event {
        EventType::Entrada => msg_success!(Message::ClockInRecorded(record.usuario.clone(), policy.display(record.entrada.as_deref()))),
        EventType::Saida => msg_success!(Message::ClockOutRecorded(
            record.usuario.clone(),
            policy.display(record.saida.as_deref()),
            record.total_horas.clone()
        )),
        EventType::PausaInicio => msg_success!(Message::BreakStarted(record.usuario.clone(), at.format("%H:%M").to_string())),
        EventType::PausaFim => msg_success!(Message::BreakEnded(record.usuario.clone(), record.total_pausas.clone())),
    }

    sync_remote(config, &EventPayload::new(discord_id, usuario, event, at)).await;

    Ok(record)
}

/// Sends the event to the configured server. Failures are reported, not returned.
async fn sync_remote(config: &Config, payload: &EventPayload) {
    let Some(server) = &config.server else {
        return;
    };

    let api = match PontoApi::new(server) {
        Ok(api) => api,
        Err(e) => {
            msg_warning!(Message::RemoteEventFailed(e.to_string()));
            return;
        }
    };

    match api.send_event(payload).await {
        Ok(status) if status.is_success() => msg_debug!(Message::RemoteEventSent(api.events_url())),
        Ok(status) => msg_warning!(Message::RemoteEventRejected(status.as_u16())),
        Err(e) => msg_warning!(Message::RemoteEventFailed(e.to_string())),
    }
}
