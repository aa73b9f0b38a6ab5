use crate::{
    db::records::Records,
    libs::{
        clock::parse_date,
        config::Config,
        justification::{Justification, JustificationStatus},
        messages::Message,
        record::AttendanceRecord,
    },
    msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct JustifyArgs {
    /// Discord id of the employee
    #[arg(short, long)]
    user: String,
    /// Display name, used when the day has no record yet
    #[arg(short, long)]
    name: Option<String>,
    /// Day being justified (YYYY-MM-DD or "today")
    #[arg(short, long, default_value = "today")]
    date: String,
    #[arg(short, long, value_enum, default_value_t = JustificationStatus::Pending)]
    status: JustificationStatus,
    /// Hours credited when approved, e.g. "2h 30m"
    #[arg(short, long, default_value = "0h 0m")]
    abono: String,
    /// Break total that replaces the measured breaks when approved, e.g. "1h 0m"
    #[arg(long)]
    manual_break: Option<String>,
    /// Reason given by the employee
    #[arg(long)]
    motivo: Option<String>,
    /// Reviewer note
    #[arg(long)]
    obs: Option<String>,
}

pub async fn cmd(args: JustifyArgs) -> Result<()> {
    let date = parse_date(&args.date, Local::now().date_naive())?;
    let config = Config::read()?;
    let policy = config.attendance().timezone_policy();
    let records = Records::new()?;

    // A justification may cover a day without any clock event
    let mut record = match records.fetch(&args.user, date)? {
        Some(record) => record,
        None => AttendanceRecord::new(args.name.as_deref().unwrap_or(&args.user), &args.user, date),
    };

    let mut justification = Justification::new(args.status, &args.abono);
    justification.manual_break = args.manual_break;
    justification.motivo = args.motivo;
    justification.observacao_admin = args.obs;

    record.set_justification(justification, &policy);
    records.upsert(&record)?;

    msg_success!(Message::JustificationSaved(record.usuario.clone(), date.to_string(), args.status));
    Ok(())
}
