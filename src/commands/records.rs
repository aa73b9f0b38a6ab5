use crate::{
    db::records::Records,
    libs::{
        balance::workday_minutes_from_hours,
        clock::parse_date,
        config::Config,
        messages::Message,
        pagination::{PageCursor, PageFilter},
        record::ViewSettings,
        view::View,
    },
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

/// Date window and workday length shared by the commands that scan records.
#[derive(Debug, Clone, Args)]
pub struct WindowArgs {
    /// First day of the window (YYYY-MM-DD or "today")
    #[arg(long = "data-inicio")]
    pub data_inicio: Option<String>,
    /// Last day of the window, inclusive
    #[arg(long = "data-fim")]
    pub data_fim: Option<String>,
    /// Lookback in days when no start date is given
    #[arg(long = "dias-retroativos")]
    pub dias_retroativos: Option<i64>,
    /// Expected hours per weekday
    #[arg(long = "meta-horas-dia")]
    pub meta_horas_dia: Option<f64>,
}

impl WindowArgs {
    /// Resolves the scan filter and view settings against the configuration.
    pub fn resolve(&self, discord_id: Option<String>, config: &Config, today: NaiveDate) -> Result<(PageFilter, ViewSettings)> {
        let attendance = config.attendance();
        let start = self.data_inicio.as_deref().map(|d| parse_date(d, today)).transpose()?;
        let end = self.data_fim.as_deref().map(|d| parse_date(d, today)).transpose()?;
        let lookback = self.dias_retroativos.unwrap_or(attendance.lookback_days);

        let mut settings = config.view_settings();
        if let Some(hours) = self.meta_horas_dia {
            settings.workday_minutes = workday_minutes_from_hours(hours);
        }

        Ok((PageFilter::from_window(discord_id, start, end, lookback, today)?, settings))
    }

    /// Human-readable bounds for headers.
    pub fn describe(filter: &PageFilter, today: NaiveDate) -> (String, String) {
        let end = filter.end_date.unwrap_or(today);
        (filter.start_date.to_string(), end.to_string())
    }
}

#[derive(Debug, Args)]
pub struct RecordsArgs {
    /// Only records of this user
    #[arg(long = "discord-id")]
    discord_id: Option<String>,
    #[command(flatten)]
    window: WindowArgs,
    /// Cursor printed by the previous page
    #[arg(long = "cursor-doc")]
    cursor_doc: Option<String>,
    /// Print the page as JSON
    #[arg(long)]
    json: bool,
}

pub async fn cmd(args: RecordsArgs) -> Result<()> {
    let config = Config::read()?;
    let today = Local::now().date_naive();
    let (filter, settings) = args.window.resolve(args.discord_id, &config, today)?;
    let cursor = args.cursor_doc.as_deref().map(PageCursor::decode).transpose()?;

    let page = Records::new()?.fetch_page(&filter, cursor.as_ref(), &settings)?;

    if args.json {
        msg_print!(serde_json::to_string_pretty(&page.response())?);
        return Ok(());
    }

    let (from, to) = WindowArgs::describe(&filter, today);
    msg_print!(Message::RecordsHeader(from, to), true);
    if page.records.is_empty() {
        msg_info!(Message::NoRecordsFound);
    } else {
        View::records(&page.records)?;
    }

    match page.next_cursor {
        Some(cursor) => msg_info!(Message::NextPageCursor(cursor.encode())),
        None => msg_info!(Message::LastPage),
    }

    Ok(())
}
