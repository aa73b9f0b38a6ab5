//! Export of mapped attendance data to CSV and JSON files.
//!
//! Two data sets can be exported:
//!
//! - **records**: one row per user and day, with the computed worked time,
//!   breaks and balance, as the `records` command shows them.
//! - **balance**: one row per user with the balance summed over the range.
//!
//! JSON output is the serialized views, pretty-printed. CSV output flattens
//! them; break intervals are reduced to their count and the justification to
//! its status and credited hours.
//!
//! ```rust,no_run
//! use ponto::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! exporter.export_records(&[])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::balance::UserBalance;
use crate::libs::duration::format_duration;
use crate::libs::record::RecordView;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportData {
    Records,
    Balance,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Without an explicit path the file is named after the current time,
    /// e.g. `ponto_export_20250922_180000.csv`.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path
            .unwrap_or_else(|| PathBuf::from(format!("ponto_export_{}.{}", Local::now().format("%Y%m%d_%H%M%S"), format.extension())));
        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn export_records(&self, records: &[RecordView]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_records_csv(records),
            ExportFormat::Json => self.write_json(&records),
        }
    }

    pub fn export_balances(&self, balances: &[UserBalance]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.export_balances_csv(balances),
            ExportFormat::Json => self.write_json(&balances),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_records_csv(&self, records: &[RecordView]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record([
            "Date",
            "Discord ID",
            "User",
            "Clock In",
            "Clock Out",
            "Worked",
            "Breaks",
            "Break Count",
            "Balance",
            "Balance (min)",
            "Justification",
            "Credited",
            "Anomaly",
        ])?;

        for record in records {
            let (status, credited) = match &record.justificativa {
                Some(j) => (j.status.to_string(), j.abono_horas.clone()),
                None => (String::new(), String::new()),
            };
            wtr.write_record([
                record.data.format("%Y-%m-%d").to_string(),
                record.discord_id.clone(),
                record.usuario.clone(),
                record.hora_entrada.clone(),
                record.hora_saida.clone(),
                record.total_horas.clone(),
                record.total_pausas.clone(),
                record.pausas.len().to_string(),
                record.banco_horas.clone(),
                record.banco_horas_min.to_string(),
                status,
                credited,
                record.anomalia.clone().unwrap_or_default(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_balances_csv(&self, balances: &[UserBalance]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["Discord ID", "User", "Days", "Worked", "Balance", "Balance (min)"])?;

        for balance in balances {
            wtr.write_record([
                balance.discord_id.clone(),
                balance.usuario.clone(),
                balance.days.to_string(),
                format_duration(balance.worked_minutes),
                balance.balance.text.clone(),
                balance.balance.minutes.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name_uses_format_extension() {
        let exporter = Exporter::new(ExportFormat::Json, None);
        let name = exporter.output_path().to_string_lossy().to_string();
        assert!(name.starts_with("ponto_export_"));
        assert!(name.ends_with(".json"));
    }
}
