use super::balance::UserBalance;
use super::duration::format_duration;
use super::record::RecordView;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn records(records: &[RecordView]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["DATE", "USER", "IN", "OUT", "WORKED", "BREAKS", "BALANCE", "JUSTIFICATION"]);
        for record in records {
            let justification = record
                .justificativa
                .as_ref()
                .map(|j| format!("{} {}", j.status, j.abono_horas))
                .unwrap_or_default();
            let balance = match &record.anomalia {
                Some(anomaly) => format!("{} ({})", record.banco_horas, anomaly),
                None => record.banco_horas.clone(),
            };
            table.add_row(row![
                record.data.format("%Y-%m-%d"),
                record.usuario,
                record.hora_entrada,
                record.hora_saida,
                record.total_horas,
                record.total_pausas,
                balance,
                justification
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn balances(balances: &[UserBalance]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["DISCORD ID", "USER", "DAYS", "WORKED", "BALANCE"]);
        for balance in balances {
            table.add_row(row![
                balance.discord_id,
                balance.usuario,
                balance.days,
                format_duration(balance.worked_minutes),
                balance.balance.text
            ]);
        }
        table.printstd();

        Ok(())
    }
}
