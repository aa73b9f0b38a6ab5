//! Day records and their mapped view.
//!
//! An [`AttendanceRecord`] is the stored document for one user on one date:
//! raw clock values, the break intervals and the cached duration strings
//! written by the write path. A [`RecordView`] is what readers get back: the
//! same record with adjusted clock values and freshly computed totals and
//! banked-hours balance.
//!
//! ## Lifecycle
//!
//! ```text
//! clock_in ──▶ start_break ──▶ end_break ──▶ ... ──▶ clock_out
//!                    (at most one open break)
//! ```
//!
//! Justifications may be attached at any time; records are never deleted here.

use crate::libs::attendance::{compute_worked_with_override, open_break, BreakInterval, WorkedTime};
use crate::libs::balance::{compute_balance, Balance, DEFAULT_WORKDAY_MINUTES};
use crate::libs::clock::{adjust_timezone, TimezonePolicy, SENTINEL};
use crate::libs::duration::{format_duration, parse_total_pausas, ZERO_DURATION};
use crate::libs::error::PontoError;
use crate::libs::event::EventType;
use crate::libs::justification::Justification;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Serializes a missing clock value as the `"-"` sentinel and back.
mod clock_field {
    use crate::libs::clock::SENTINEL;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(SENTINEL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.filter(|text| {
            let text = text.trim();
            !text.is_empty() && text != SENTINEL
        }))
    }
}

fn zero_duration() -> String {
    ZERO_DURATION.to_string()
}

/// Stored attendance document, identified by `(discord_id, data)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub usuario: String,
    #[serde(rename = "discordId")]
    pub discord_id: String,
    pub data: NaiveDate,
    #[serde(with = "clock_field", default)]
    pub entrada: Option<String>,
    #[serde(with = "clock_field", default)]
    pub saida: Option<String>,
    #[serde(default)]
    pub pausas: Vec<BreakInterval>,
    #[serde(default = "zero_duration")]
    pub total_horas: String,
    #[serde(default = "zero_duration")]
    pub total_pausas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justificativa: Option<Justification>,
}

impl AttendanceRecord {
    /// An empty record for a user and date, with no clock values.
    pub fn new(usuario: &str, discord_id: &str, data: NaiveDate) -> Self {
        Self {
            usuario: usuario.to_string(),
            discord_id: discord_id.to_string(),
            data,
            entrada: None,
            saida: None,
            pausas: Vec::new(),
            total_horas: zero_duration(),
            total_pausas: zero_duration(),
            justificativa: None,
        }
    }

    /// Creates the day record from the first clock-in event.
    pub fn clock_in(usuario: &str, discord_id: &str, now: DateTime<FixedOffset>, policy: &TimezonePolicy) -> Self {
        let mut record = Self::new(usuario, discord_id, now.date_naive());
        record.entrada = Some(policy.store(now.time()));
        record
    }

    /// Records clock-in on an existing record that has none yet.
    pub fn record_entrada(&mut self, now: DateTime<FixedOffset>, policy: &TimezonePolicy) -> Result<(), PontoError> {
        if let Some(entrada) = &self.entrada {
            return Err(PontoError::AlreadyClockedIn(entrada.clone()));
        }
        self.entrada = Some(policy.store(now.time()));
        Ok(())
    }

    /// Records clock-out, closing a break left open, and refreshes the totals.
    pub fn clock_out(&mut self, now: DateTime<FixedOffset>, policy: &TimezonePolicy) -> Result<(), PontoError> {
        self.ensure_open_day()?;
        if let Some(pausa) = self.pausas.iter_mut().find(|p| p.is_open()) {
            pausa.fim = Some(now);
        }
        self.saida = Some(policy.store(now.time()));
        self.refresh_totals(policy);
        Ok(())
    }

    /// Opens a break. Only one break may be open at a time.
    pub fn start_break(&mut self, now: DateTime<FixedOffset>) -> Result<(), PontoError> {
        self.ensure_open_day()?;
        if let Some(pausa) = open_break(&self.pausas) {
            return Err(PontoError::BreakAlreadyOpen(pausa.inicio.format("%H:%M").to_string()));
        }
        self.pausas.push(BreakInterval::open(now));
        Ok(())
    }

    /// Closes the open break and refreshes the totals.
    pub fn end_break(&mut self, now: DateTime<FixedOffset>, policy: &TimezonePolicy) -> Result<(), PontoError> {
        let pausa = self.pausas.iter_mut().find(|p| p.is_open()).ok_or(PontoError::NoOpenBreak)?;
        pausa.fim = Some(now);
        self.refresh_totals(policy);
        Ok(())
    }

    pub fn set_justification(&mut self, justification: Justification, policy: &TimezonePolicy) {
        self.justificativa = Some(justification);
        self.refresh_totals(policy);
    }

    /// Applies an attendance event to the day's record.
    ///
    /// Without an existing record only a clock-in is accepted; it creates the
    /// record. A later name for the same discord id replaces the stored one.
    pub fn apply_event(
        existing: Option<AttendanceRecord>,
        usuario: &str,
        discord_id: &str,
        event: EventType,
        now: DateTime<FixedOffset>,
        policy: &TimezonePolicy,
    ) -> Result<AttendanceRecord, PontoError> {
        let Some(mut record) = existing else {
            return match event {
                EventType::Entrada => Ok(Self::clock_in(usuario, discord_id, now, policy)),
                _ => Err(PontoError::MissingClockIn {
                    user: discord_id.to_string(),
                    date: now.date_naive(),
                }),
            };
        };

        match event {
            EventType::Entrada => record.record_entrada(now, policy)?,
            EventType::Saida => record.clock_out(now, policy)?,
            EventType::PausaInicio => record.start_break(now)?,
            EventType::PausaFim => record.end_break(now, policy)?,
        }
        record.usuario = usuario.to_string();
        Ok(record)
    }

    /// Rewrites stored clock values shifted by `offset_hours` and refreshes
    /// the totals. Returns whether any value changed.
    pub fn shift_clock(&mut self, offset_hours: i64, policy: &TimezonePolicy) -> bool {
        let shift = |value: &Option<String>| value.as_deref().and_then(|text| adjust_timezone(text, offset_hours));

        let entrada = shift(&self.entrada);
        let saida = shift(&self.saida);
        let changed = entrada.as_ref().is_some_and(|e| Some(e) != self.entrada.as_ref())
            || saida.as_ref().is_some_and(|s| Some(s) != self.saida.as_ref());

        if entrada.is_some() {
            self.entrada = entrada;
        }
        if saida.is_some() {
            self.saida = saida;
        }
        if changed {
            self.refresh_totals(policy);
        }
        changed
    }

    pub fn has_open_break(&self) -> bool {
        open_break(&self.pausas).is_some()
    }

    /// Worked and break minutes under the given timezone policy.
    pub fn worked(&self, policy: &TimezonePolicy) -> WorkedTime {
        let entrada = policy.display(self.entrada.as_deref());
        let saida = policy.display(self.saida.as_deref());
        compute_worked_with_override(Some(&entrada), Some(&saida), &self.pausas, self.justificativa.as_ref())
    }

    /// Rewrites the cached `total_horas` / `total_pausas` strings.
    pub fn refresh_totals(&mut self, policy: &TimezonePolicy) {
        let worked = self.worked(policy);
        self.total_horas = format_duration(worked.worked_minutes);
        self.total_pausas = format_duration(worked.break_minutes);
    }

    fn ensure_open_day(&self) -> Result<(), PontoError> {
        if self.entrada.is_none() {
            return Err(PontoError::MissingClockIn {
                user: self.discord_id.clone(),
                date: self.data,
            });
        }
        if let Some(saida) = &self.saida {
            return Err(PontoError::AlreadyClockedOut(saida.clone()));
        }
        Ok(())
    }
}

/// Settings the read path applies when mapping records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub workday_minutes: i64,
    pub timezone: TimezonePolicy,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            workday_minutes: DEFAULT_WORKDAY_MINUTES,
            timezone: TimezonePolicy::default(),
        }
    }
}

/// A record as returned to readers, with computed fields next to the raw ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordView {
    pub usuario: String,
    #[serde(rename = "discordId")]
    pub discord_id: String,
    pub data: NaiveDate,
    pub hora_entrada: String,
    pub hora_saida: String,
    pub total_horas: String,
    pub total_pausas: String,
    pub banco_horas: String,
    pub banco_horas_min: i64,
    pub pausas: Vec<BreakInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justificativa: Option<Justification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomalia: Option<String>,
}

impl RecordView {
    /// Maps a stored record through timezone adjustment, aggregation and balance.
    ///
    /// Incomplete days (no clock-in or no clock-out) get a zero balance and
    /// zero worked time; their break total falls back to the cached
    /// `total_pausas` string, normalized with the strict pauses grammar.
    pub fn from_record(record: &AttendanceRecord, settings: &ViewSettings) -> Self {
        let hora_entrada = settings.timezone.display(record.entrada.as_deref());
        let hora_saida = settings.timezone.display(record.saida.as_deref());
        let worked = record.worked(&settings.timezone);

        let (total_horas, total_pausas, balance) = if worked.computed {
            (
                format_duration(worked.worked_minutes),
                format_duration(worked.break_minutes),
                compute_balance(worked.worked_minutes, record.data, record.justificativa.as_ref(), settings.workday_minutes),
            )
        } else {
            (zero_duration(), parse_total_pausas(Some(&record.total_pausas)), Balance::zero())
        };

        Self {
            usuario: record.usuario.clone(),
            discord_id: record.discord_id.clone(),
            data: record.data,
            hora_entrada,
            hora_saida,
            total_horas,
            total_pausas,
            banco_horas: balance.text,
            banco_horas_min: balance.minutes,
            pausas: record.pausas.clone(),
            justificativa: record.justificativa.clone(),
            anomalia: worked.anomaly.map(|a| a.to_string()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.hora_entrada != SENTINEL && self.hora_saida != SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::clock::TimezoneMode;
    use crate::libs::justification::JustificationStatus;

    fn at(text: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(text).unwrap()
    }

    fn local() -> TimezonePolicy {
        TimezonePolicy::new(TimezoneMode::Never, -3)
    }

    #[test]
    fn test_full_day_lifecycle() {
        let policy = local();
        let mut record = AttendanceRecord::clock_in("Ana", "42", at("2025-09-22T09:00:00-03:00"), &policy);
        assert_eq!(record.entrada.as_deref(), Some("09:00"));
        assert_eq!(record.data, NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());

        record.start_break(at("2025-09-22T12:00:00-03:00")).unwrap();
        assert!(record.has_open_break());
        assert_eq!(
            record.start_break(at("2025-09-22T12:05:00-03:00")),
            Err(PontoError::BreakAlreadyOpen("12:00".to_string()))
        );
        record.end_break(at("2025-09-22T13:00:00-03:00"), &policy).unwrap();
        assert_eq!(record.end_break(at("2025-09-22T13:01:00-03:00"), &policy), Err(PontoError::NoOpenBreak));

        record.clock_out(at("2025-09-22T18:00:00-03:00"), &policy).unwrap();
        assert_eq!(record.saida.as_deref(), Some("18:00"));
        assert_eq!(record.total_horas, "8h 0m");
        assert_eq!(record.total_pausas, "1h 0m");
        assert_eq!(
            record.clock_out(at("2025-09-22T19:00:00-03:00"), &policy),
            Err(PontoError::AlreadyClockedOut("18:00".to_string()))
        );
    }

    #[test]
    fn test_clock_out_closes_open_break() {
        let policy = local();
        let mut record = AttendanceRecord::clock_in("Ana", "42", at("2025-09-22T09:00:00-03:00"), &policy);
        record.start_break(at("2025-09-22T17:30:00-03:00")).unwrap();
        record.clock_out(at("2025-09-22T18:00:00-03:00"), &policy).unwrap();
        assert!(!record.has_open_break());
        assert_eq!(record.total_pausas, "0h 30m");
        assert_eq!(record.total_horas, "8h 30m");
    }

    #[test]
    fn test_break_requires_clock_in() {
        let mut record = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        let err = record.start_break(at("2025-09-22T12:00:00-03:00")).unwrap_err();
        assert!(matches!(err, PontoError::MissingClockIn { .. }));
    }

    #[test]
    fn test_second_clock_in_is_rejected() {
        let policy = local();
        let mut record = AttendanceRecord::clock_in("Ana", "42", at("2025-09-22T09:00:00-03:00"), &policy);
        assert_eq!(
            record.record_entrada(at("2025-09-22T10:00:00-03:00"), &policy),
            Err(PontoError::AlreadyClockedIn("09:00".to_string()))
        );
    }

    #[test]
    fn test_on_write_policy_shifts_stored_values() {
        let policy = TimezonePolicy::new(TimezoneMode::OnWrite, -3);
        let record = AttendanceRecord::clock_in("Ana", "42", at("2025-09-22T06:00:00+00:00"), &policy);
        assert_eq!(record.entrada.as_deref(), Some("09:00"));
    }

    #[test]
    fn test_document_shape_round_trip() {
        let json = r#"{
            "usuario": "Ana",
            "discordId": "42",
            "data": "2025-09-22",
            "entrada": "09:00",
            "saida": "-",
            "pausas": [{"inicio": "2025-09-22T12:00:00Z", "fim": "2025-09-22T13:00:00Z"}],
            "total_horas": "0h 0m",
            "total_pausas": "1h 0m"
        }"#;
        let record: AttendanceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.saida, None);
        assert_eq!(record.pausas.len(), 1);
        assert!(record.justificativa.is_none());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["saida"], "-");
        assert_eq!(value["discordId"], "42");
        assert!(value.get("justificativa").is_none());
    }

    #[test]
    fn test_view_of_complete_day() {
        let mut record = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        record.entrada = Some("09:00".to_string());
        record.saida = Some("18:00".to_string());
        record.pausas = vec![BreakInterval::closed(at("2025-09-22T12:00:00Z"), at("2025-09-22T13:00:00Z"))];
        record.justificativa = Some(Justification::new(JustificationStatus::Approved, "1h 0m"));

        let view = RecordView::from_record(&record, &ViewSettings::default());
        assert_eq!(view.hora_entrada, "09:00");
        assert_eq!(view.total_horas, "8h 0m");
        assert_eq!(view.total_pausas, "1h 0m");
        assert_eq!(view.banco_horas, "1h 0m");
        assert_eq!(view.banco_horas_min, 60);
        assert!(view.is_complete());
        assert_eq!(view.anomalia, None);
    }

    #[test]
    fn test_view_of_incomplete_day_uses_cached_pauses() {
        let mut record = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        record.entrada = Some("09:00".to_string());
        record.total_horas = "3h 0m".to_string();
        record.total_pausas = "0h 75m".to_string();

        let view = RecordView::from_record(&record, &ViewSettings::default());
        assert_eq!(view.hora_saida, "-");
        assert_eq!(view.total_horas, "0h 0m");
        assert_eq!(view.total_pausas, "1h 15m");
        assert_eq!(view.banco_horas, "0h 0m");
        assert_eq!(view.banco_horas_min, 0);
        assert!(!view.is_complete());
    }

    #[test]
    fn test_view_on_read_shift() {
        let mut record = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        record.entrada = Some("06:00".to_string());
        record.saida = Some("15:00".to_string());
        let settings = ViewSettings {
            timezone: TimezonePolicy::new(TimezoneMode::OnRead, -3),
            ..ViewSettings::default()
        };

        let view = RecordView::from_record(&record, &settings);
        assert_eq!(view.hora_entrada, "09:00");
        assert_eq!(view.hora_saida, "18:00");
        assert_eq!(view.banco_horas_min, 60);
    }

    #[test]
    fn test_view_reports_anomaly() {
        let mut record = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        record.entrada = Some("18:00".to_string());
        record.saida = Some("09:00".to_string());

        let view = RecordView::from_record(&record, &ViewSettings::default());
        assert_eq!(view.total_horas, "0h 0m");
        assert_eq!(view.banco_horas_min, -480);
        assert_eq!(view.anomalia.as_deref(), Some("clock-out before clock-in"));
    }

    #[test]
    fn test_apply_event_creates_record_only_on_clock_in() {
        let policy = local();
        let now = at("2025-09-22T09:00:00-03:00");
        let err = AttendanceRecord::apply_event(None, "Ana", "42", EventType::PausaInicio, now, &policy).unwrap_err();
        assert!(matches!(err, PontoError::MissingClockIn { .. }));

        let record = AttendanceRecord::apply_event(None, "Ana", "42", EventType::Entrada, now, &policy).unwrap();
        let record = AttendanceRecord::apply_event(Some(record), "Ana B.", "42", EventType::PausaInicio, at("2025-09-22T12:00:00-03:00"), &policy).unwrap();
        assert!(record.has_open_break());
        assert_eq!(record.usuario, "Ana B.");

        let record = AttendanceRecord::apply_event(Some(record), "Ana B.", "42", EventType::Saida, at("2025-09-22T18:00:00-03:00"), &policy).unwrap();
        assert_eq!(record.total_horas, "3h 0m");
        assert_eq!(record.total_pausas, "6h 0m");
    }

    #[test]
    fn test_shift_clock_rewrites_both_values() {
        let policy = local();
        let mut record = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());
        record.entrada = Some("06:00".to_string());
        record.saida = Some("15:30".to_string());

        assert!(record.shift_clock(-3, &policy));
        assert_eq!(record.entrada.as_deref(), Some("09:00"));
        assert_eq!(record.saida.as_deref(), Some("18:30"));
        assert_eq!(record.total_horas, "9h 30m");

        assert!(!record.shift_clock(0, &policy));
        let mut empty = AttendanceRecord::new("Ana", "42", NaiveDate::from_ymd_opt(2025, 9, 23).unwrap());
        assert!(!empty.shift_clock(-3, &policy));
        assert_eq!(empty.entrada, None);
    }
}
