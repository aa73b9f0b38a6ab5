//! Justifications ("justificativas") attached to a day record.
//!
//! An employee explains a missing or irregular day and an administrator
//! approves or rejects it. Only approved justifications affect calculations:
//! `abonoHoras` is credited to the banked-hours balance, and `manualBreak`
//! replaces the break total measured from the recorded intervals.

use crate::libs::duration::{parse_duration, total_pausas_minutes};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum JustificationStatus {
    #[default]
    #[serde(alias = "pendente")]
    Pending,
    #[serde(alias = "aprovado", alias = "aprovada")]
    Approved,
    #[serde(alias = "rejeitado", alias = "rejeitada")]
    Rejected,
}

impl fmt::Display for JustificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            JustificationStatus::Pending => "pending",
            JustificationStatus::Approved => "approved",
            JustificationStatus::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Justification {
    #[serde(default)]
    pub status: JustificationStatus,
    /// Signed duration text credited to the balance once approved.
    #[serde(rename = "abonoHoras", default)]
    pub abono_horas: String,
    /// Break total entered by hand, in the strict "total_pausas" grammar.
    #[serde(rename = "manualBreak", default, skip_serializing_if = "Option::is_none")]
    pub manual_break: Option<String>,
    /// Employee's explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
    #[serde(rename = "observacaoAdmin", default, skip_serializing_if = "Option::is_none")]
    pub observacao_admin: Option<String>,
}

impl Justification {
    pub fn new(status: JustificationStatus, abono_horas: &str) -> Self {
        Self {
            status,
            abono_horas: abono_horas.to_string(),
            ..Self::default()
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == JustificationStatus::Approved
    }

    /// Minutes credited to the balance; zero unless approved.
    pub fn credit_minutes(&self) -> i64 {
        if self.is_approved() {
            parse_duration(Some(&self.abono_horas))
        } else {
            0
        }
    }

    /// Break total that overrides the measured intervals, if approved and well-formed.
    pub fn manual_break_minutes(&self) -> Option<i64> {
        if !self.is_approved() {
            return None;
        }
        total_pausas_minutes(self.manual_break.as_deref())
    }
}
