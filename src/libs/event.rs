//! Attendance events and their detection in chat messages.
//!
//! Employees clock in and out by writing in a chat channel. Explicit commands
//! (`!entrada`, `!pausa`, ...) are recognized first; otherwise the message is
//! scanned for everyday phrases such as "bom dia" or "voltei do almoço".
//! Matching ignores case, accents and punctuation.

use clap::ValueEnum;
use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Clock-in
    Entrada,
    /// Clock-out
    Saida,
    /// Break start
    PausaInicio,
    /// Break end
    PausaFim,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            EventType::Entrada => "entrada",
            EventType::Saida => "saida",
            EventType::PausaInicio => "pausa_inicio",
            EventType::PausaFim => "pausa_fim",
        };
        f.write_str(label)
    }
}

const COMMANDS: &[(&str, EventType)] = &[
    ("entrada", EventType::Entrada),
    ("ponto", EventType::Entrada),
    ("inicio", EventType::Entrada),
    ("saida", EventType::Saida),
    ("fim", EventType::Saida),
    ("pausa", EventType::PausaInicio),
    ("almoco", EventType::PausaInicio),
    ("intervalo", EventType::PausaInicio),
    ("volta", EventType::PausaFim),
    ("voltei", EventType::PausaFim),
    ("retorno", EventType::PausaFim),
];

// Checked in order: "voltei do almoco" must end a break, not start one
const PHRASES: &[(&str, EventType)] = &[
    ("voltei", EventType::PausaFim),
    ("de volta", EventType::PausaFim),
    ("retornei", EventType::PausaFim),
    ("pausa", EventType::PausaInicio),
    ("almoco", EventType::PausaInicio),
    ("intervalo", EventType::PausaInicio),
    ("saida", EventType::Saida),
    ("tchau", EventType::Saida),
    ("ate amanha", EventType::Saida),
    ("encerrando", EventType::Saida),
    ("bom dia", EventType::Entrada),
    ("cheguei", EventType::Entrada),
    ("entrada", EventType::Entrada),
    ("iniciando", EventType::Entrada),
];

/// Lowercases, strips accents and reduces punctuation to single spaces.
fn normalize(text: &str) -> String {
    deunicode(text)
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '!')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

impl EventType {
    /// Derives an event from a chat message, if it expresses one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ponto::libs::event::EventType;
    ///
    /// assert_eq!(EventType::from_message("Bom dia, pessoal!"), Some(EventType::Entrada));
    /// assert_eq!(EventType::from_message("!SAÍDA"), Some(EventType::Saida));
    /// assert_eq!(EventType::from_message("voltei do almoço"), Some(EventType::PausaFim));
    /// assert_eq!(EventType::from_message("alguém viu o relatório?"), None);
    /// ```
    pub fn from_message(text: &str) -> Option<EventType> {
        let normalized = normalize(text);

        if let Some(command) = normalized.strip_prefix('!') {
            let word = command.split(' ').next().unwrap_or_default();
            return COMMANDS.iter().find(|(name, _)| *name == word).map(|(_, event)| *event);
        }

        let padded = format!(" {} ", normalized.replace('!', " "));
        PHRASES
            .iter()
            .find(|(phrase, _)| padded.contains(&format!(" {} ", phrase)))
            .map(|(_, event)| *event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands() {
        assert_eq!(EventType::from_message("!entrada"), Some(EventType::Entrada));
        assert_eq!(EventType::from_message("  !Pausa agora"), Some(EventType::PausaInicio));
        assert_eq!(EventType::from_message("!volta"), Some(EventType::PausaFim));
        assert_eq!(EventType::from_message("!saída"), Some(EventType::Saida));
        assert_eq!(EventType::from_message("!relatorio"), None);
    }

    #[test]
    fn test_phrases() {
        assert_eq!(EventType::from_message("Cheguei!"), Some(EventType::Entrada));
        assert_eq!(EventType::from_message("indo pro almoço"), Some(EventType::PausaInicio));
        assert_eq!(EventType::from_message("De volta."), Some(EventType::PausaFim));
        assert_eq!(EventType::from_message("Até amanhã, time"), Some(EventType::Saida));
    }

    #[test]
    fn test_break_end_wins_over_break_start() {
        assert_eq!(EventType::from_message("voltei da pausa"), Some(EventType::PausaFim));
    }

    #[test]
    fn test_words_are_not_matched_inside_other_words() {
        assert_eq!(EventType::from_message("pausado o deploy"), None);
        assert_eq!(EventType::from_message("entradas do mês"), None);
    }
}
