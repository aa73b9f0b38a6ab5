//! Client for the remote ponto backend.
//!
//! Events are mirrored with `POST {api_url}/ponto/eventos`, authenticated
//! with the configured bearer token. The local store stays the source of
//! truth: callers report a failed delivery and move on.

use crate::libs::config::ServerConfig;
use crate::libs::event::EventType;
use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

const EVENTS_PATH: &str = "ponto/eventos";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of an event submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPayload {
    #[serde(rename = "discordId")]
    pub discord_id: String,
    pub usuario: String,
    pub tipo: EventType,
    pub data: NaiveDate,
    pub timestamp: DateTime<FixedOffset>,
}

impl EventPayload {
    pub fn new(discord_id: &str, usuario: &str, tipo: EventType, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            discord_id: discord_id.to_string(),
            usuario: usuario.to_string(),
            tipo,
            data: timestamp.date_naive(),
            timestamp,
        }
    }
}

pub struct PontoApi {
    client: Client,
    config: ServerConfig,
}

impl PontoApi {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn events_url(&self) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), EVENTS_PATH)
    }

    /// Posts one event. Transport errors are returned; HTTP statuses are left
    /// for the caller to judge.
    pub async fn send_event(&self, payload: &EventPayload) -> Result<StatusCode> {
        let res = self
            .client
            .post(self.events_url())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.auth_token))
            .json(payload)
            .send()
            .await?;
        Ok(res.status())
    }
}
