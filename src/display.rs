// src/display.rs

use crate::config::DisplayConfig;
use crate::error::{Error, Result};
use crate::model::{to_hex, Color, DrawPrimitive};
use serde::Serialize;

/// Colored piece of display text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFragment {
    pub t: String,
    pub c: String,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            t: text.into(),
            c: to_hex(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Text {
    Plain(String),
    Fragments(Vec<TextFragment>),
}

/// Body of a custom app update. Unset fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Seconds the app stays on screen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw: Option<Vec<DrawPrimitive>>,
}

const NO_PULLS: Color = Color::new(0xff, 0xff, 0xff);
const SOME_PULLS: Color = Color::new(0xff, 0xa5, 0x00);

pub fn pulls_payload(count: u64, config: &DisplayConfig) -> AppPayload {
    let color = if count == 0 { NO_PULLS } else { SOME_PULLS };
    AppPayload {
        text: Some(Text::Fragments(vec![TextFragment::new(count.to_string(), color)])),
        icon: config.pulls_icon.clone(),
        duration: Some(config.duration_secs),
        draw: None,
    }
}

pub fn chart_payload(primitives: Vec<DrawPrimitive>, icon: Option<String>, config: &DisplayConfig) -> AppPayload {
    AppPayload {
        text: None,
        icon,
        duration: Some(config.duration_secs),
        draw: Some(primitives),
    }
}

pub struct DisplayClient {
    http: reqwest::Client,
    base_url: String,
}

impl DisplayClient {
    pub fn new(config: &DisplayConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| Error::Config("DISPLAY_URL is required to push to the display".into()))?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
        })
    }

    /// Replaces the contents of custom app `app`
    pub async fn push(&self, app: &str, payload: &AppPayload) -> Result<()> {
        let url = format!("{}/api/custom", self.base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("name", app)])
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url,
                status: status.as_u16(),
            });
        }
        log::debug!("pushed {} to {}", app, self.base_url);
        Ok(())
    }
}
