//! Color theme for widget rendering, persisted as TOML.

use anyhow::{Context, Result};
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Convert ratatui Color to hex string
pub fn color_to_hex(color: &Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
        _ => "#ffffff".to_string(),
    }
}

/// Convert hex string to ratatui Color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// Widget color theme. Colors are stored as hex strings so the file stays
/// hand-editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub text: String,
    pub label: String,
    pub description: String,
    pub border: String,
    pub highlight_fg: String,
    pub highlight_bg: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: "#ffffff".to_string(),
            label: "#ffd700".to_string(),
            description: "#808080".to_string(),
            border: "#00ffff".to_string(),
            highlight_fg: "#000000".to_string(),
            highlight_bg: "#ffd700".to_string(),
        }
    }
}

impl Theme {
    /// Load a theme from disk, falling back to defaults when the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no theme file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read theme file {}", path.display()))?;
        let theme: Theme = toml::from_str(&content)
            .with_context(|| format!("failed to parse theme file {}", path.display()))?;

        tracing::info!("theme loaded from {:?}", path);
        Ok(theme)
    }

    /// Save the theme to disk, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self).context("failed to serialize theme")?;
        fs::write(path, toml_string)
            .with_context(|| format!("failed to write theme file {}", path.display()))?;

        tracing::info!("theme saved to {:?}", path);
        Ok(())
    }

    fn color(hex: &str) -> Color {
        hex_to_color(hex).unwrap_or(Color::White)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(Self::color(&self.text))
    }

    /// Style for action-key legends and field labels.
    pub fn label_style(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.label))
            .add_modifier(Modifier::BOLD)
    }

    pub fn description_style(&self) -> Style {
        Style::default().fg(Self::color(&self.description))
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(Self::color(&self.border))
    }

    /// Style for the highlighted row or key.
    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(Self::color(&self.highlight_fg))
            .bg(Self::color(&self.highlight_bg))
            .add_modifier(Modifier::BOLD)
    }
}
