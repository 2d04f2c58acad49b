//! Output rendering.
//!
//! Every command renders either as text (optionally styled with `console`)
//! or as structured JSON/YAML built from the same data.

use console::Style;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use dyeline_parse::{ColorCatalog, Hex, ModelSpec, ParseResult, PartKey};

use crate::status::status_message;
use crate::store::{Applied, ColorStore, ColorTable};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Yaml)
    }
}

/// Errors that can occur during serialization.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serializes `data` as JSON or YAML. Text format falls back to JSON.
pub fn serialize_structured<T: Serialize>(
    data: &T,
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?.trim_end().to_string()),
        OutputFormat::Json | OutputFormat::Text => Ok(serde_json::to_string_pretty(data)?),
    }
}

/// Channel values of the xterm 6×6×6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn cube_level(channel: u8) -> u8 {
    match channel {
        0..=47 => 0,
        48..=114 => 1,
        _ => (channel - 35) / 40,
    }
}

fn distance((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> u32 {
    let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2) as u32;
    d(r1, r2) + d(g1, g2) + d(b1, b2)
}

/// The xterm 256-color index closest to `hex`.
///
/// Both the color cube and the 24-step gray ramp are tried; the cube wins
/// ties.
pub fn ansi256(hex: Hex) -> u8 {
    let rgb = hex.rgb();
    let (r, g, b) = (cube_level(rgb.0), cube_level(rgb.1), cube_level(rgb.2));
    let cube = (
        CUBE_LEVELS[r as usize],
        CUBE_LEVELS[g as usize],
        CUBE_LEVELS[b as usize],
    );

    let average = (rgb.0 as u16 + rgb.1 as u16 + rgb.2 as u16) / 3;
    let step = (average.saturating_sub(3) / 10).min(23) as u8;
    let level = 8 + 10 * step;

    if distance(rgb, (level, level, level)) < distance(rgb, cube) {
        232 + step
    } else {
        16 + 36 * r + 6 * g + b
    }
}

/// Styles used by text output.
#[derive(Debug, Clone)]
pub struct Palette {
    styled: bool,
    part: Style,
    hex: Style,
    heading: Style,
    ok: Style,
    warn: Style,
    muted: Style,
}

impl Palette {
    /// `styled = false` yields plain text regardless of the terminal.
    pub fn new(styled: bool) -> Self {
        let base = Style::new().force_styling(styled);
        Self {
            styled,
            part: base.clone().cyan(),
            hex: base.clone().bold(),
            heading: base.clone().bold().underlined(),
            ok: base.clone().green(),
            warn: base.clone().yellow(),
            muted: base.dim(),
        }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    fn swatch(&self, hex: Hex) -> String {
        if !self.styled {
            return String::new();
        }
        let color = Style::new()
            .force_styling(true)
            .color256(ansi256(hex));
        format!(" {}", color.apply_to("██"))
    }

    fn color_line(&self, name: &str, width: usize, hex: Hex) -> String {
        format!(
            "{} {}{}",
            self.part.apply_to(format!("{:<width$}", name, width = width)),
            self.hex.apply_to(hex),
            self.swatch(hex)
        )
    }
}

/// Serializes borrowed `(key, value)` pairs as an ordered map.
struct PairMap<'a, K, V>(&'a [(K, V)]);

impl<K: Serialize, V: Serialize> Serialize for PairMap<'_, K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0)
}

// ============================================================================
// Parse results
// ============================================================================

pub fn render_parse(
    result: &ParseResult,
    format: OutputFormat,
    palette: &Palette,
) -> Result<String, RenderError> {
    if format.is_structured() {
        return serialize_structured(result, format);
    }

    let mut lines = Vec::new();
    if result.assignments.is_empty() {
        lines.push(palette.muted.apply_to("No assignments.").to_string());
    }
    let width = name_width(result.assignments.keys().map(|k| k.as_str()));
    for (part, hex) in result.assignments.iter() {
        lines.push(palette.color_line(part.as_str(), width, hex));
    }
    if !result.unknown_parts.is_empty() {
        lines.push(format!(
            "{} {}",
            palette.warn.apply_to("Ignored parts:"),
            result.unknown_parts.as_slice().join(", ")
        ));
    }
    if !result.unknown_colors.is_empty() {
        lines.push(format!(
            "{} {}",
            palette.warn.apply_to("Unknown colors:"),
            result.unknown_colors.as_slice().join(", ")
        ));
    }
    Ok(lines.join("\n"))
}

// ============================================================================
// Apply reports
// ============================================================================

/// Outcome of applying one instruction to a store.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport<'a> {
    pub status: String,
    pub model: &'a str,
    pub applied: Applied,
    pub selected_part: Option<&'a PartKey>,
    pub colors: &'a ColorTable,
}

impl<'a> ApplyReport<'a> {
    pub fn new(result: &ParseResult, applied: Applied, store: &'a ColorStore) -> Self {
        Self {
            status: status_message(result),
            model: store.table().model(),
            applied,
            selected_part: store.selected_part(),
            colors: store.table(),
        }
    }
}

pub fn render_report(
    report: &ApplyReport<'_>,
    format: OutputFormat,
    palette: &Palette,
) -> Result<String, RenderError> {
    if format.is_structured() {
        return serialize_structured(report, format);
    }

    let status = if report.applied.is_empty() {
        palette.warn.apply_to(&report.status)
    } else {
        palette.ok.apply_to(&report.status)
    };
    Ok(format!(
        "{}\n{}",
        status,
        render_table(report.colors, report.selected_part, palette)
    ))
}

/// A model's color table, marking the selected part with `>`.
pub fn render_table(table: &ColorTable, selected: Option<&PartKey>, palette: &Palette) -> String {
    let width = name_width(table.iter().map(|(k, _)| k.as_str()));
    let mut lines = vec![palette.heading.apply_to(table.model()).to_string()];
    for (part, hex) in table.iter() {
        let marker = if selected == Some(part) { ">" } else { " " };
        lines.push(format!(
            "{} {}",
            marker,
            palette.color_line(part.as_str(), width, hex)
        ));
    }
    lines.join("\n")
}

// ============================================================================
// Catalog listings
// ============================================================================

#[derive(Serialize)]
struct ModelView<'a> {
    name: &'a str,
    parts: &'a [PartKey],
    aliases: PairMap<'a, String, PartKey>,
    defaults: PairMap<'a, PartKey, Hex>,
}

pub fn render_models<'a>(
    models: impl IntoIterator<Item = &'a ModelSpec>,
    format: OutputFormat,
    palette: &Palette,
) -> Result<String, RenderError> {
    let models: Vec<&ModelSpec> = models.into_iter().collect();
    if format.is_structured() {
        let views: Vec<ModelView<'_>> = models
            .iter()
            .map(|m| ModelView {
                name: &m.name,
                parts: m.parts.parts(),
                aliases: PairMap(m.parts.aliases()),
                defaults: PairMap(&m.defaults),
            })
            .collect();
        return serialize_structured(&views, format);
    }

    let mut blocks = Vec::new();
    for model in models {
        let parts: Vec<&str> = model.parts.parts().iter().map(|k| k.as_str()).collect();
        let mut block = vec![
            palette.heading.apply_to(&model.name).to_string(),
            format!("  parts:   {}", parts.join(", ")),
        ];
        if !model.parts.aliases().is_empty() {
            let aliases: Vec<String> = model
                .parts
                .aliases()
                .iter()
                .map(|(alias, key)| format!("{} → {}", alias, key))
                .collect();
            block.push(format!(
                "  aliases: {}",
                palette.muted.apply_to(aliases.join(", "))
            ));
        }
        blocks.push(block.join("\n"));
    }
    Ok(blocks.join("\n\n"))
}

pub fn render_colors(
    colors: &ColorCatalog,
    format: OutputFormat,
    palette: &Palette,
) -> Result<String, RenderError> {
    let entries: Vec<(&str, Hex)> = colors.iter().collect();
    if format.is_structured() {
        return serialize_structured(&PairMap(&entries), format);
    }

    let width = name_width(entries.iter().map(|(name, _)| *name));
    Ok(entries
        .iter()
        .map(|(name, hex)| palette.color_line(name, width, *hex))
        .collect::<Vec<_>>()
        .join("\n"))
}
