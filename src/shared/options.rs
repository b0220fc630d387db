//! Zentrale Konfiguration für Track-Symbol-Darstellung und Kartenansicht.
//!
//! `SymbolOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::shape::{DEFAULT_LEADER_TIME, DEFAULT_SIZE};
use crate::core::{LatLng, ShapeOptions, ShapeSet, ShapeSetEntry, WebMercatorView};

// ── Symbole ─────────────────────────────────────────────────────────

/// Vorlaufzeit der Leader-Linie in Sekunden.
pub const LEADER_TIME_S: f64 = DEFAULT_LEADER_TIME;
/// Standard-Symbolgröße in Pixeln.
pub const SYMBOL_SIZE_PX: f64 = DEFAULT_SIZE;

// ── Kartenansicht ───────────────────────────────────────────────────

/// Standard-Zoom-Level der Ansicht.
pub const VIEW_ZOOM: f64 = 10.0;
/// Standard-Viewport-Größe in Pixeln [Breite, Höhe].
pub const VIEWPORT_SIZE: [f64; 2] = [1280.0, 720.0];

// ── Farben ──────────────────────────────────────────────────────────

/// Füllfarbe der Symbole.
pub const SYMBOL_FILL_COLOR: &str = "#3366ff";
/// Umrissfarbe der Symbole.
pub const SYMBOL_STROKE_COLOR: &str = "#0a1f66";
/// Linienstärke in Pixeln.
pub const SYMBOL_STROKE_WIDTH: f64 = 1.5;

/// Darstellungsstil der Symbol-Pfade im SVG-Export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SymbolStyle {
    /// Füllfarbe (SVG-Farbwert)
    pub fill_color: String,
    /// Füll-Deckkraft (0.0 = transparent, 1.0 = opak)
    pub fill_opacity: f64,
    /// Umrissfarbe (SVG-Farbwert)
    pub stroke_color: String,
    /// Linienstärke in Pixeln
    pub stroke_width: f64,
    /// Hintergrundfarbe, `None` = transparent
    pub background_color: Option<String>,
}

impl Default for SymbolStyle {
    fn default() -> Self {
        Self {
            fill_color: SYMBOL_FILL_COLOR.to_owned(),
            fill_opacity: 0.8,
            stroke_color: SYMBOL_STROKE_COLOR.to_owned(),
            stroke_width: SYMBOL_STROKE_WIDTH,
            background_color: None,
        }
    }
}

/// Symbolgröße ab einem Mindest-Zoom-Level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoomSymbolSize {
    pub min_zoom_level: f64,
    pub size_px: f64,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `fleet_track_symbol.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymbolOptions {
    // ── Symbole ─────────────────────────────────────────────────
    /// Vorlaufzeit der Leader-Linie in Sekunden
    pub leader_time_s: f64,
    /// Standard-Symbolgröße in Pixeln (wenn keine Zoom-Stufe passt)
    pub symbol_size_px: f64,

    // ── Ansicht ─────────────────────────────────────────────────
    /// Zoom-Level der Ansicht
    pub view_zoom: f64,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f64; 2],
    /// Kartenmittelpunkt, `None` = Mittelwert der Flotte
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_center: Option<LatLng>,

    // ── Tabellen (in TOML nach den einfachen Werten) ────────────
    /// Zoomabhängige Symbolgrößen
    #[serde(default)]
    pub zoom_symbol_sizes: Vec<ZoomSymbolSize>,
    #[serde(default)]
    pub style: SymbolStyle,
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self {
            leader_time_s: LEADER_TIME_S,
            symbol_size_px: SYMBOL_SIZE_PX,

            view_zoom: VIEW_ZOOM,
            viewport_size: VIEWPORT_SIZE,
            view_center: None,

            zoom_symbol_sizes: Vec::new(),
            style: SymbolStyle::default(),
        }
    }
}

impl SymbolOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("fleet_track_symbol"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("fleet_track_symbol.toml")
    }

    /// Baut die Form-Optionen aus Standard-Formen in den konfigurierten Größen.
    pub fn to_shape_options(&self) -> ShapeOptions {
        let entries = self
            .zoom_symbol_sizes
            .iter()
            .map(|size| ShapeSetEntry {
                min_zoom_level: size.min_zoom_level,
                shape_set: ShapeSet::with_size(size.size_px),
            })
            .collect();
        ShapeOptions::new(
            self.leader_time_s,
            ShapeSet::with_size(self.symbol_size_px),
            entries,
        )
    }

    /// Erstellt die Kartenansicht; `fallback_center` gilt, wenn kein Mittelpunkt konfiguriert ist.
    pub fn to_view(&self, fallback_center: LatLng) -> WebMercatorView {
        WebMercatorView::new(
            self.view_center.unwrap_or(fallback_center),
            self.view_zoom,
            DVec2::from(self.viewport_size),
        )
    }
}
