//! Static styling and display configuration for the dashboard frontend.
//!
//! The frontend fetches this once at initialization and drives all chart
//! and card styling from it. Metric computation never reads anything in
//! this module.

use std::sync::OnceLock;

use serde::Serialize;

/// Chart color for a defect class marker outside the known taxonomy.
pub const FALLBACK_DEFECT_COLOR: &str = "#64D2FF";

/// The complete theme/config object served by `GET /api/v1/theme`.
#[derive(Debug, Serialize)]
pub struct DashboardTheme {
    pub palette: ThemePalette,
    pub defect_colors: Vec<DefectColor>,
    pub fallback_defect_color: &'static str,
    pub kpi_placeholders: KpiPlaceholders,
}

/// Navy executive-dashboard color tokens.
#[derive(Debug, Serialize)]
pub struct ThemePalette {
    pub app_background: &'static str,
    pub sidebar_background: &'static str,
    pub card_background: &'static str,
    pub card_border: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    /// Bar series color (Pareto counts).
    pub accent: &'static str,
    /// Cumulative-percentage line color.
    pub cumulative_line: &'static str,
    pub positive: &'static str,
    pub warning: &'static str,
    pub negative: &'static str,
    /// Named continuous scale for the factory-line heatmap.
    pub heatmap_scale: &'static str,
}

/// Marker color for one defect class.
#[derive(Debug, Serialize)]
pub struct DefectColor {
    pub class: &'static str,
    pub color: &'static str,
}

/// Illustrative example values, not derived from data.
///
/// The warehouse has no history table to compare against, so the trend
/// arrows and the false-positive rate are fixed display constants until
/// one exists.
#[derive(Debug, Serialize)]
pub struct KpiPlaceholders {
    pub false_positive_rate_pct: f64,
    pub yield_trend: &'static str,
    pub defect_trend: &'static str,
    pub false_positive_trend: &'static str,
}

/// Marker colors for the closed defect taxonomy.
const DEFECT_COLORS: [(&str, &str); 6] = [
    ("open", "#dc2626"),
    ("short", "#ea580c"),
    ("mousebite", "#f59e0b"),
    ("spur", "#16a34a"),
    ("copper", "#2563eb"),
    ("pin-hole", "#7c3aed"),
];

static THEME: OnceLock<DashboardTheme> = OnceLock::new();

/// The process-wide theme instance, built once on first access.
pub fn dashboard_theme() -> &'static DashboardTheme {
    THEME.get_or_init(executive_navy)
}

/// Chart color for a defect class marker, with a fallback for classes
/// outside the known taxonomy. Lookup is case-insensitive because the
/// inference pipeline emits lowercase labels but older exports did not.
pub fn defect_color(class: &str) -> &'static str {
    let class = class.to_ascii_lowercase();
    DEFECT_COLORS
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_DEFECT_COLOR)
}

/// The navy executive theme the dashboard ships with.
fn executive_navy() -> DashboardTheme {
    DashboardTheme {
        palette: ThemePalette {
            app_background: "#1a2332",
            sidebar_background: "#0f172a",
            card_background: "#2d3748",
            card_border: "#3f4d5f",
            text_primary: "#ffffff",
            text_secondary: "#e2e8f0",
            text_muted: "#94a3b8",
            accent: "#64D2FF",
            cumulative_line: "#FF9F0A",
            positive: "#22c55e",
            warning: "#f59e0b",
            negative: "#ef4444",
            heatmap_scale: "Blues",
        },
        defect_colors: DEFECT_COLORS
            .iter()
            .map(|&(class, color)| DefectColor { class, color })
            .collect(),
        fallback_defect_color: FALLBACK_DEFECT_COLOR,
        kpi_placeholders: KpiPlaceholders {
            false_positive_rate_pct: 15.0,
            yield_trend: "↑ 0.5%",
            defect_trend: "→ stable",
            false_positive_trend: "↓ 5%",
        },
    }
}
