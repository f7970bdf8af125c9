//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `GutterConfig` fields and by its `Default` impl.

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}

pub fn zero() -> u32 {
    0
}

// ── Gutter ─────────────────────────────────────────────────────────────────

pub fn gutter_name() -> String {
    "debugger-breakpoint".to_string()
}

pub fn line_number_gutter_name() -> String {
    "line-number".to_string()
}

/// Sits directly after the line-number gutter (priority 0), before the code.
pub fn priority() -> i32 {
    100
}

// ── Decorations ────────────────────────────────────────────────────────────

pub fn breakpoint_class() -> String {
    "debugger-breakpoint-marker".to_string()
}

pub fn shadow_class() -> String {
    "debugger-shadow-breakpoint-marker".to_string()
}

// ── Logging ────────────────────────────────────────────────────────────────

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Info
}
