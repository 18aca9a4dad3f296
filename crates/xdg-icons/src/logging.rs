//! Tracing targets for icon theme loading and lookup.
//!
//! `xdg-icons` uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("xdg_icons::lookup=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Manifest parsing and theme construction.
    pub const THEME: &str = "xdg_icons::theme";
    /// Directory enumeration and content classification.
    pub const INDEX: &str = "xdg_icons::index";
    /// Icon lookup and fallback delegation.
    pub const LOOKUP: &str = "xdg_icons::lookup";
    /// Theme chain assembly.
    pub const CHAIN: &str = "xdg_icons::chain";
}
