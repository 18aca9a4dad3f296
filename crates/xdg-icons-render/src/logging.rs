//! Tracing targets for rasterization and the icon provider.

/// Target names for log filtering.
pub mod targets {
    /// Decoding, resampling and rasterizing icons.
    pub const MATERIALIZE: &str = "xdg_icons_render::materialize";
    /// Provider lookups and the pixel cache.
    pub const PROVIDER: &str = "xdg_icons_render::provider";
}
