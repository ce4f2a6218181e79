//! Logging facilities for Vitrine.
//!
//! Vitrine uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; applications (and tests) install their own:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! The constants in [`targets`] can be used with `tracing` filter
//! directives to enable or silence individual subsystems, e.g.
//! `RUST_LOG=vitrine::motion::viewport=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "vitrine_core";
    /// Timer service target.
    pub const TIMER: &str = "vitrine_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "vitrine_core::signal";
    /// Viewport watcher target.
    pub const VIEWPORT: &str = "vitrine::motion::viewport";
    /// Reveal animator target.
    pub const REVEAL: &str = "vitrine::motion::reveal";
    /// Expand/collapse panel target.
    pub const PANEL: &str = "vitrine::motion::panel";
    /// Modal controller target.
    pub const MODAL: &str = "vitrine::motion::modal";
    /// Media playback controller target.
    pub const MEDIA: &str = "vitrine::motion::media";
    /// Toggle-group registry target.
    pub const GROUP: &str = "vitrine::motion::group";
    /// Content provider / slice rendering target.
    pub const CONTENT: &str = "vitrine::content";
}
