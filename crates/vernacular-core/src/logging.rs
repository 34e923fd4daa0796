//! Logging facilities for Vernacular.
//!
//! Vernacular uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Parse problems in localized source are logged at `warn` under
//! [`targets::PARSER`]; they never abort compilation.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=vernacular_style::parser=warn,vernacular_style::decoration=debug`.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "vernacular_core";
    /// Timer system target.
    pub const TIMER: &str = "vernacular_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "vernacular_core::signal";
    /// Localized source parser target.
    pub const PARSER: &str = "vernacular_style::parser";
    /// Alias dictionary target.
    pub const DICTIONARY: &str = "vernacular_style::dictionary";
    /// Value translation target.
    pub const TRANSLATE: &str = "vernacular_style::translate";
    /// Compile pipeline and parse cache target.
    pub const COMPILE: &str = "vernacular_style::compile";
    /// Layout preprocessor target.
    pub const LAYOUT: &str = "vernacular_style::layout";
    /// Decoration rule engine target.
    pub const DECORATION: &str = "vernacular_style::decoration";
    /// Coordinator state machine target.
    pub const COORDINATOR: &str = "vernacular_style::coordinator";
    /// Source file watcher target.
    pub const HOT_RELOAD: &str = "vernacular_style::hot_reload";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn targets_are_module_paths() {
        for target in [
            targets::TIMER,
            targets::SIGNAL,
            targets::PARSER,
            targets::DICTIONARY,
            targets::TRANSLATE,
            targets::LAYOUT,
            targets::DECORATION,
            targets::COORDINATOR,
            targets::COMPILE,
            targets::HOT_RELOAD,
        ] {
            assert!(target.starts_with("vernacular_"));
            assert!(target.contains("::"));
        }
        assert!(targets::TIMER.starts_with(targets::CORE));
    }
}
