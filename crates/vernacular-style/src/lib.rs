//! A compiler for a localized stylesheet dialect.
//!
//! Authors write styles with localized element, property, keyword and unit
//! names; this crate turns that text into canonical stylesheet text and
//! back, and drives the live pipeline around it:
//!
//! - **Dictionary & translation**: bidirectional alias tables and the value
//!   translator ([`dictionary`], [`translate`])
//! - **Parsing & generation**: line-oriented parsing into a [`RuleMap`] and
//!   regeneration as localized or canonical text ([`parser`], [`generator`])
//! - **Layout intents**: anchor rules that say where their content goes,
//!   expanded into positioning declarations ([`layout`])
//! - **Decorations**: `@element:name { ... }` blocks materialized as
//!   synthetic nodes with minimal churn ([`decoration`])
//! - **Coordinator**: the debounced idle/active state machine that ties it
//!   together ([`coordinator`])
//! - **Hot Reload**: recompile source files as they change (feature
//!   `hot-reload`)
//!
//! # Example
//!
//! ```
//! use vernacular_style::prelude::*;
//!
//! let compiler = Compiler::with_defaults()?;
//! let output = compiler.compile("页面 {\n  背景颜色: 白色\n  外边距: 0 自动\n}");
//!
//! assert_eq!(output.rules.value("body", "margin"), Some("0 auto"));
//! assert!(output.canonical.contains("background-color: white;"));
//! # Ok::<(), vernacular_style::Error>(())
//! ```

pub mod compile;
pub mod config;
pub mod coordinator;
pub mod decoration;
pub mod dictionary;
pub mod edits;
pub mod generator;
pub mod layout;
pub mod parser;
pub mod rules;
pub mod translate;

#[cfg(feature = "hot-reload")]
pub mod hot_reload;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::compile::{CompileOutput, Compiler};
    pub use crate::config::{AliasConfig, CompilerConfig, CoordinatorConfig, VernacularConfig};
    pub use crate::coordinator::{Coordinator, CoordinatorEvent, CoordinatorState};
    pub use crate::decoration::{
        DecorationEngine, DecorationRule, DocumentHost, ElementHandle, MemoryDocument, NodeHandle,
    };
    pub use crate::dictionary::Dictionary;
    pub use crate::edits::StyleEdits;
    pub use crate::generator::{GenerateOptions, Generator};
    pub use crate::layout::{AnchorPosition, LayoutIntent, LayoutMode, LayoutPreprocessor};
    pub use crate::parser::{LocalizedParser, ParseOutput, ParseWarning};
    pub use crate::rules::{PropertyMap, RuleMap, StyleRule};
    pub use crate::translate::ValueTranslator;

    #[cfg(feature = "hot-reload")]
    pub use crate::hot_reload::SourceWatcher;
}
