//! The compile pipeline.
//!
//! [`Compiler::compile`] turns one localized source text into everything a
//! host needs: decoration rules, the parsed and layout-expanded rule maps,
//! regenerated localized text and canonical stylesheet text. Parsing is
//! cached by source content, so recompiling unchanged text is cheap.

mod cache;

pub use cache::{ParseCache, SourceSignature, fnv1a};

use std::sync::Arc;

use parking_lot::Mutex;
use vernacular_core::logging::targets;

use crate::Result;
use crate::config::VernacularConfig;
use crate::decoration::{DecorationParser, DecorationRule};
use crate::dictionary::Dictionary;
use crate::generator::{GenerateOptions, Generator};
use crate::layout::LayoutPreprocessor;
use crate::parser::{LocalizedParser, ParseOutput, ParseWarning};
use crate::rules::RuleMap;
use crate::translate::ValueTranslator;

/// Everything produced by one compile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOutput {
    /// Decoration rules in source order.
    pub decorations: Vec<DecorationRule>,
    /// Parsed rules as authored, before layout expansion.
    pub rules: RuleMap,
    /// Rules after layout intents were expanded.
    pub expanded: RuleMap,
    /// Localized source regenerated from `rules`, followed by the
    /// decoration blocks as written.
    pub localized: String,
    /// Canonical stylesheet text generated from `expanded`.
    pub canonical: String,
    /// Problems found in the source, in line order.
    pub warnings: Vec<ParseWarning>,
}

impl CompileOutput {
    /// Whether the source produced neither rules nor decorations.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.decorations.is_empty()
    }
}

/// Compiles localized source text.
#[derive(Debug)]
pub struct Compiler {
    dictionary: Arc<Dictionary>,
    parser: LocalizedParser,
    decorations: DecorationParser,
    generator: Generator,
    layout: LayoutPreprocessor,
    options: GenerateOptions,
    cache: Mutex<ParseCache>,
}

impl Compiler {
    /// Build a compiler from configuration.
    ///
    /// Fails only when a configured pattern does not compile.
    pub fn new(config: &VernacularConfig) -> Result<Self> {
        let dictionary = Arc::new(Dictionary::with_aliases(&config.aliases)?);
        let translator = ValueTranslator::new(Arc::clone(&dictionary));
        let parser = LocalizedParser::new(translator.clone());

        Ok(Self {
            decorations: DecorationParser::new(parser.clone())?,
            generator: Generator::new(translator),
            layout: LayoutPreprocessor::new(&config.compiler)?,
            options: GenerateOptions {
                use_important: config.compiler.use_important,
            },
            cache: Mutex::new(ParseCache::with_capacity(config.compiler.cache_capacity)),
            dictionary,
            parser,
        })
    }

    /// A compiler with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&VernacularConfig::default())
    }

    /// The alias dictionary in use.
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// The parser in use.
    pub fn parser(&self) -> &LocalizedParser {
        &self.parser
    }

    /// The generator in use.
    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// The decoration block parser in use.
    pub fn decoration_parser(&self) -> &DecorationParser {
        &self.decorations
    }

    /// Whether `source` contains decoration syntax.
    pub fn contains_decorations(&self, source: &str) -> bool {
        self.decorations.contains_decorations(source)
    }

    /// Compile a localized source text.
    #[tracing::instrument(skip_all, target = "vernacular_style::compile", level = "trace", fields(len = source.len()))]
    pub fn compile(&self, source: &str) -> CompileOutput {
        let extraction = self.decorations.extract(source);
        let parsed = self.parse_cached(&extraction.remainder);

        let expanded = self.layout.expand(&parsed.rules);
        let canonical = self.generator.to_canonical(&expanded, &self.options);

        let mut localized = self.generator.to_localized(&parsed.rules);
        for block in &extraction.blocks {
            if !localized.is_empty() {
                localized.push('\n');
            }
            localized.push_str(block);
            localized.push('\n');
        }

        let mut warnings = extraction.warnings;
        warnings.extend(parsed.warnings);
        warnings.sort_by_key(|w| w.line);

        tracing::debug!(
            target: targets::COMPILE,
            rules = parsed.rules.len(),
            decorations = extraction.rules.len(),
            warnings = warnings.len(),
            "compiled"
        );

        CompileOutput {
            decorations: extraction.rules,
            rules: parsed.rules,
            expanded,
            localized,
            canonical,
            warnings,
        }
    }

    /// Generate canonical text for an already-parsed rule map.
    pub fn canonical_for(&self, rules: &RuleMap) -> String {
        let expanded = self.layout.expand(rules);
        self.generator.to_canonical(&expanded, &self.options)
    }

    /// Drop all cached parse results.
    pub fn invalidate_cache(&self) {
        self.cache.lock().invalidate_all();
    }

    /// Number of cached parse results.
    pub fn cached_parses(&self) -> usize {
        self.cache.lock().len()
    }

    fn parse_cached(&self, source: &str) -> ParseOutput {
        let signature = SourceSignature::of(source);
        if let Some(hit) = self.cache.lock().get(&signature) {
            tracing::trace!(target: targets::COMPILE, "parse cache hit");
            return hit.clone();
        }

        let output = self.parser.parse(source);
        self.cache.lock().insert(signature, output.clone());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiler() -> Compiler {
        Compiler::with_defaults().unwrap()
    }

    #[test]
    fn compiles_rules_and_decorations() {
        let source = "页面 {\n背景颜色: 白色\n}\n@卡片：角标 {\n宽度: 8像素; 限制溢出: 是\n}\n";
        let output = compiler().compile(source);

        assert_eq!(output.rules.value("body", "background-color"), Some("white"));
        assert_eq!(output.decorations.len(), 1);
        assert!(output.decorations[0].contain_overflow);
        assert!(output.canonical.contains("background-color: white;"));
        assert!(output.localized.ends_with("@卡片：角标 {\n宽度: 8像素; 限制溢出: 是\n}\n"));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn repeated_source_hits_cache() {
        let compiler = compiler();
        let first = compiler.compile("页面 {\n颜色: 红色\n}");
        let second = compiler.compile("页面 {\n颜色: 红色\n}");

        assert_eq!(first, second);
        assert_eq!(compiler.cached_parses(), 1);

        compiler.invalidate_cache();
        assert_eq!(compiler.cached_parses(), 0);
    }

    #[test]
    fn warnings_are_ordered_by_line() {
        let source = "@不存在：光 {\n宽度: 1像素\n}\n页面 {\n没有冒号\n}\n";
        let output = compiler().compile(source);

        let lines: Vec<u32> = output.warnings.iter().map(|w| w.line).collect();
        assert_eq!(lines, [1, 5]);
    }

    #[test]
    fn malformed_decoration_block_is_reported() {
        let source = "@未知 {\n宽度: 1像素\n}\n页面 {\n颜色: 红色\n}\n";
        let output = compiler().compile(source);

        assert_eq!(output.rules.value("body", "color"), Some("red"));
        assert!(output.decorations.is_empty());
        assert!(
            output
                .warnings
                .iter()
                .any(|w| w.line == 1 && w.message.contains("unrecognized decoration block"))
        );
    }

    #[test]
    fn important_from_config() {
        let mut config = VernacularConfig::default();
        config.compiler.use_important = true;
        let compiler = Compiler::new(&config).unwrap();

        let output = compiler.compile("页面 {\n颜色: 红色\n}");
        assert!(output.canonical.contains("color: red !important;"));
    }

    #[test]
    fn bad_anchor_pattern_fails_construction() {
        let mut config = VernacularConfig::default();
        config.compiler.anchor_pattern = "([".to_string();
        assert!(Compiler::new(&config).is_err());
    }
}
