//! The idle/active coordinator.
//!
//! The coordinator owns the pipeline state and decides when to run it. It
//! is driven entirely by its caller: input events carry the current
//! [`Instant`], and [`Coordinator::tick`] fires whatever timers are due.
//! Nothing here sleeps or spawns.
//!
//! - `Active`: every debounced edit recompiles the latest input text.
//! - `Idle`: only newly appeared elements get their decorations.
//!
//! Any input activity enters `Active` and restarts the inactivity timer.
//! When it fires, the coordinator goes `Idle` and drops leftover decoration
//! nodes if the input no longer has decoration syntax.

use std::sync::Arc;
use std::time::{Duration, Instant};

use vernacular_core::logging::targets;
use vernacular_core::{Signal, TimerId, TimerManager};

use crate::Result;
use crate::compile::{CompileOutput, Compiler};
use crate::config::{CoordinatorConfig, VernacularConfig};
use crate::decoration::{DecorationEngine, DocumentHost, FlushReport};
use crate::edits::StyleEdits;
use crate::rules::RuleMap;

const TARGET: &str = targets::COORDINATOR;

/// Coordinator state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Waiting for input; only new elements are decorated.
    #[default]
    Idle,
    /// Input is being edited; the pipeline reruns on every quiet period.
    Active,
}

/// Something the coordinator did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorEvent {
    /// Input activity moved the coordinator from `Idle` to `Active`.
    Activated,
    /// The input was compiled and its output applied.
    Compiled {
        /// Number of parsed rules.
        rules: usize,
        /// Number of decoration rules.
        decorations: usize,
        /// Number of warnings.
        warnings: usize,
    },
    /// The input produced nothing usable; the previous output stays.
    KeptPrevious {
        /// Number of warnings.
        warnings: usize,
    },
    /// The inactivity timer fired.
    WentIdle {
        /// Decoration nodes removed because the input has no decorations.
        cleared: usize,
    },
}

/// Drives the compile pipeline from input events and timers.
#[derive(Debug)]
pub struct Coordinator {
    compiler: Compiler,
    config: CoordinatorConfig,
    timers: TimerManager,
    debounce: Option<TimerId>,
    idle: Option<TimerId>,
    state: CoordinatorState,
    input: String,
    output: Option<CompileOutput>,
    edits: StyleEdits,
    engine: DecorationEngine,
    events: Vec<CoordinatorEvent>,
    parsed_styles: Arc<Signal<RuleMap>>,
    canonical_changed: Arc<Signal<String>>,
}

impl Coordinator {
    /// Create a coordinator from configuration.
    pub fn new(config: &VernacularConfig) -> Result<Self> {
        Ok(Self::with_compiler(Compiler::new(config)?, config.coordinator.clone()))
    }

    /// Create a coordinator around an existing compiler.
    pub fn with_compiler(compiler: Compiler, config: CoordinatorConfig) -> Self {
        Self {
            compiler,
            config,
            timers: TimerManager::new(),
            debounce: None,
            idle: None,
            state: CoordinatorState::Idle,
            input: String::new(),
            output: None,
            edits: StyleEdits::new(),
            engine: DecorationEngine::new(),
            events: Vec::new(),
            parsed_styles: Arc::new(Signal::new()),
            canonical_changed: Arc::new(Signal::new()),
        }
    }

    /// The input text changed.
    ///
    /// The compile runs once the debounce window passes without further
    /// input, on whatever the input is at that point.
    pub fn on_input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.activate(now);
        self.arm_debounce(now);
    }

    /// The authoring surface gained focus.
    pub fn on_focus(&mut self, now: Instant) {
        self.activate(now);
    }

    /// Fire due timers. Returns what happened since the previous tick.
    #[tracing::instrument(skip_all, target = "vernacular_style::coordinator", level = "trace")]
    pub fn tick<H: DocumentHost + ?Sized>(&mut self, now: Instant, host: &mut H) -> Vec<CoordinatorEvent> {
        for id in self.timers.process_expired(now) {
            if self.debounce == Some(id) {
                self.debounce = None;
                self.run_compile();
            } else if self.idle == Some(id) {
                self.idle = None;
                self.go_idle(host);
            }
        }
        std::mem::take(&mut self.events)
    }

    /// A paint opportunity: apply pending decoration changes.
    pub fn on_frame<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> FlushReport {
        self.engine.flush(host)
    }

    /// Elements matching decoration selectors may have appeared.
    pub fn on_elements_appeared<H: DocumentHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.engine.materialize_new(host)
    }

    /// Write a canonical value from outside the text, e.g. a form control.
    ///
    /// The write is committed against the rules of the current input, even
    /// when that input has not been compiled yet. The input is regenerated
    /// from the result (decoration blocks kept as written) and the usual
    /// debounced compile is scheduled. An empty value removes the property.
    pub fn write(&mut self, selector: &str, property: &str, value: &str, now: Instant) {
        let latest = self.compiler.compile(&self.input);
        if !(latest.is_empty() && !latest.warnings.is_empty()) {
            self.edits.reset(latest.rules);
        }

        self.edits.write(selector, property, value);
        let rules = self.edits.commit();

        let mut text = self.compiler.generator().to_localized(rules);
        for block in self.compiler.decoration_parser().extract(&self.input).blocks {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&block);
            text.push('\n');
        }

        tracing::debug!(target: TARGET, selector, property, value, "external write");
        self.on_input(text, now);
    }

    /// The value a form control should show for `selector`/`property`.
    pub fn effective_value(&self, selector: &str, property: &str) -> Option<&str> {
        self.edits.effective_value(selector, property)
    }

    /// Time until the next timer is due, for scheduling the next tick.
    pub fn time_until_next(&mut self, now: Instant) -> Option<Duration> {
        self.timers.time_until_next(now)
    }

    /// Current state.
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// The latest input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The output currently in effect.
    pub fn output(&self) -> Option<&CompileOutput> {
        self.output.as_ref()
    }

    /// The canonical text currently in effect.
    pub fn canonical(&self) -> &str {
        self.output.as_ref().map_or("", |o| o.canonical.as_str())
    }

    /// The compiler in use.
    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }

    /// The decoration engine.
    pub fn decorations(&self) -> &DecorationEngine {
        &self.engine
    }

    /// Emitted with the parsed rules after each applied compile.
    pub fn parsed_styles(&self) -> &Arc<Signal<RuleMap>> {
        &self.parsed_styles
    }

    /// Emitted with the canonical text whenever it changes.
    pub fn canonical_changed(&self) -> &Arc<Signal<String>> {
        &self.canonical_changed
    }

    fn activate(&mut self, now: Instant) {
        if self.state == CoordinatorState::Idle {
            self.state = CoordinatorState::Active;
            self.events.push(CoordinatorEvent::Activated);
            tracing::debug!(target: TARGET, "idle -> active");
        }
        if let Some(old) = self.idle.take() {
            let _ = self.timers.stop(old);
        }
        self.idle = Some(self.timers.start_one_shot(now, self.config.idle_timeout()));
    }

    fn arm_debounce(&mut self, now: Instant) {
        if let Some(old) = self.debounce.take() {
            let _ = self.timers.stop(old);
        }
        self.debounce = Some(self.timers.start_one_shot(now, self.config.debounce()));
    }

    fn run_compile(&mut self) {
        let output = self.compiler.compile(&self.input);

        if output.is_empty() && !output.warnings.is_empty() && self.output.is_some() {
            tracing::warn!(
                target: TARGET,
                warnings = output.warnings.len(),
                "input produced no rules, keeping previous output"
            );
            self.events.push(CoordinatorEvent::KeptPrevious {
                warnings: output.warnings.len(),
            });
            return;
        }

        self.edits.reset(output.rules.clone());
        self.engine.reconcile(output.decorations.iter().cloned());

        let canonical_changed = self.canonical() != output.canonical;
        self.events.push(CoordinatorEvent::Compiled {
            rules: output.rules.len(),
            decorations: output.decorations.len(),
            warnings: output.warnings.len(),
        });
        self.parsed_styles.emit(output.rules.clone());
        if canonical_changed {
            self.canonical_changed.emit(output.canonical.clone());
        }
        self.output = Some(output);
    }

    fn go_idle<H: DocumentHost + ?Sized>(&mut self, host: &mut H) {
        self.state = CoordinatorState::Idle;
        let cleared = if self.compiler.contains_decorations(&self.input) {
            0
        } else {
            self.engine.clear(host)
        };
        self.events.push(CoordinatorEvent::WentIdle { cleared });
        tracing::debug!(target: TARGET, cleared, "active -> idle");
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::decoration::MemoryDocument;

    const SOURCE: &str = "页面 {\n颜色: 红色\n}\n";

    fn coordinator() -> Coordinator {
        Coordinator::new(&VernacularConfig::default()).unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn input_activates_and_compiles_after_debounce() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();

        c.on_input(SOURCE, t0);
        assert_eq!(c.state(), CoordinatorState::Active);
        assert_eq!(c.tick(t0 + ms(100), &mut doc), [CoordinatorEvent::Activated]);
        assert_eq!(c.canonical(), "");

        let events = c.tick(t0 + ms(300), &mut doc);
        assert!(matches!(events[0], CoordinatorEvent::Compiled { rules: 1, .. }));
        assert!(c.canonical().contains("color: red;"));
    }

    #[test]
    fn rapid_edits_compile_latest_text_once() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();

        c.on_input("页面 {\n颜色: 红色\n}", t0);
        c.on_input("页面 {\n颜色: 蓝色\n}", t0 + ms(200));
        let events = c.tick(t0 + ms(350), &mut doc);
        assert_eq!(events, [CoordinatorEvent::Activated]);

        let events = c.tick(t0 + ms(500), &mut doc);
        assert_eq!(events.len(), 1);
        assert!(c.canonical().contains("color: blue;"));
    }

    #[test]
    fn goes_idle_after_timeout_and_refocus_reactivates() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();

        c.on_input(SOURCE, t0);
        c.tick(t0 + ms(4999), &mut doc);
        assert_eq!(c.state(), CoordinatorState::Active);

        let events = c.tick(t0 + ms(5000), &mut doc);
        assert_eq!(events, [CoordinatorEvent::WentIdle { cleared: 0 }]);
        assert_eq!(c.state(), CoordinatorState::Idle);

        c.on_focus(t0 + ms(6000));
        assert_eq!(c.state(), CoordinatorState::Active);
        assert!(c.tick(t0 + ms(10_999), &mut doc).contains(&CoordinatorEvent::Activated));
        assert_eq!(c.state(), CoordinatorState::Active);
    }

    #[test]
    fn unparseable_input_keeps_previous_output() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();

        c.on_input(SOURCE, t0);
        c.tick(t0 + ms(300), &mut doc);
        c.on_input("页面 {\n没有冒号\n}", t0 + ms(400));
        let events = c.tick(t0 + ms(700), &mut doc);

        assert_eq!(events, [CoordinatorEvent::KeptPrevious { warnings: 1 }]);
        assert!(c.canonical().contains("color: red;"));
    }

    #[test]
    fn signals_fire_on_compile() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _guard = c
            .canonical_changed()
            .connect_scoped(move |css: &String| sink.lock().push(css.clone()));
        let rules_seen = Arc::new(Mutex::new(0));
        let rules_sink = Arc::clone(&rules_seen);
        c.parsed_styles().connect(move |rules: &RuleMap| *rules_sink.lock() = rules.len());

        let t0 = Instant::now();
        c.on_input(SOURCE, t0);
        c.tick(t0 + ms(300), &mut doc);
        c.on_input(SOURCE, t0 + ms(400));
        c.tick(t0 + ms(700), &mut doc);

        assert_eq!(seen.lock().len(), 1);
        assert_eq!(*rules_seen.lock(), 1);
    }

    #[test]
    fn write_regenerates_input_and_keeps_decorations() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();
        let source = "页面 {\n颜色: 红色\n}\n@卡片：角标 {\n宽度: 8像素\n}\n";

        c.on_input(source, t0);
        c.tick(t0 + ms(300), &mut doc);
        c.write("body", "color", "blue", t0 + ms(400));
        assert_eq!(c.effective_value("body", "color"), Some("blue"));
        assert!(c.input().contains("颜色：蓝色"));
        assert!(c.input().contains("@卡片：角标 {"));

        c.tick(t0 + ms(700), &mut doc);
        assert!(c.canonical().contains("color: blue;"));
        assert_eq!(c.output().unwrap().decorations.len(), 1);
    }

    #[test]
    fn write_keeps_text_typed_inside_the_debounce_window() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();

        c.on_input(SOURCE, t0);
        c.tick(t0 + ms(300), &mut doc);
        c.on_input("页面 {\n颜色: 红色\n}\n卡片 {\n宽度: 10像素\n}\n", t0 + ms(400));
        c.write("body", "color", "blue", t0 + ms(450));

        assert!(c.input().contains("宽度：10像素"));
        assert!(c.input().contains("颜色：蓝色"));

        c.tick(t0 + ms(750), &mut doc);
        assert!(c.canonical().contains(".card {"));
        assert!(c.canonical().contains("width: 10px;"));
        assert!(c.canonical().contains("color: blue;"));
    }

    #[test]
    fn next_deadline_is_debounce_then_idle() {
        let mut doc = MemoryDocument::new();
        let mut c = coordinator();
        let t0 = Instant::now();

        assert_eq!(c.time_until_next(t0), None);
        c.on_input(SOURCE, t0);
        assert_eq!(c.time_until_next(t0), Some(ms(300)));
        c.tick(t0 + ms(300), &mut doc);
        assert_eq!(c.time_until_next(t0 + ms(300)), Some(ms(4700)));
    }
}
