use crate::LayoutError;
use crate::break_token::{self, BreakToken};
use crate::config::LayoutConfig;
use crate::extract;
use crate::hooks::LayoutHooks;
use crate::monitor::{OverflowCallback, UnderflowCallback};
use crate::node_kind::{NodeKind, classify};
use crate::overflow::{self, OverflowRange};
use crate::perf::{DebugProfiler, NoOpProfiler, Profiler};
use crate::render::render;
use crate::walker::Walker;
use folio_dom::{Display, Fragment, NodeId, Tree, text};
use folio_traits::{
    BreakRules, ChannelTaskQueue, DeferredTask, GeometryOracle, StyleBreakRules, TaskQueue,
};
use folio_types::BoxRect;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Fills one destination box per call to [`layout`](Self::layout) and
/// reports where the next page must resume.
///
/// The engine owns the destination of the current page. Everything that
/// happens after a pass (size changes, late overflow, prepended content) is
/// routed through the task queue and handled by
/// [`run_pending`](Self::run_pending).
pub struct LayoutEngine {
    pub(crate) config: LayoutConfig,
    pub(crate) oracle: Arc<dyn GeometryOracle>,
    rules: Arc<dyn BreakRules>,
    pub(crate) queue: Arc<dyn TaskQueue>,
    pub profiler: Box<dyn Profiler>,
    pub(crate) destination: Tree,
    available: BoxRect,
    hooks: LayoutHooks,
    pub(crate) on_overflow: Option<OverflowCallback>,
    pub(crate) on_underflow: Option<UnderflowCallback>,
    pub(crate) listening: bool,
    /// Cross-axis extent of the destination when it last settled.
    pub(crate) baseline: Option<f32>,
    pub(crate) busy: bool,
}

impl LayoutEngine {
    pub fn new(oracle: Arc<dyn GeometryOracle>, config: LayoutConfig) -> Self {
        // Simple strategy: use DebugProfiler if feature enabled, else NoOp
        let profiler: Box<dyn Profiler> = if cfg!(feature = "profiling") {
            Box::new(DebugProfiler::new())
        } else {
            Box::new(NoOpProfiler)
        };

        Self {
            config,
            oracle,
            rules: Arc::new(StyleBreakRules),
            queue: Arc::new(ChannelTaskQueue::new()),
            profiler,
            destination: Tree::new(),
            available: BoxRect::default(),
            hooks: LayoutHooks::new(),
            on_overflow: None,
            on_underflow: None,
            listening: false,
            baseline: None,
            busy: false,
        }
    }

    pub fn with_break_rules(mut self, rules: Arc<dyn BreakRules>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_task_queue(mut self, queue: Arc<dyn TaskQueue>) -> Self {
        self.queue = queue;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn available(&self) -> BoxRect {
        self.available
    }

    /// The destination box of the current page.
    pub fn destination(&self) -> &Tree {
        &self.destination
    }

    /// Host-side access to the settled page, for changes made outside the
    /// engine (late-loading media, restyling). Follow up with a size-change
    /// notification or [`check_overflow`](Self::check_overflow).
    pub fn destination_mut(&mut self) -> &mut Tree {
        &mut self.destination
    }

    /// Hands the current page's destination to the caller, leaving an empty
    /// one behind.
    pub fn take_destination(&mut self) -> Tree {
        self.listening = false;
        self.baseline = None;
        std::mem::take(&mut self.destination)
    }

    pub fn hooks_mut(&mut self) -> &mut LayoutHooks {
        &mut self.hooks
    }

    /// Lays out `content` into a fresh destination box of size `available`,
    /// starting at `token` (or at the beginning of `content`).
    ///
    /// Returns the token the next page must resume from, or `None` once the
    /// content is exhausted.
    pub fn layout(
        &mut self,
        available: BoxRect,
        content: &Tree,
        token: Option<&BreakToken>,
    ) -> Result<Option<BreakToken>, LayoutError> {
        if self.busy {
            return Err(LayoutError::PassInProgress);
        }
        if let Some(token) = token {
            validate_token(content, token)?;
        }

        self.busy = true;
        let start = Instant::now();
        self.destination = Tree::new();
        self.available = available;
        self.listening = false;
        self.baseline = None;

        let result = self.run_pass(content, token);

        self.busy = false;
        self.profiler.record("layout", start.elapsed());
        self.profiler.record_page(start.elapsed());

        if self.config.observe_resize {
            if let Err(e) = self.queue.schedule(DeferredTask::AttachObservers) {
                log::warn!("Could not schedule observers on '{}' queue: {}", self.queue.name(), e);
            }
        }

        match &result {
            Ok(Some(next)) => log::debug!(
                "Page broke; resuming at {} offset {}.",
                next.node,
                next.offset
            ),
            Ok(None) => log::debug!("Content exhausted."),
            Err(e) => log::warn!("Layout pass failed: {}", e),
        }
        result
    }

    fn run_pass(
        &mut self,
        content: &Tree,
        token: Option<&BreakToken>,
    ) -> Result<Option<BreakToken>, LayoutError> {
        let start = token.map(|t| t.node).unwrap_or(content.root());
        let mut walker = Walker::new(content, start, content.root());
        let interval = self.config.check_interval();
        let mut has_content = false;
        let mut check = 0;

        loop {
            let next = walker.next();
            if let Some(node) = next {
                self.hooks.layout_node(content, node);

                if has_content && self.rules.demands_break_before(content, node) {
                    log::debug!("Forced break before {}.", node);
                    if self.has_overflow() {
                        if let Some(outcome) = self.settle_overflow(content, token) {
                            return Ok(outcome);
                        }
                    }
                    return Ok(Some(BreakToken::at(node)));
                }

                let kind = classify(content, node);
                let shallow = kind == NodeKind::Container;
                let clone = render(content, &mut self.destination, node, token, shallow)?;
                self.hooks.render_node(content, node, &self.destination, clone);

                if !has_content {
                    has_content = self.is_visible_unit(content, node, clone, kind);
                }
                if !shallow {
                    walker.skip_children(node);
                }
                check += 1;
            }

            let exhausted = next.is_none();
            if exhausted || check >= interval {
                check = 0;
                if self.has_overflow() {
                    self.profiler.count_hit();
                    if let Some(outcome) = self.settle_overflow(content, token) {
                        return Ok(outcome);
                    }
                    log::trace!("Extent overflows but no node crosses the edge.");
                } else {
                    self.profiler.count_miss();
                }
            }
            if exhausted {
                return Ok(None);
            }
        }
    }

    /// Locates the overflow, resolves its break token and extracts it.
    ///
    /// `None` means no node crosses the edge. `Some(None)` means the
    /// overflow could not be mapped back to content; the page keeps it all.
    fn settle_overflow(
        &mut self,
        content: &Tree,
        incoming: Option<&BreakToken>,
    ) -> Option<Option<BreakToken>> {
        let range = self.overflow()?;
        let token = self.find_break_token(&range, content);
        match token {
            Some(t) if incoming == Some(&t) => {
                log::warn!(
                    "Break at {} offset {} would repeat this page; keeping the overflow.",
                    t.node,
                    t.offset
                );
                Some(None)
            }
            Some(t) => {
                self.remove_overflow(range);
                Some(Some(t))
            }
            None => Some(None),
        }
    }

    /// Visible content placed by `clone`: non-blank text, or a displayed
    /// element that is atomic or has no children in `content`.
    fn is_visible_unit(&self, content: &Tree, node: NodeId, clone: NodeId, kind: NodeKind) -> bool {
        let dest = &self.destination;
        match kind {
            NodeKind::Hidden => false,
            NodeKind::Container if !content.children(node).is_empty() => false,
            NodeKind::Atomic if dest.text(clone).is_some_and(text::is_blank) => false,
            NodeKind::Atomic | NodeKind::Container => {
                self.oracle.computed_display(dest, clone) != Display::None
            }
        }
    }

    /// Cheap pre-check: does the destination's content extent along the
    /// flow axis exceed the available box?
    ///
    /// An unmeasurable destination counts as fitting.
    pub fn has_overflow(&self) -> bool {
        let axis = self.config.flow_axis;
        match self.oracle.content_extent(&self.destination) {
            Some(extent) => extent.along(axis).floor() > self.available.extent(axis).round(),
            None => {
                log::debug!("Oracle '{}' could not measure the destination.", self.oracle.name());
                false
            }
        }
    }

    /// Runs the overflow locator over the destination and fires the
    /// overflow hooks for a located range.
    pub fn overflow(&mut self) -> Option<OverflowRange> {
        let start = Instant::now();
        let range = overflow::find_overflow(
            self.oracle.as_ref(),
            &self.destination,
            self.available,
            self.config.flow_axis,
        );
        self.profiler.record("overflow", start.elapsed());

        if let Some(range) = &range {
            log::trace!("Overflow starts at {:?}.", range.start);
            self.hooks.overflow(&self.destination, range);
        }
        range
    }

    pub fn find_break_token(&self, range: &OverflowRange, content: &Tree) -> Option<BreakToken> {
        break_token::find_break_token(range, &self.destination, content)
    }

    /// Extracts `range` from the destination.
    pub fn remove_overflow(&mut self, range: OverflowRange) -> Fragment {
        let start = Instant::now();
        let fragment = extract::remove_overflow(&mut self.destination, &range, self.config.hyphen);
        self.profiler.record("extract", start.elapsed());
        fragment
    }
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .field("oracle", &self.oracle.name())
            .field("queue", &self.queue.name())
            .field("available", &self.available)
            .field("hooks", &self.hooks)
            .field("listening", &self.listening)
            .field("busy", &self.busy)
            .finish()
    }
}

fn validate_token(content: &Tree, token: &BreakToken) -> Result<(), LayoutError> {
    if !content.contains(token.node) {
        return Err(LayoutError::DetachedBreakToken(token.node));
    }
    if let Some(t) = content.text(token.node) {
        let len = text::char_len(t);
        if token.offset > len {
            return Err(LayoutError::OffsetOutOfBounds {
                node: token.node,
                offset: token.offset,
                len,
            });
        }
    }
    Ok(())
}
