//! Footer compaction state shared by every page of an app.
//!
//! Pages declare how tall the viewport must be before the footer shrinks
//! (`threshold`) and may force the decision either way (`force_compact`). The
//! [`FooterController`] folds those settings and the current viewport height
//! into one published boolean.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FooterSettings {
    /// Viewport height (px) at or below which the footer compacts. `None` disables auto-compaction.
    pub threshold: Option<u32>,
    /// `Some(true)` forces compact, `Some(false)` forces expanded, `None` defers to `threshold`.
    pub force_compact: Option<bool>,
}

impl FooterSettings {
    pub fn should_compact(&self, viewport_height: u32) -> bool {
        match self.force_compact {
            Some(force) => force,
            None => self
                .threshold
                .is_some_and(|threshold| viewport_height <= threshold),
        }
    }
}

/// Handle on the footer settings of one app. Clones share the same settings.
#[derive(Debug, Clone)]
pub struct FooterState {
    tx: Arc<watch::Sender<FooterSettings>>,
}

impl FooterState {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FooterSettings::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn settings(&self) -> FooterSettings {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<FooterSettings> {
        self.tx.subscribe()
    }

    pub fn set_threshold(&self, px: Option<u32>) {
        self.tx.send_if_modified(|s| replace(&mut s.threshold, px));
    }

    pub fn clear_threshold(&self) {
        self.set_threshold(None);
    }

    pub fn set_force_compact(&self, force: Option<bool>) {
        self.tx.send_if_modified(|s| replace(&mut s.force_compact, force));
    }

    pub fn clear_force(&self) {
        self.set_force_compact(None);
    }

    /// Clears every override. Called whenever a page goes away.
    pub fn reset_all(&self) {
        self.tx.send_if_modified(|s| {
            let changed = *s != FooterSettings::default();
            *s = FooterSettings::default();
            changed
        });
    }

    /// Applies a page's threshold in auto mode and returns a guard that resets
    /// both fields when dropped.
    pub fn acquire(&self, threshold: Option<u32>) -> FooterScope {
        self.set_threshold(threshold);
        self.set_force_compact(None);
        FooterScope {
            state: self.clone(),
        }
    }
}

impl Default for FooterState {
    fn default() -> Self {
        Self::new()
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Footer settings held by the page that is currently shown.
#[derive(Debug)]
#[must_use = "dropping the scope resets the footer immediately"]
pub struct FooterScope {
    state: FooterState,
}

impl FooterScope {
    pub fn state(&self) -> &FooterState {
        &self.state
    }
}

impl Drop for FooterScope {
    fn drop(&mut self) {
        self.state.reset_all();
    }
}

/// Vertical extent of a laid-out element, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub bottom: f64,
}

impl Span {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn is_within_viewport(&self, viewport_height: u32) -> bool {
        self.bottom > 0.0 && self.top < f64::from(viewport_height)
    }
}

/// Whether two vertical extents intersect. Touching edges do not count.
pub fn overlaps(a: Span, b: Span) -> bool {
    b.top < a.bottom && b.bottom > a.top
}

/// Host-side layout measurement. `None` means the element is not rendered.
pub trait LayoutProbe {
    fn pager(&self) -> Option<Span>;
    fn footer(&self) -> Option<Span>;
}

/// Measurements captured by the host at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutSnapshot {
    pub pager: Option<Span>,
    pub footer: Option<Span>,
}

impl LayoutProbe for LayoutSnapshot {
    fn pager(&self) -> Option<Span> {
        self.pager
    }

    fn footer(&self) -> Option<Span> {
        self.footer
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Resize,
    Scroll,
    Navigation,
    StateChanged,
}

/// Decides whether the footer renders compact and publishes the answer.
#[derive(Debug)]
pub struct FooterController {
    state: FooterState,
    settings_rx: watch::Receiver<FooterSettings>,
    viewport_height: u32,
    compact_tx: watch::Sender<bool>,
}

impl FooterController {
    pub fn new(state: FooterState, viewport_height: u32) -> Self {
        let mut settings_rx = state.subscribe();
        let compact = settings_rx.borrow_and_update().should_compact(viewport_height);
        let (compact_tx, _rx) = watch::channel(compact);
        Self {
            state,
            settings_rx,
            viewport_height,
            compact_tx,
        }
    }

    pub fn state(&self) -> &FooterState {
        &self.state
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn is_compact(&self) -> bool {
        *self.compact_tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.compact_tx.subscribe()
    }

    /// Evaluates the settings against the current viewport and publishes the result.
    pub fn recompute(&mut self, trigger: Trigger) -> bool {
        let settings = *self.settings_rx.borrow_and_update();
        let compact = settings.should_compact(self.viewport_height);
        let changed = self.compact_tx.send_if_modified(|current| replace(current, compact));
        debug!(
            ?trigger,
            threshold = ?settings.threshold,
            force_compact = ?settings.force_compact,
            viewport_height = self.viewport_height,
            compact,
            changed,
            "footer recomputed"
        );
        compact
    }

    pub fn resize(&mut self, viewport_height: u32) -> bool {
        self.viewport_height = viewport_height;
        self.recompute(Trigger::Resize)
    }

    pub fn navigated(&mut self) -> bool {
        self.recompute(Trigger::Navigation)
    }

    /// Recomputes if the settings changed since the last evaluation.
    pub fn refresh(&mut self) -> bool {
        if self.settings_rx.has_changed().unwrap_or(false) {
            self.recompute(Trigger::StateChanged)
        } else {
            self.is_compact()
        }
    }

    /// Waits for the next settings change, then recomputes.
    pub async fn next_state_change(&mut self) -> bool {
        // The controller owns a `FooterState` clone, so the sender outlives this receiver.
        let _ = self.settings_rx.changed().await;
        self.recompute(Trigger::StateChanged)
    }

    /// Forces compaction while the pager collides with the footer on screen,
    /// otherwise hands the decision back to the threshold.
    pub fn detect_pager_overlap(&mut self, probe: &impl LayoutProbe) -> bool {
        let colliding = match (probe.pager(), probe.footer()) {
            (Some(pager), Some(footer)) => {
                pager.is_within_viewport(self.viewport_height) && overlaps(pager, footer)
            }
            _ => false,
        };
        self.state
            .set_force_compact(if colliding { Some(true) } else { None });
        self.recompute(Trigger::Scroll)
    }
}
