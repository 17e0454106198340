//! Integration tests for the footer visibility controller.
//!
//! Tests cover:
//! - Threshold and force-override priority
//! - Scoped acquisition and reset on drop
//! - Pager overlap detection
//! - Change notification

mod common;

use projdash::core::overlaps;

use common::*;

#[test]
fn test_threshold_decides_when_not_forced() {
    let settings = FooterSettings {
        threshold: Some(578),
        force_compact: None,
    };
    assert!(!settings.should_compact(MEDIUM_VIEWPORT));
    assert!(settings.should_compact(SHORT_VIEWPORT));
    assert!(settings.should_compact(578));
}

#[test]
fn test_force_overrides_threshold() {
    let forced_on = FooterSettings {
        threshold: Some(578),
        force_compact: Some(true),
    };
    assert!(forced_on.should_compact(SHORT_VIEWPORT));
    assert!(forced_on.should_compact(TALL_VIEWPORT));

    let forced_off = FooterSettings {
        threshold: Some(578),
        force_compact: Some(false),
    };
    assert!(!forced_off.should_compact(SHORT_VIEWPORT));
}

#[test]
fn test_no_threshold_never_compacts() {
    assert!(!FooterSettings::default().should_compact(0));
}

#[test]
fn test_controller_scenario() {
    let state = FooterState::new();
    state.set_threshold(Some(578));
    let mut controller = FooterController::new(state.clone(), MEDIUM_VIEWPORT);
    assert!(!controller.is_compact());

    assert!(controller.resize(SHORT_VIEWPORT));

    state.set_force_compact(Some(true));
    assert!(controller.refresh());

    state.set_force_compact(Some(false));
    assert!(!controller.refresh());

    state.clear_force();
    assert!(controller.refresh());
}

#[test]
fn test_refresh_without_changes_keeps_last_answer() {
    let state = FooterState::new();
    state.set_threshold(Some(578));
    let mut controller = FooterController::new(state, SHORT_VIEWPORT);
    assert!(controller.is_compact());
    assert!(controller.refresh());
}

#[test]
fn test_scope_resets_both_fields_on_drop() {
    let state = FooterState::new();
    {
        let scope = state.acquire(Some(675));
        scope.state().set_force_compact(Some(true));
        assert_eq!(
            state.settings(),
            FooterSettings {
                threshold: Some(675),
                force_compact: Some(true),
            }
        );
    }
    assert_eq!(state.settings(), FooterSettings::default());
}

#[test]
fn test_acquire_clears_a_leftover_force() {
    let state = FooterState::new();
    state.set_force_compact(Some(false));
    let _scope = state.acquire(Some(735));
    assert_eq!(state.settings().force_compact, None);
    assert_eq!(state.settings().threshold, Some(735));
}

#[test]
fn test_next_page_does_not_inherit_previous_threshold() {
    let state = FooterState::new();
    let mut controller = FooterController::new(state.clone(), SHORT_VIEWPORT);

    let register = state.acquire(Some(675));
    assert!(controller.navigated());
    drop(register);

    let _login = state.acquire(None);
    assert!(!controller.navigated());
}

#[test]
fn test_overlap_geometry() {
    let pager = Span::new(100.0, 140.0);
    assert!(overlaps(pager, Span::new(130.0, 180.0)));
    assert!(overlaps(pager, Span::new(80.0, 110.0)));
    assert!(overlaps(pager, Span::new(110.0, 120.0)));
    assert!(!overlaps(pager, Span::new(140.0, 180.0)));
    assert!(!overlaps(pager, Span::new(40.0, 100.0)));
}

#[test]
fn test_pager_overlap_forces_compact_then_clears() {
    let state = FooterState::new();
    let _scope = state.acquire(Some(578));
    let mut controller = FooterController::new(state.clone(), TALL_VIEWPORT);
    assert!(!controller.is_compact());

    let colliding = LayoutSnapshot {
        pager: Some(Span::new(820.0, 860.0)),
        footer: Some(Span::new(850.0, 900.0)),
    };
    assert!(controller.detect_pager_overlap(&colliding));
    assert_eq!(state.settings().force_compact, Some(true));

    let apart = LayoutSnapshot {
        pager: Some(Span::new(600.0, 640.0)),
        footer: Some(Span::new(850.0, 900.0)),
    };
    assert!(!controller.detect_pager_overlap(&apart));
    assert_eq!(state.settings().force_compact, None);
}

#[test]
fn test_pager_outside_viewport_does_not_force() {
    let state = FooterState::new();
    let mut controller = FooterController::new(state.clone(), MEDIUM_VIEWPORT);

    let below_fold = LayoutSnapshot {
        pager: Some(Span::new(650.0, 700.0)),
        footer: Some(Span::new(640.0, 720.0)),
    };
    assert!(!controller.detect_pager_overlap(&below_fold));

    let missing_footer = LayoutSnapshot {
        pager: Some(Span::new(100.0, 140.0)),
        footer: None,
    };
    assert!(!controller.detect_pager_overlap(&missing_footer));
    assert_eq!(state.settings().force_compact, None);
}

#[test]
fn test_no_overlap_falls_back_to_threshold() {
    let state = FooterState::new();
    let _scope = state.acquire(Some(578));
    let mut controller = FooterController::new(state, SHORT_VIEWPORT);

    let apart = LayoutSnapshot {
        pager: Some(Span::new(100.0, 140.0)),
        footer: Some(Span::new(450.0, 500.0)),
    };
    assert!(controller.detect_pager_overlap(&apart));
}

#[test]
fn test_compact_subscribers_only_see_changes() {
    let state = FooterState::new();
    state.set_threshold(Some(578));
    let mut controller = FooterController::new(state, TALL_VIEWPORT);
    let mut rx = controller.subscribe();

    controller.resize(MEDIUM_VIEWPORT);
    assert!(!rx.has_changed().unwrap());

    controller.resize(SHORT_VIEWPORT);
    assert!(rx.has_changed().unwrap());
    assert!(*rx.borrow_and_update());

    controller.recompute(Trigger::Scroll);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_controller_reacts_to_state_changes() -> anyhow::Result<()> {
    let state = FooterState::new();
    let mut controller = FooterController::new(state.clone(), SHORT_VIEWPORT);

    let writer = state.clone();
    let handle = tokio::spawn(async move {
        writer.set_threshold(Some(578));
    });

    assert!(controller.next_state_change().await);
    handle.await?;
    Ok(())
}
