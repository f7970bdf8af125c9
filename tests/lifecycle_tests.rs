//! Construction, host-side teardown and disposal of the controller.

mod common;

use breakpoint_gutter::{Gutter, GutterEvent, TextEditor};
use common::{Harness, PATH, rows, toggle};
use std::path::Path;

#[test]
fn test_gutter_sits_after_line_numbers() {
    let h = Harness::new(&[]);

    let gutters = h.editor.gutters();
    let names: Vec<&str> = gutters.iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["line-number", "debugger-breakpoint"]);
    assert!(h.gutter().priority() > h.line_numbers().priority());
}

#[test]
fn test_gutter_starts_hidden_until_first_pass() {
    let h = Harness::without_path(&[3]);

    assert!(!h.gutter().is_visible());
    assert!(h.controller.last_pass().is_none());
}

#[test]
fn test_markers_never_invalidate_on_shrink() {
    let h = Harness::new(&[2]);

    let id = h.controller.marker_at(2).unwrap();
    let marker = h.editor.marker(id).unwrap();
    assert!(marker.options().never_invalidate_on_shrink);
}

#[test]
fn test_dispose_releases_everything() {
    let mut h = Harness::new(&[2, 5]);
    h.hover(8);
    let gutter = h.gutter();
    let marker = h.editor.marker(h.controller.marker_at(2).unwrap()).unwrap();
    assert_eq!(h.store.listener_count(h.path()), 1);
    assert_eq!(h.editor.live_marker_count(), 3);

    h.controller.dispose();

    assert!(h.controller.is_disposed());
    assert_eq!(h.controller.subscription_count(), 0);
    assert_eq!(h.store.listener_count(h.path()), 0);
    assert_eq!(h.line_numbers().pointer_listener_count(), 0);
    assert_eq!(marker.change_listener_count(), 0);
    assert!(marker.is_destroyed());
    assert_eq!(h.editor.live_marker_count(), 0);
    assert!(gutter.is_destroyed());
    assert_eq!(gutter.pointer_listener_count(), 0);
    assert!(h.controller.committed_rows().is_empty());
    assert_eq!(h.controller.shadow_row(), None);
}

#[test]
fn test_dispose_is_idempotent() {
    let mut h = Harness::new(&[2, 5]);

    h.controller.dispose();
    let destroyed = h.controller.anchors().destroyed_total();
    h.controller.dispose();

    assert_eq!(h.controller.anchors().destroyed_total(), destroyed);
}

#[test]
fn test_disposed_controller_ignores_store_changes() {
    let mut h = Harness::new(&[2]);
    h.controller.dispose();

    h.store.add(h.path(), 9);

    assert_eq!(h.controller.process_pending_events(), 0);
    h.controller.update();
    assert!(h.controller.committed_rows().is_empty());
    assert_eq!(h.editor.live_marker_count(), 0);
}

#[test]
fn test_drop_disposes() {
    let h = Harness::new(&[2, 5]);
    let gutter = h.gutter();
    let Harness {
        editor,
        store,
        controller,
        ..
    } = h;

    drop(controller);

    assert!(gutter.is_destroyed());
    assert_eq!(editor.live_marker_count(), 0);
    assert_eq!(store.listener_count(Path::new(PATH)), 0);
}

#[test]
fn test_external_gutter_destroy_stops_updates() {
    let mut h = Harness::new(&[2]);
    let created = h.controller.anchors().created_total();

    h.gutter().destroy();
    h.controller.process_pending_events();
    assert!(!h.controller.is_gutter_active());

    h.store.add(h.path(), 9);
    h.controller.process_pending_events();

    assert_eq!(h.controller.anchors().created_total(), created);
    assert_eq!(h.controller.committed_rows(), rows(&[2]));

    // Disposing afterwards must not touch the gone gutter again.
    h.controller.dispose();
    assert_eq!(h.editor.live_marker_count(), 0);
}

#[test]
fn test_editor_destroy_notifies_owner_once() {
    let mut h = Harness::new(&[2]);

    h.editor.destroy();
    h.controller.process_pending_events();

    assert_eq!(h.notified.get(), 1);
    assert!(!h.controller.is_editor_active());
    assert!(!h.controller.is_gutter_active());

    h.editor.destroy();
    h.controller.handle_event(GutterEvent::EditorDestroyed);
    h.controller.process_pending_events();
    assert_eq!(h.notified.get(), 1);
}

#[test]
fn test_editor_destroy_then_store_change_is_ignored() {
    let mut h = Harness::new(&[2]);
    h.editor.destroy();
    h.controller.process_pending_events();

    h.store.add(h.path(), 6);
    h.controller.process_pending_events();

    assert_eq!(h.controller.anchors().created_total(), 1);
}

#[test]
fn test_editor_without_path_skips_store() {
    let mut h = Harness::without_path(&[3]);

    assert!(h.controller.committed_rows().is_empty());
    assert_eq!(h.store.listener_count(h.path()), 0);

    h.click(5);
    assert!(h.actions.log().is_empty());
    assert_eq!(h.store_rows(), rows(&[3]));

    h.hover(5);
    assert_eq!(h.controller.shadow_row(), Some(5));
}

#[test]
fn test_path_is_captured_at_construction() {
    let mut h = Harness::new(&[2]);

    h.editor.set_path(Some("/src/renamed.rs".into()));
    h.store.add(h.path(), 6);
    h.controller.process_pending_events();

    assert_eq!(h.controller.path(), Some(Path::new(PATH)));
    assert_eq!(h.controller.committed_rows(), rows(&[2, 6]));

    h.click(8);
    assert_eq!(h.actions.log(), vec![toggle(8)]);
    assert_eq!(h.store_rows(), rows(&[2, 6, 8]));
}
