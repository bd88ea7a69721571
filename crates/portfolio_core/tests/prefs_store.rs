use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::prefs::{
    apply, Accent, CursorVariant, PrefField, PrefFields, PrefsHandle, PrefsMsg, PrefsStore,
    Theme, UiPrefs,
};

#[test]
fn apply_reports_only_changed_fields() {
    let prefs = UiPrefs::default();

    let (next, changed) = apply(prefs, PrefsMsg::ToggleTheme);
    assert_eq!(next.theme, Theme::Dark);
    assert_eq!(changed, PrefFields::only(PrefField::Theme));

    let (same, changed) = apply(next, PrefsMsg::SetTheme(Theme::Dark));
    assert_eq!(same, next);
    assert!(changed.is_empty());
}

#[test]
fn subscribers_hear_only_their_fields() {
    let theme_calls = Rc::new(RefCell::new(Vec::new()));
    let cursor_calls = Rc::new(RefCell::new(Vec::new()));
    let mut store = PrefsStore::new(UiPrefs::default());

    let sink = theme_calls.clone();
    store.subscribe(PrefFields::only(PrefField::Theme), move |prefs| {
        sink.borrow_mut().push(prefs.theme)
    });
    let sink = cursor_calls.clone();
    store.subscribe(PrefFields::only(PrefField::Cursor), move |prefs| {
        sink.borrow_mut().push(prefs.cursor)
    });

    store.dispatch(PrefsMsg::SetCursor(CursorVariant::Hover));
    store.dispatch(PrefsMsg::ToggleTheme);
    store.dispatch(PrefsMsg::SetAccent(Accent::Green));
    store.dispatch(PrefsMsg::SetCursor(CursorVariant::Hover));

    assert_eq!(*theme_calls.borrow(), vec![Theme::Dark]);
    assert_eq!(*cursor_calls.borrow(), vec![CursorVariant::Hover]);
    assert_eq!(store.prefs().accent, Accent::Green);
}

#[test]
fn unsubscribed_views_stop_receiving_updates() {
    let calls = Rc::new(RefCell::new(0));
    let handle = PrefsHandle::new(UiPrefs::default());
    let view = handle.clone();

    let counter = calls.clone();
    let id = view.subscribe(PrefFields::ALL, move |_| *counter.borrow_mut() += 1);

    handle.dispatch(PrefsMsg::SetAccent(Accent::Pink));
    assert!(view.unsubscribe(id));
    assert!(!view.unsubscribe(id));
    handle.dispatch(PrefsMsg::SetAccent(Accent::Orange));

    assert_eq!(*calls.borrow(), 1);
    assert_eq!(view.prefs().accent, Accent::Orange);
}

#[test]
fn pref_names_parse_case_insensitively() {
    assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
    assert_eq!("hidden".parse::<CursorVariant>(), Ok(CursorVariant::Hidden));
    assert_eq!(" purple ".parse::<Accent>(), Ok(Accent::Purple));
    let err = "teal".parse::<Accent>().unwrap_err();
    assert_eq!(err.to_string(), "unknown accent \"teal\"");
}

#[test]
fn field_sets_collect_and_intersect() {
    let set: PrefFields = [PrefField::Theme, PrefField::Accent].into_iter().collect();
    assert!(set.contains(PrefField::Theme));
    assert!(!set.contains(PrefField::Cursor));
    assert!(set.intersects(PrefFields::only(PrefField::Accent)));
    assert!(!set.intersects(PrefFields::only(PrefField::Cursor)));
}

#[test]
fn listeners_can_read_the_shared_handle() {
    let handle = PrefsHandle::new(UiPrefs::default());
    let seen = Rc::new(RefCell::new(Vec::new()));

    let view = handle.clone();
    let sink = seen.clone();
    handle.subscribe(PrefFields::only(PrefField::Theme), move |_| {
        sink.borrow_mut().push(view.prefs().theme)
    });

    handle.dispatch(PrefsMsg::ToggleTheme);
    handle.dispatch(PrefsMsg::ToggleTheme);

    assert_eq!(*seen.borrow(), vec![Theme::Dark, Theme::Light]);
}

#[test]
fn dispatch_from_a_listener_is_applied_after_the_current_round() {
    let handle = PrefsHandle::new(UiPrefs::default());
    let cursor_calls = Rc::new(RefCell::new(Vec::new()));

    // Dark mode switches the cursor to its hover style.
    let view = handle.clone();
    handle.subscribe(PrefFields::only(PrefField::Theme), move |prefs| {
        if prefs.theme == Theme::Dark {
            view.dispatch(PrefsMsg::SetCursor(CursorVariant::Hover));
        }
    });
    let sink = cursor_calls.clone();
    handle.subscribe(PrefFields::only(PrefField::Cursor), move |prefs| {
        sink.borrow_mut().push(prefs.cursor)
    });

    let changed = handle.dispatch(PrefsMsg::SetTheme(Theme::Dark));

    assert!(changed.contains(PrefField::Theme));
    assert!(changed.contains(PrefField::Cursor));
    assert_eq!(*cursor_calls.borrow(), vec![CursorVariant::Hover]);
    assert_eq!(
        handle.prefs(),
        UiPrefs {
            theme: Theme::Dark,
            cursor: CursorVariant::Hover,
            accent: Accent::Blue,
        }
    );
}

#[test]
fn listeners_can_unsubscribe_and_subscribe_while_notified() {
    let handle = PrefsHandle::new(UiPrefs::default());
    let once_calls = Rc::new(RefCell::new(0));
    let late_calls = Rc::new(RefCell::new(0));
    let own_id = Rc::new(RefCell::new(None));

    let view = handle.clone();
    let counter = once_calls.clone();
    let id_slot = own_id.clone();
    let late = late_calls.clone();
    let id = handle.subscribe(PrefFields::ALL, move |_| {
        *counter.borrow_mut() += 1;
        if let Some(id) = id_slot.borrow_mut().take() {
            assert!(view.unsubscribe(id));
            let late = late.clone();
            view.subscribe(PrefFields::ALL, move |_| *late.borrow_mut() += 1);
        }
    });
    *own_id.borrow_mut() = Some(id);

    handle.dispatch(PrefsMsg::SetAccent(Accent::Green));
    handle.dispatch(PrefsMsg::SetAccent(Accent::Pink));

    assert_eq!(*once_calls.borrow(), 1);
    assert_eq!(*late_calls.borrow(), 1);
    assert!(!handle.unsubscribe(id));
}
