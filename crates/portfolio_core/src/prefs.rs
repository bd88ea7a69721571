//! Site-wide UI preferences (theme, cursor, accent) and a small store that
//! notifies subscribed views when the fields they watch change.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorVariant {
    #[default]
    Default,
    Hover,
    Text,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPref {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownPref {}

macro_rules! lowercase_names {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownPref;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => Err(UnknownPref { kind: $kind, value: raw.to_string() }),
                }
            }
        }
    };
}

lowercase_names!(Theme, "theme", { Light => "light", Dark => "dark" });
lowercase_names!(CursorVariant, "cursor", {
    Default => "default",
    Hover => "hover",
    Text => "text",
    Hidden => "hidden",
});
lowercase_names!(Accent, "accent", {
    Blue => "blue",
    Purple => "purple",
    Green => "green",
    Orange => "orange",
    Pink => "pink",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    pub theme: Theme,
    pub cursor: CursorVariant,
    pub accent: Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefField {
    Theme,
    Cursor,
    Accent,
}

impl PrefField {
    fn bit(self) -> u8 {
        match self {
            PrefField::Theme => 0b001,
            PrefField::Cursor => 0b010,
            PrefField::Accent => 0b100,
        }
    }
}

/// Set of [`PrefField`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefFields(u8);

impl PrefFields {
    pub const NONE: PrefFields = PrefFields(0);
    pub const ALL: PrefFields = PrefFields(0b111);

    pub fn only(field: PrefField) -> Self {
        PrefFields(field.bit())
    }

    pub fn with(self, field: PrefField) -> Self {
        PrefFields(self.0 | field.bit())
    }

    pub fn union(self, other: PrefFields) -> Self {
        PrefFields(self.0 | other.0)
    }

    pub fn contains(self, field: PrefField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn intersects(self, other: PrefFields) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<PrefField> for PrefFields {
    fn from_iter<I: IntoIterator<Item = PrefField>>(iter: I) -> Self {
        iter.into_iter().fold(PrefFields::NONE, PrefFields::with)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefsMsg {
    SetTheme(Theme),
    ToggleTheme,
    SetCursor(CursorVariant),
    SetAccent(Accent),
}

/// Pure setter: returns the new prefs and the fields that actually changed.
pub fn apply(prefs: UiPrefs, msg: PrefsMsg) -> (UiPrefs, PrefFields) {
    let mut next = prefs;
    match msg {
        PrefsMsg::SetTheme(theme) => next.theme = theme,
        PrefsMsg::ToggleTheme => next.theme = prefs.theme.toggled(),
        PrefsMsg::SetCursor(cursor) => next.cursor = cursor,
        PrefsMsg::SetAccent(accent) => next.accent = accent,
    }
    (next, diff(&prefs, &next))
}

pub fn diff(before: &UiPrefs, after: &UiPrefs) -> PrefFields {
    let mut changed = PrefFields::NONE;
    if before.theme != after.theme {
        changed = changed.with(PrefField::Theme);
    }
    if before.cursor != after.cursor {
        changed = changed.with(PrefField::Cursor);
    }
    if before.accent != after.accent {
        changed = changed.with(PrefField::Accent);
    }
    changed
}

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&UiPrefs)>;

struct Subscriber {
    id: SubscriptionId,
    watches: PrefFields,
    listener: Listener,
}

#[derive(Default)]
pub struct PrefsStore {
    prefs: UiPrefs,
    subscribers: Vec<Subscriber>,
    next_id: SubscriptionId,
}

impl fmt::Debug for PrefsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefsStore")
            .field("prefs", &self.prefs)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl PrefsStore {
    pub fn new(prefs: UiPrefs) -> Self {
        Self {
            prefs,
            ..Self::default()
        }
    }

    pub fn prefs(&self) -> UiPrefs {
        self.prefs
    }

    pub fn subscribe(
        &mut self,
        watches: PrefFields,
        listener: impl FnMut(&UiPrefs) + 'static,
    ) -> SubscriptionId {
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id: self.next_id,
            watches,
            listener: Box::new(listener),
        });
        self.next_id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|sub| sub.id != id);
        self.subscribers.len() != before
    }

    /// Applies `msg` and notifies the subscribers watching a changed field.
    pub fn dispatch(&mut self, msg: PrefsMsg) -> PrefFields {
        let (next, changed) = apply(self.prefs, msg);
        if changed.is_empty() {
            return changed;
        }
        self.prefs = next;
        for sub in &mut self.subscribers {
            if sub.watches.intersects(changed) {
                (sub.listener)(&self.prefs);
            }
        }
        changed
    }
}

/// Shared handle to one [`PrefsStore`], cloned into every view that needs it.
///
/// Listeners run with the store released, so they may read the handle,
/// subscribe, unsubscribe or dispatch. A dispatch issued from a listener is
/// queued and applied after the current round of notifications.
#[derive(Debug, Clone, Default)]
pub struct PrefsHandle(Rc<RefCell<Shared>>);

#[derive(Debug, Default)]
struct Shared {
    store: PrefsStore,
    queue: VecDeque<PrefsMsg>,
    dispatching: bool,
    notifying: Vec<SubscriptionId>,
    removed: Vec<SubscriptionId>,
}

impl PrefsHandle {
    pub fn new(prefs: UiPrefs) -> Self {
        Self(Rc::new(RefCell::new(Shared {
            store: PrefsStore::new(prefs),
            ..Shared::default()
        })))
    }

    pub fn prefs(&self) -> UiPrefs {
        self.0.borrow().store.prefs()
    }

    pub fn subscribe(
        &self,
        watches: PrefFields,
        listener: impl FnMut(&UiPrefs) + 'static,
    ) -> SubscriptionId {
        self.0.borrow_mut().store.subscribe(watches, listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut shared = self.0.borrow_mut();
        if shared.store.unsubscribe(id) {
            return true;
        }
        // The subscriber may be parked outside the store while listeners run.
        if shared.notifying.contains(&id) && !shared.removed.contains(&id) {
            shared.removed.push(id);
            return true;
        }
        false
    }

    /// Returns the fields changed by `msg` and anything it queued.
    ///
    /// Called from inside a listener, the message is queued and the empty
    /// set is returned; the outer dispatch reports it instead.
    pub fn dispatch(&self, msg: PrefsMsg) -> PrefFields {
        {
            let mut shared = self.0.borrow_mut();
            shared.queue.push_back(msg);
            if shared.dispatching {
                return PrefFields::NONE;
            }
            shared.dispatching = true;
        }

        let mut total = PrefFields::NONE;
        loop {
            let (prefs, changed, mut parked) = {
                let mut shared = self.0.borrow_mut();
                let Some(msg) = shared.queue.pop_front() else {
                    shared.dispatching = false;
                    break;
                };
                let (next, changed) = apply(shared.store.prefs, msg);
                if changed.is_empty() {
                    continue;
                }
                shared.store.prefs = next;
                let parked = std::mem::take(&mut shared.store.subscribers);
                shared.notifying = parked.iter().map(|sub| sub.id).collect();
                (next, changed, parked)
            };
            total = total.union(changed);

            for sub in &mut parked {
                if !sub.watches.intersects(changed) || self.0.borrow().removed.contains(&sub.id) {
                    continue;
                }
                (sub.listener)(&prefs);
            }

            let mut shared = self.0.borrow_mut();
            let removed = std::mem::take(&mut shared.removed);
            parked.retain(|sub| !removed.contains(&sub.id));
            // Keep subscription order: parked first, then those added meanwhile.
            parked.append(&mut shared.store.subscribers);
            shared.store.subscribers = parked;
            shared.notifying.clear();
        }
        total
    }
}
