//! Scroll-spy for the table of contents
//!
//! [`ScrollSpy`] tracks which heading section is in view. Layout is read
//! through [`SectionOffsets`] so the selection rule works without a real
//! rendering surface. Scroll and resize events only mark a frame as pending;
//! the active section is recomputed at most once per frame in
//! [`ScrollSpy::on_frame`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::content::TocEntry;

/// Allowance for the fixed page header
pub const DEFAULT_OFFSET: f64 = 100.0;

/// Live layout of the tracked sections
pub trait SectionOffsets {
    /// `(id, top offset)` of each section, in document order
    fn section_offsets(&self) -> Vec<(String, f64)>;
}

impl SectionOffsets for Vec<(String, f64)> {
    fn section_offsets(&self) -> Vec<(String, f64)> {
        self.clone()
    }
}

impl SectionOffsets for [(&str, f64)] {
    fn section_offsets(&self) -> Vec<(String, f64)> {
        self.iter().map(|(id, top)| (id.to_string(), *top)).collect()
    }
}

/// Index of the last entry in `ids` whose section starts at or above
/// `threshold`. Ids absent from `layout` are never selected.
pub fn active_index(ids: &[String], layout: &[(String, f64)], threshold: f64) -> Option<usize> {
    let tops: HashMap<&str, f64> = layout.iter().map(|(id, top)| (id.as_str(), *top)).collect();

    ids.iter()
        .enumerate()
        .filter(|(_, id)| tops.get(id.as_str()).is_some_and(|top| *top <= threshold))
        .map(|(index, _)| index)
        .last()
}

/// Viewport notifications the spy reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Scroll { position: f64 },
    Resize { position: f64 },
}

impl ViewportEvent {
    pub fn position(&self) -> f64 {
        match self {
            ViewportEvent::Scroll { position } | ViewportEvent::Resize { position } => *position,
        }
    }
}

/// Active-section state for one table of contents
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    ids: Vec<String>,
    offset: f64,
    active: Option<usize>,
    position: f64,
    frame_pending: bool,
}

impl ScrollSpy {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            offset: DEFAULT_OFFSET,
            active: None,
            position: 0.0,
            frame_pending: false,
        }
    }

    /// Track the headings of a table of contents
    pub fn from_toc(entries: &[TocEntry]) -> Self {
        Self::new(entries.iter().map(|e| e.id.clone()))
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Record an event. Returns true when a new frame has to be scheduled.
    pub fn notify(&mut self, event: ViewportEvent) -> bool {
        self.position = event.position();
        let schedule = !self.frame_pending;
        self.frame_pending = true;
        schedule
    }

    /// Recompute the active section if any event arrived since the last frame
    pub fn on_frame<L: SectionOffsets + ?Sized>(&mut self, layout: &L) -> Option<usize> {
        if std::mem::take(&mut self.frame_pending) {
            self.recompute(layout);
        }
        self.active
    }

    /// Recompute immediately for a known scroll position
    pub fn refresh<L: SectionOffsets + ?Sized>(&mut self, position: f64, layout: &L) -> Option<usize> {
        self.position = position;
        self.frame_pending = false;
        self.recompute(layout);
        self.active
    }

    /// Activate an entry ahead of the scroll it triggers.
    ///
    /// Returns the anchor href to navigate to, or `None` for an index out of
    /// range.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let id = self.ids.get(index)?;
        self.active = Some(index);
        Some(format!("#{}", id))
    }

    fn recompute<L: SectionOffsets + ?Sized>(&mut self, layout: &L) {
        if self.ids.is_empty() {
            self.active = None;
            return;
        }
        let offsets = layout.section_offsets();
        let next = active_index(&self.ids, &offsets, self.position + self.offset);
        if next != self.active {
            tracing::trace!("Active section {:?} -> {:?}", self.active, next);
        }
        self.active = next;
    }

    /// Listen to `viewport` until the returned subscription is dropped
    pub fn attach(spy: &Rc<RefCell<ScrollSpy>>, viewport: &Viewport) -> Subscription {
        let spy = Rc::downgrade(spy);
        viewport.subscribe(move |event| {
            if let Some(spy) = spy.upgrade() {
                spy.borrow_mut().notify(event);
            }
        })
    }
}

type Listener = Box<dyn FnMut(ViewportEvent)>;
type ListenerList = RefCell<Vec<(u64, Listener)>>;

/// Source of scroll and resize events
#[derive(Default)]
pub struct Viewport {
    listeners: Rc<ListenerList>,
    next_id: Cell<u64>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(ViewportEvent) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver an event to every listener.
    ///
    /// Listeners must not subscribe or unsubscribe while being dispatched to.
    pub fn dispatch(&self, event: ViewportEvent) {
        for (_, listener) in self.listeners.borrow_mut().iter_mut() {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Listener registration, released on drop
#[must_use = "dropping a subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<(String, f64)> {
        vec![
            ("intro".to_string(), 0.0),
            ("setup".to_string(), 500.0),
            ("usage".to_string(), 1000.0),
        ]
    }

    fn spy() -> ScrollSpy {
        ScrollSpy::new(["intro", "setup", "usage"])
    }

    /// Layout that counts how often it was read
    struct CountingLayout {
        inner: Vec<(String, f64)>,
        reads: Cell<usize>,
    }

    impl SectionOffsets for CountingLayout {
        fn section_offsets(&self) -> Vec<(String, f64)> {
            self.reads.set(self.reads.get() + 1);
            self.inner.clone()
        }
    }

    #[test]
    fn test_selects_closest_preceding_section() {
        let mut spy = spy();
        assert_eq!(spy.refresh(450.0, &layout()), Some(1));
        assert_eq!(spy.refresh(0.0, &layout()), Some(0));
        assert_eq!(spy.refresh(399.0, &layout()), Some(0));
        assert_eq!(spy.refresh(400.0, &layout()), Some(1));
        assert_eq!(spy.refresh(5000.0, &layout()), Some(2));
    }

    #[test]
    fn test_nothing_active_above_first_section() {
        let sections: &[(&str, f64)] = &[("a", 300.0), ("b", 900.0)];
        let mut spy = ScrollSpy::new(["a", "b"]);
        assert_eq!(spy.refresh(0.0, sections), None);
        assert_eq!(spy.refresh(250.0, sections), Some(0));
    }

    #[test]
    fn test_custom_offset() {
        let mut spy = spy().with_offset(0.0);
        assert_eq!(spy.refresh(450.0, &layout()), Some(0));
    }

    #[test]
    fn test_missing_sections_are_skipped() {
        let sections: &[(&str, f64)] = &[("intro", 0.0), ("usage", 1000.0)];
        let mut spy = spy();
        assert_eq!(spy.refresh(600.0, sections), Some(0));
        assert_eq!(spy.refresh(950.0, sections), Some(2));
    }

    #[test]
    fn test_empty_spy_never_activates() {
        let mut spy = ScrollSpy::new(Vec::<String>::new());
        assert!(spy.is_empty());
        assert_eq!(spy.refresh(450.0, &layout()), None);
        assert_eq!(spy.select(0), None);
    }

    #[test]
    fn test_events_coalesce_per_frame() {
        let layout = CountingLayout {
            inner: layout(),
            reads: Cell::new(0),
        };
        let mut spy = spy();

        assert!(spy.notify(ViewportEvent::Scroll { position: 10.0 }));
        assert!(!spy.notify(ViewportEvent::Scroll { position: 300.0 }));
        assert!(!spy.notify(ViewportEvent::Resize { position: 950.0 }));

        assert_eq!(spy.on_frame(&layout), Some(2));
        assert_eq!(layout.reads.get(), 1);

        // No new events: the next frame does not touch the layout
        assert_eq!(spy.on_frame(&layout), Some(2));
        assert_eq!(layout.reads.get(), 1);

        assert!(spy.notify(ViewportEvent::Scroll { position: 0.0 }));
        assert_eq!(spy.on_frame(&layout), Some(0));
        assert_eq!(layout.reads.get(), 2);
    }

    #[test]
    fn test_select_is_optimistic() {
        let mut spy = spy();
        spy.refresh(0.0, &layout());
        assert_eq!(spy.select(2).as_deref(), Some("#usage"));
        assert_eq!(spy.active(), Some(2));
        assert_eq!(spy.select(7), None);
        assert_eq!(spy.active(), Some(2));
    }

    #[test]
    fn test_attach_and_release() {
        let viewport = Viewport::new();
        let spy = Rc::new(RefCell::new(spy()));

        let subscription = ScrollSpy::attach(&spy, &viewport);
        assert_eq!(viewport.listener_count(), 1);

        viewport.dispatch(ViewportEvent::Scroll { position: 450.0 });
        assert_eq!(spy.borrow_mut().on_frame(&layout()), Some(1));

        drop(subscription);
        assert_eq!(viewport.listener_count(), 0);

        viewport.dispatch(ViewportEvent::Scroll { position: 950.0 });
        assert_eq!(spy.borrow_mut().on_frame(&layout()), Some(1));
    }

    #[test]
    fn test_subscription_outliving_viewport() {
        let spy = Rc::new(RefCell::new(spy()));
        let subscription = {
            let viewport = Viewport::new();
            ScrollSpy::attach(&spy, &viewport)
        };
        drop(subscription);
    }

    #[test]
    fn test_spy_from_toc() {
        let toc = vec![TocEntry::new("a", "A", 2), TocEntry::new("b", "B", 3)];
        let spy = ScrollSpy::from_toc(&toc);
        assert_eq!(spy.ids(), &["a".to_string(), "b".to_string()]);
    }
}
