use crate::dom::{classes, Element, Viewport};

/// What the scroll position implies for the chrome of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollState {
    pub navbar_scrolled: bool,
    pub scroll_top_visible: bool,
}

#[derive(Clone)]
pub struct ScrollEffects<E> {
    navbar: Option<E>,
    scroll_top: Option<E>,
    navbar_offset: f64,
    scroll_top_offset: f64,
}

impl<E: Element> ScrollEffects<E> {
    pub fn new(
        navbar: Option<E>,
        scroll_top: Option<E>,
        navbar_offset: f64,
        scroll_top_offset: f64,
    ) -> Self {
        Self {
            navbar,
            scroll_top,
            navbar_offset,
            scroll_top_offset,
        }
    }

    pub fn state_at(&self, offset: f64) -> ScrollState {
        ScrollState {
            navbar_scrolled: offset > self.navbar_offset,
            scroll_top_visible: offset > self.scroll_top_offset,
        }
    }

    /// Idempotent: applying the same offset twice leaves the page unchanged.
    pub fn apply(&self, offset: f64) -> ScrollState {
        let state = self.state_at(offset);

        if let Some(navbar) = &self.navbar {
            navbar.toggle_class(classes::SCROLLED, state.navbar_scrolled);
        }
        if let Some(scroll_top) = &self.scroll_top {
            scroll_top.toggle_class(classes::VISIBLE, state.scroll_top_visible);
        }

        state
    }

    pub fn has_scroll_top(&self) -> bool {
        self.scroll_top.is_some()
    }
}

pub fn scroll_to_top(viewport: &impl Viewport) {
    viewport.scroll_to(0.0);
}
