use std::cell::Cell;
use std::rc::Rc;

use crate::dom::{classes, Element};

const ESCAPE_KEY: &str = "Escape";

/// The collapsible navigation shown on narrow screens.
///
/// Clones share the open flag, so every listener sees the same menu.
#[derive(Clone)]
pub struct MobileMenu<E> {
    hamburger: E,
    nav_menu: E,
    body: Option<E>,
    open: Rc<Cell<bool>>,
}

impl<E: Element> MobileMenu<E> {
    pub fn new(hamburger: E, nav_menu: E, body: Option<E>) -> Self {
        let menu = Self {
            hamburger,
            nav_menu,
            body,
            open: Rc::new(Cell::new(false)),
        };
        menu.render();
        menu
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Returns the new open state.
    pub fn toggle(&self) -> bool {
        self.open.set(!self.open.get());
        self.render();
        self.open.get()
    }

    /// Returns `true` if the menu was open.
    pub fn close(&self) -> bool {
        if !self.open.get() {
            return false;
        }

        self.open.set(false);
        self.render();
        true
    }

    /// Returns `true` if the key closed the menu.
    pub fn handle_key(&self, key: &str) -> bool {
        key == ESCAPE_KEY && self.close()
    }

    fn render(&self) {
        let open = self.open.get();
        self.hamburger.toggle_class(classes::ACTIVE, open);
        self.nav_menu.toggle_class(classes::ACTIVE, open);
        self.hamburger
            .set_attribute("aria-expanded", if open { "true" } else { "false" });

        if let Some(body) = &self.body {
            body.set_style("overflow", if open { "hidden" } else { "" });
        }
    }
}
