//! The slice of the DOM the page behaviour touches.
//!
//! Handlers are written against these traits so the same code drives the
//! real document in the browser and the mock document in tests.

pub mod selectors {
    pub const NAVBAR: &str = "#navbar";
    pub const HAMBURGER: &str = ".hamburger";
    pub const NAV_MENU: &str = ".nav-menu";
    pub const NAV_LINK: &str = ".nav-link";
    pub const IN_PAGE_ANCHOR: &str = "a[href^=\"#\"]";
    pub const SCROLL_TOP: &str = "#scroll-top";
    pub const ANIMATED: &str = ".animate-on-scroll";
    pub const YEAR: &str = "#year";
    pub const GOOGLE_FORM: &str = "#google-form";
    pub const HIDDEN_IFRAME: &str = "#hidden-iframe";
    pub const CONTACT_FORM: &str = "#contact-form";
    pub const SUBMIT_BUTTON: &str = "button[type=\"submit\"]";
}

pub mod classes {
    pub const SCROLLED: &str = "scrolled";
    pub const VISIBLE: &str = "visible";
    pub const ACTIVE: &str = "active";
}

/// Handle to one element. Clones refer to the same node.
pub trait Element: Clone + PartialEq + 'static {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;

    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn set_style(&self, property: &str, value: &str);
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    fn set_disabled(&self, disabled: bool);

    /// Layout distance from the top of the document in CSS pixels: the sum of
    /// `offsetTop` along the `offsetParent` chain. CSS transforms are ignored,
    /// so a pending reveal offset does not move the anchor target.
    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;

    /// First descendant matching `selector`.
    fn query(&self, selector: &str) -> Option<Self>;

    /// Resets form controls. No-op on anything that is not a form.
    fn reset_form(&self);
}

pub trait Document {
    type Element: Element;

    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn body(&self) -> Option<Self::Element>;
}

pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn width(&self) -> f64;
    /// Smoothly scrolls the window so `top` is at the top edge.
    fn scroll_to(&self, top: f64);
    fn prefers_reduced_motion(&self) -> bool;
}

/// Document-relative layout offset from the `offsetTop` of an element and of
/// each of its offset parents, innermost first.
pub fn layout_offset_top(offsets: impl IntoIterator<Item = i32>) -> f64 {
    offsets.into_iter().map(f64::from).sum()
}

/// DOM events the page listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomEvent {
    Scroll,
    Resize,
    Click,
    KeyDown,
    Submit,
    DomContentLoaded,
}

impl DomEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Submit => "submit",
            Self::DomContentLoaded => "DOMContentLoaded",
        }
    }
}
