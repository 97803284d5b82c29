use crate::dom::{Document, Element, Viewport};

/// Where the window should scroll so `target` sits just under the navbar.
pub fn scroll_offset_for<E: Element>(target: &E, navbar: Option<&E>) -> f64 {
    let navbar_height = navbar.map(Element::offset_height).unwrap_or(0.0);
    (target.offset_top() - navbar_height).max(0.0)
}

/// CSS selector for the target of an in-page link: the whole `#id` href.
/// `None` for a bare `#` or anything that is not an in-page link.
pub fn anchor_selector(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }

    Some(href)
}

/// Scrolls to the link's target. Returns `true` when the click was handled and
/// the browser's own jump should be suppressed.
pub fn follow<D: Document>(
    document: &D,
    viewport: &impl Viewport,
    navbar: Option<&D::Element>,
    href: &str,
) -> bool {
    let Some(selector) = anchor_selector(href) else {
        return false;
    };
    let Some(target) = document.query(selector) else {
        return false;
    };

    viewport.scroll_to(scroll_offset_for(&target, navbar));
    true
}
