//! One-shot reveal of content as it scrolls into view.

use crate::config::RevealConfig;
use crate::dom::Element;

const REVEALED_OPACITY: &str = "1";
const HIDDEN_OPACITY: &str = "0";
const REVEALED_TRANSFORM: &str = "translateY(0)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// One intersection-observer entry.
#[derive(Clone, Debug)]
pub struct Intersection<E> {
    pub target: E,
    pub ratio: f64,
    pub is_intersecting: bool,
}

pub struct RevealController<E> {
    config: RevealConfig,
    tracked: Vec<(E, RevealState)>,
}

impl<E: Element> RevealController<E> {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            tracked: Vec::new(),
        }
    }

    /// Hides every element and starts tracking it as pending.
    pub fn register(&mut self, elements: impl IntoIterator<Item = E>) {
        for element in elements {
            if self.state_of(&element).is_some() {
                continue;
            }

            element.set_style("opacity", HIDDEN_OPACITY);
            element.set_style("transform", self.config.hidden_transform);
            element.set_style("transition", self.config.transition);
            self.tracked.push((element, RevealState::Pending));
        }
    }

    /// Applies a batch of intersection entries and returns the elements that
    /// were revealed by it. Those no longer need observing.
    pub fn observe(&mut self, entries: impl IntoIterator<Item = Intersection<E>>) -> Vec<E> {
        let threshold = self.config.threshold;
        let mut revealed = Vec::new();

        for entry in entries {
            if !entry.is_intersecting || entry.ratio < threshold {
                continue;
            }

            let Some((element, state)) = self
                .tracked
                .iter_mut()
                .find(|(element, _)| *element == entry.target)
            else {
                continue;
            };

            if *state == RevealState::Revealed {
                continue;
            }

            show(element);
            *state = RevealState::Revealed;
            revealed.push(element.clone());
        }

        revealed
    }

    /// Reveals everything still pending, for visitors who opted out of motion.
    pub fn reveal_all(&mut self) -> Vec<E> {
        let mut revealed = Vec::new();
        for (element, state) in &mut self.tracked {
            if *state == RevealState::Pending {
                show(element);
                *state = RevealState::Revealed;
                revealed.push(element.clone());
            }
        }
        revealed
    }

    pub fn state_of(&self, element: &E) -> Option<RevealState> {
        self.tracked
            .iter()
            .find(|(tracked, _)| tracked == element)
            .map(|(_, state)| *state)
    }

    pub fn pending(&self) -> impl Iterator<Item = &E> {
        self.tracked
            .iter()
            .filter(|(_, state)| *state == RevealState::Pending)
            .map(|(element, _)| element)
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}

fn show<E: Element>(element: &E) {
    element.set_style("opacity", REVEALED_OPACITY);
    element.set_style("transform", REVEALED_TRANSFORM);
}
