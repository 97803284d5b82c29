//! Cosmetic feedback on the contact forms' submit button.

use std::cell::RefCell;

use crate::config::FormFeedbackConfig;
use crate::dom::{selectors, Element};
use crate::timing::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormKind {
    /// Posts into a hidden iframe, so the page never navigates.
    GoogleForm,
    /// Ordinary form whose submission is handled entirely on the page.
    ContactForm,
}

impl FormKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoogleForm => "google_form",
            Self::ContactForm => "contact_form",
        }
    }

    pub fn prevents_default(self) -> bool {
        matches!(self, Self::ContactForm)
    }
}

pub struct FormFeedback<E, S: Scheduler> {
    kind: FormKind,
    form: E,
    button: Option<E>,
    original_label: String,
    config: FormFeedbackConfig,
    scheduler: S,
    steps: RefCell<Vec<S::Handle>>,
}

impl<E: Element, S: Scheduler> FormFeedback<E, S> {
    pub fn new(kind: FormKind, form: E, config: FormFeedbackConfig, scheduler: S) -> Self {
        let button = form.query(selectors::SUBMIT_BUTTON);
        let original_label = button.as_ref().map(Element::text).unwrap_or_default();

        Self {
            kind,
            form,
            button,
            original_label,
            config,
            scheduler,
            steps: RefCell::new(Vec::new()),
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn has_button(&self) -> bool {
        self.button.is_some()
    }

    /// Starts the feedback sequence. Returns `true` when the browser's own
    /// submission should be prevented. Any sequence still running is dropped.
    pub fn submit(&self) -> bool {
        if let Some(button) = &self.button {
            button.set_text(self.config.sending_label);
            button.set_disabled(true);
        }

        let confirm = {
            let form = self.form.clone();
            let button = self.button.clone();
            let sent_label = self.config.sent_label;
            self.scheduler.schedule(
                self.config.confirm_delay_ms,
                Box::new(move || {
                    if let Some(button) = &button {
                        button.set_text(sent_label);
                    }
                    form.reset_form();
                }),
            )
        };

        let restore = {
            let button = self.button.clone();
            let original_label = self.original_label.clone();
            self.scheduler.schedule(
                self.config
                    .confirm_delay_ms
                    .saturating_add(self.config.restore_delay_ms),
                Box::new(move || {
                    if let Some(button) = &button {
                        button.set_text(&original_label);
                        button.set_disabled(false);
                    }
                }),
            )
        };

        let previous = self.steps.replace(vec![confirm, restore]);
        drop(previous);

        self.kind.prevents_default()
    }
}
