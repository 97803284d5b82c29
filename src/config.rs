use serde::Serialize;

use crate::logging::LogLevel;

const NAVBAR_SCROLLED_OFFSET: f64 = 50.0;
const SCROLL_TOP_VISIBLE_OFFSET: f64 = 300.0;
const SCROLL_THROTTLE_MS: u32 = 100;
const RESIZE_DEBOUNCE_MS: u32 = 250;
const MOBILE_BREAKPOINT: f64 = 768.0;
const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const REVEAL_HIDDEN_OFFSET: &str = "translateY(30px)";
const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
const FORM_CONFIRM_DELAY_MS: u32 = 1_500;
const FORM_RESTORE_DELAY_MS: u32 = 3_000;

/// Every tunable of the page behaviour. Fixed at build time.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EffectsConfig {
    pub navbar_scrolled_offset: f64,
    pub scroll_top_visible_offset: f64,
    pub scroll_throttle_ms: u32,
    pub resize_debounce_ms: u32,
    pub mobile_breakpoint: f64,
    pub reveal: RevealConfig,
    pub forms: FormFeedbackConfig,
    pub log_level: LogLevel,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            navbar_scrolled_offset: NAVBAR_SCROLLED_OFFSET,
            scroll_top_visible_offset: SCROLL_TOP_VISIBLE_OFFSET,
            scroll_throttle_ms: SCROLL_THROTTLE_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            reveal: RevealConfig::default(),
            forms: FormFeedbackConfig::default(),
            log_level: LogLevel::Info,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RevealConfig {
    /// Visible fraction an element needs before it is revealed.
    pub threshold: f64,
    /// CSS margin applied to the viewport when measuring intersections.
    pub root_margin: &'static str,
    pub hidden_transform: &'static str,
    pub transition: &'static str,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: REVEAL_THRESHOLD,
            root_margin: REVEAL_ROOT_MARGIN,
            hidden_transform: REVEAL_HIDDEN_OFFSET,
            transition: REVEAL_TRANSITION,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormFeedbackConfig {
    pub sending_label: &'static str,
    pub sent_label: &'static str,
    pub confirm_delay_ms: u32,
    pub restore_delay_ms: u32,
}

impl Default for FormFeedbackConfig {
    fn default() -> Self {
        Self {
            sending_label: "Sending...",
            sent_label: "Message Sent!",
            confirm_delay_ms: FORM_CONFIRM_DELAY_MS,
            restore_delay_ms: FORM_RESTORE_DELAY_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_serializes_for_the_startup_event() {
        let value = serde_json::to_value(EffectsConfig::default()).expect("config serializes");

        assert_eq!(value["navbar_scrolled_offset"], 50.0);
        assert_eq!(value["scroll_top_visible_offset"], 300.0);
        assert_eq!(value["reveal"]["root_margin"], "0px 0px -50px 0px");
        assert_eq!(value["log_level"], "info");
    }
}
