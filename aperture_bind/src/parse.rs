// Copyright 2025 the Aperture Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler-key parsing: `"onPointerenterCapture"` → (`"pointerenter"`,
//! [`ListenerOptions::CAPTURE`]).

use alloc::string::String;
use bitflags::bitflags;

bitflags! {
    /// Listener registration options encoded as prop-key suffixes.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ListenerOptions: u8 {
        /// Dispatch during the capture phase.
        const CAPTURE = 1;
        /// Remove after the first dispatch.
        const ONCE = 1 << 1;
        /// The listener never calls `preventDefault`.
        const PASSIVE = 1 << 2;
    }
}

/// Whether `key` names an event handler rather than an attribute.
///
/// Handler keys start with `on` followed by anything but a lowercase ASCII
/// letter: `"onClick"` and `"on:custom-event"` are handlers, `"once"` and
/// `"tabindex"` are not.
pub fn is_handler_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next() == Some('o')
        && chars.next() == Some('n')
        && chars.next().is_some_and(|c| !c.is_ascii_lowercase())
}

/// Split a handler prop key into the DOM event name and listener options.
///
/// Trailing `Once`/`Passive`/`Capture` modifiers are stripped repeatedly, in
/// any order. The `on:` form passes the remainder through verbatim (for event
/// names that are not representable in camelCase); otherwise the camelCase
/// remainder is hyphenated and lowercased.
///
/// Returns `None` when `key` is not a handler key.
pub fn parse_handler_key(key: &str) -> Option<(String, ListenerOptions)> {
    if !is_handler_key(key) {
        return None;
    }
    let mut name = key;
    let mut options = ListenerOptions::empty();
    loop {
        let (rest, flag) = if let Some(rest) = name.strip_suffix("Once") {
            (rest, ListenerOptions::ONCE)
        } else if let Some(rest) = name.strip_suffix("Passive") {
            (rest, ListenerOptions::PASSIVE)
        } else if let Some(rest) = name.strip_suffix("Capture") {
            (rest, ListenerOptions::CAPTURE)
        } else {
            break;
        };
        name = rest;
        options |= flag;
    }
    let event = match name.strip_prefix("on:") {
        Some(verbatim) => String::from(verbatim),
        None => hyphenate(&name[2..]),
    };
    Some((event, options))
}

/// CamelCase to kebab-case: `"PointerEnter"` → `"pointer-enter"`.
///
/// A dash is inserted before every uppercase letter except at the start, then
/// the whole string is lowercased.
pub fn hyphenate(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i != 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handler_keys_are_recognized() {
        assert!(is_handler_key("onClick"));
        assert!(is_handler_key("on:custom-event"));
        assert!(!is_handler_key("once"));
        assert!(!is_handler_key("tabindex"));
        assert!(!is_handler_key("on"));
        assert!(!is_handler_key(""));
    }

    #[test]
    fn plain_keys_parse_to_lowercased_events() {
        let (event, options) = parse_handler_key("onClick").unwrap();
        assert_eq!(event, "click");
        assert_eq!(options, ListenerOptions::empty());

        let (event, _) = parse_handler_key("onPointerenter").unwrap();
        assert_eq!(event, "pointerenter");
    }

    #[test]
    fn camel_case_events_hyphenate() {
        let (event, _) = parse_handler_key("onUpdateModelValue").unwrap();
        assert_eq!(event, "update-model-value");
    }

    #[test]
    fn modifiers_strip_repeatedly_in_any_order() {
        let (event, options) = parse_handler_key("onClickCapture").unwrap();
        assert_eq!(event, "click");
        assert_eq!(options, ListenerOptions::CAPTURE);

        let (event, options) = parse_handler_key("onScrollOncePassiveCapture").unwrap();
        assert_eq!(event, "scroll");
        assert_eq!(
            options,
            ListenerOptions::ONCE | ListenerOptions::PASSIVE | ListenerOptions::CAPTURE
        );
    }

    #[test]
    fn colon_form_passes_the_event_name_through() {
        let (event, options) = parse_handler_key("on:Custom-Event").unwrap();
        assert_eq!(event, "Custom-Event");
        assert_eq!(options, ListenerOptions::empty());

        let (event, options) = parse_handler_key("on:scrollCapture").unwrap();
        assert_eq!(event, "scroll");
        assert_eq!(options, ListenerOptions::CAPTURE);
    }

    #[test]
    fn attribute_keys_do_not_parse() {
        assert_eq!(parse_handler_key("tabindex"), None);
        assert_eq!(parse_handler_key("aria-expanded"), None);
    }

    #[test]
    fn hyphenate_leaves_lowercase_untouched() {
        assert_eq!(hyphenate("pointerenter"), "pointerenter");
        assert_eq!(hyphenate("PointerEnter"), "pointer-enter");
        assert_eq!(hyphenate(""), "");
    }
}
