// src/exec/template.rs

//! Placeholder substitution for pipeline argument tokens.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::config::WatchSpec;

/// The one placeholder bound to the triggering event rather than the watch.
pub const EVENT_NAME: &str = "{{EventName}}";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Literal, non-overlapping `{{...}}` spans; nested braces unsupported.
    RE.get_or_init(|| Regex::new(r"\{\{(.+?)\}\}").expect("placeholder regex"))
}

/// Whether a raw (unresolved) token references the triggering path, making
/// its pipeline path-sensitive.
pub fn references_event_name(raw: &str) -> bool {
    raw.contains(EVENT_NAME)
}

/// Expand `{{Name}}` tokens in a single argument string.
///
/// `{{EventName}}` resolves to the triggering path; any other name is looked
/// up among the watch's built-in fields, then its named parameters. An
/// unresolved name substitutes an empty string rather than erroring.
///
/// Substitution runs in two passes so a parameter whose own value contains a
/// placeholder gets one extra level of indirection.
pub fn resolve(spec: &WatchSpec, raw: &str, event_path: &str) -> String {
    let mut resolved = raw.to_string();

    for _ in 0..2 {
        if !resolved.contains("{{") {
            break;
        }
        resolved = placeholder_re()
            .replace_all(&resolved, |caps: &Captures<'_>| {
                let name = &caps[1];
                if name == "EventName" {
                    event_path.to_string()
                } else {
                    spec.parameter(name).unwrap_or_default()
                }
            })
            .into_owned();
    }

    resolved
}
