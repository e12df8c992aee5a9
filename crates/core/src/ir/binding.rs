//! HTTP binding resolution.
//!
//! A method without a `google.api.http` annotation gets one synthesized
//! `POST /<service full name>/<method>` binding. An annotated method gets one
//! binding per additional binding, in declaration order, followed by the
//! primary pattern.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::naming::{camel_case_path, path_vars};
use crate::descriptor::{HttpPattern, HttpRule, MethodDescriptor};

/// Per-run emission counter keyed by method identifier.
#[derive(Debug, Default, Clone)]
pub struct OrdinalCounter {
    counts: HashMap<String, usize>,
}

impl OrdinalCounter {
    /// Create a counter with every method at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value for `method`, then increment it.
    pub fn next(&mut self, method: &str) -> usize {
        let slot = self.counts.entry(method.to_string()).or_insert(0);
        let ordinal = *slot;
        *slot += 1;
        ordinal
    }
}

/// One resolved binding of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding {
    /// HTTP verb, or the custom kind. Empty for an unrecognized pattern.
    pub verb: String,
    /// URL path template. Empty for an unrecognized pattern.
    pub path: String,
    /// Names of the `{var}` path segments.
    pub path_vars: Vec<String>,
    /// `.`-prefixed, case-converted body field path.
    pub body: Option<String>,
    /// `.`-prefixed, case-converted response body field path.
    pub response_body: Option<String>,
    /// Emission ordinal for the method identifier.
    pub ordinal: usize,
}

/// Resolve every binding of `method`, drawing one ordinal per binding.
pub fn resolve_method(
    service_full_name: &str,
    method: &MethodDescriptor,
    ordinals: &mut OrdinalCounter,
) -> Vec<ResolvedBinding> {
    let bindings = match &method.http {
        None => {
            let path = format!("/{service_full_name}/{}", method.name);
            vec![resolve_pattern(
                &method.name,
                "POST",
                &path,
                "",
                "",
                ordinals,
            )]
        }
        Some(rule) => rule
            .additional_bindings
            .iter()
            .chain(std::iter::once(rule))
            .map(|binding| resolve_rule(&method.name, binding, ordinals))
            .collect(),
    };

    for binding in &bindings {
        debug!(
            method = %method.name,
            ordinal = binding.ordinal,
            verb = %binding.verb,
            path = %binding.path,
            "Resolved HTTP binding."
        );
    }
    bindings
}

fn resolve_rule(method: &str, rule: &HttpRule, ordinals: &mut OrdinalCounter) -> ResolvedBinding {
    if rule.pattern == HttpPattern::Unknown {
        warn!(method, "HTTP rule has no recognized pattern, binding left inert.");
    }
    let (verb, path) = rule.pattern.verb_and_path();
    resolve_pattern(method, verb, path, &rule.body, &rule.response_body, ordinals)
}

fn resolve_pattern(
    method: &str,
    verb: &str,
    path: &str,
    body: &str,
    response_body: &str,
    ordinals: &mut OrdinalCounter,
) -> ResolvedBinding {
    ResolvedBinding {
        verb: verb.to_string(),
        path: path.to_string(),
        path_vars: path_vars(path),
        body: field_path(body),
        response_body: field_path(response_body),
        ordinal: ordinals.next(method),
    }
}

fn field_path(path: &str) -> Option<String> {
    (!path.is_empty()).then(|| format!(".{}", camel_case_path(path)))
}
