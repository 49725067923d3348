//! Unused-key guard.
//!
//! Every leaf of the merged config must sit under a JSON-pointer prefix the
//! calendar schema actually reads. Prefixes go down to field level, with `*`
//! standing for any array index, so a misspelled nested key is caught as
//! well as a misspelled section. Anything else is a typo or a leftover and
//! gets reported (`Warn`) or rejected (`Fail`).

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields read by [`CalendarFile`](crate::CalendarFile).
static CONSUMED: &[&str] = &[
    "/year",
    "/workCycle/mode",
    "/workCycle/mask",
    "/workCycle/parts/*/workDays",
    "/workCycle/parts/*/restDays",
    "/contractStart/kind",
    "/contractStart/date",
    "/contractStart/anchor/partNumber",
    "/contractStart/anchor/dayWithinPart",
    "/contractStart/anchor/dayType",
    "/workingHours/weekday",
    "/workingHours/saturday",
    "/workingHours/sunday",
    "/workingHours/holiday",
    "/annualContractHours",
    "/holidays/*/date",
    "/holidays/*/name",
    "/vacations/*/startDate",
    "/vacations/*/endDate",
    "/vacations/*/description",
    "/guardias/*/date",
    "/guardias/*/hours",
    "/guardias/*/description",
    "/extraShifts/*/date",
    "/extraShifts/*/hours",
    "/extraShifts/*/description",
];

pub fn consumed_pointers() -> &'static [&'static str] {
    CONSUMED
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Produce an unused-key report for a merged calendar config.
/// If `policy == Fail`, returns an error when unused keys exist.
/// If `policy == Warn`, logs and returns Ok(report).
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = CONSUMED.iter().map(|p| normalize_pointer(p)).collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|lp| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, lp)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if !report.is_clean() {
        if policy == UnusedKeyPolicy::Fail {
            bail!(
                "CONFIG_UNUSED_KEYS: {} unused config leaf key(s) detected. \
                Remove them or fix their spelling. First few: {}",
                report.unused_leaf_pointers.len(),
                preview_list(&report.unused_leaf_pointers, 12)
            );
        }
        tracing::warn!(
            count = report.unused_leaf_pointers.len(),
            keys = %preview_list(&report.unused_leaf_pointers, 12),
            "CONFIG_UNUSED_KEYS"
        );
    }

    Ok(report)
}

/// Normalize JSON pointer:
/// - must begin with "/"
/// - no trailing "/" unless it's just "/"
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// Return true if `prefix` is a JSON-pointer prefix of `leaf`.
///
/// Compared token by token: "/a/b" consumes "/a/b/c" but NOT "/a/bc", and a
/// `*` token matches any array index.
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    let mut leaf_tokens = leaf.split('/').skip(1);
    prefix.split('/').skip(1).all(|want| match leaf_tokens.next() {
        Some(got) if want == "*" => !got.is_empty() && got.bytes().all(|b| b.is_ascii_digit()),
        Some(got) => got == want,
        None => false,
    })
}

pub(crate) fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        _ => {
            let p = if prefix.is_empty() {
                "/".to_string()
            } else {
                prefix.to_string()
            };
            out.push(p);
        }
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}
