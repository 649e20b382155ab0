//! Parsers for shell and systemd output.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// bash: `open files                          (-n) 1024`
/// bash with units: `core file size              (blocks, -c) 0`
static BASH_ULIMIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+\((?:[^()]*,\s*)?-(\w)\)\s+(\S.*)$").expect("valid ulimit regex")
});

/// dash/busybox: `-n: file descriptors               1024`
static DASH_ULIMIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-(\w):\s+(.+?)\s+(\S+)$").expect("valid ulimit regex")
});

/// Parse `ulimit -a` output into option letter -> raw value.
///
/// Lines in neither layout are skipped.
pub fn parse_ulimit_output(output: &str) -> BTreeMap<String, String> {
    let mut limits = BTreeMap::new();
    for line in output.lines().map(str::trim) {
        if let Some(caps) = BASH_ULIMIT_LINE.captures(line) {
            limits.insert(caps[2].to_string(), caps[3].trim().to_string());
        } else if let Some(caps) = DASH_ULIMIT_LINE.captures(line) {
            limits.insert(caps[1].to_string(), caps[3].to_string());
        }
    }
    limits
}

/// Parse `systemctl show` output (`Key=Value` lines). Values may be empty.
pub fn parse_systemctl_show(output: &str) -> BTreeMap<String, String> {
    output
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Unit names from `systemctl list-units --no-legend` whose line contains
/// `pattern`, case-insensitively, in listing order without duplicates.
pub fn parse_unit_list(output: &str, pattern: &str) -> Vec<String> {
    let pattern = pattern.to_lowercase();
    let mut units: Vec<String> = Vec::new();
    for line in output.lines() {
        if !line.to_lowercase().contains(&pattern) {
            continue;
        }
        // Failed units are prefixed with a status glyph.
        let unit = line
            .split_whitespace()
            .find(|token| token.chars().any(|c| c.is_ascii_alphanumeric()));
        if let Some(unit) = unit {
            if !units.iter().any(|known| known == unit) {
                units.push(unit.to_string());
            }
        }
    }
    units
}
