//! Activity diagram parsing: start/stop sentinels, `:action;` lines and
//! `if/then/else/endif` decision blocks with rejoining branches.

use pd_core::{Activity, DiagramModel};

use crate::is_skippable;

pub(crate) fn parse_activity(input: &str) -> DiagramModel {
    let lines: Vec<&str> = input.lines().map(str::trim).collect();
    let mut cursor = 0;
    let flow = parse_flow(&lines, &mut cursor, true);
    DiagramModel::Activity { flow }
}

/// Parse a linear sub-sequence of activities. Inside a branch
/// (`top_level == false`) the `else` and `endif` keywords terminate the
/// sequence and are left for the caller to consume.
fn parse_flow(lines: &[&str], cursor: &mut usize, top_level: bool) -> Vec<Activity> {
    let mut flow = Vec::new();

    while *cursor < lines.len() {
        let line = lines[*cursor];
        if !top_level && (line == "endif" || line == "else" || line.starts_with("else ")) {
            return flow;
        }
        *cursor += 1;

        if is_skippable(line) {
            continue;
        }
        if line == "start" {
            flow.push(Activity::Start);
            continue;
        }
        if line == "stop" {
            flow.push(Activity::Stop);
            continue;
        }
        if let Some(label) = action_label(line) {
            flow.push(Activity::Action { label });
            continue;
        }
        if let Some((condition, then_label)) = if_header(line) {
            flow.push(parse_decision(lines, cursor, condition, then_label));
            continue;
        }
        // Stray else/endif at top level, or unsupported syntax: skipped.
    }

    flow
}

fn parse_decision(
    lines: &[&str],
    cursor: &mut usize,
    condition: String,
    then_label: Option<String>,
) -> Activity {
    let then_branch = parse_flow(lines, cursor, false);

    let mut else_label = None;
    let mut else_branch = Vec::new();
    if *cursor < lines.len() {
        let line = lines[*cursor];
        if line == "else" || line.starts_with("else ") {
            else_label = paren_group(line).map(|(inner, _)| inner.to_string());
            *cursor += 1;
            else_branch = parse_flow(lines, cursor, false);
        }
    }

    if *cursor < lines.len() && lines[*cursor] == "endif" {
        *cursor += 1;
    }

    Activity::Decision {
        condition,
        then_label,
        else_label,
        then_branch,
        else_branch,
    }
}

/// `:Do the work;` → `Do the work`
fn action_label(line: &str) -> Option<String> {
    let inner = line.strip_prefix(':')?.strip_suffix(';')?.trim();
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_string())
}

/// `if (cond) then (yes)` → (`cond`, Some(`yes`))
fn if_header(line: &str) -> Option<(String, Option<String>)> {
    let rest = line.strip_prefix("if")?;
    if !rest.starts_with([' ', '(']) {
        return None;
    }
    let (condition, after) = paren_group(rest)?;
    if condition.is_empty() {
        return None;
    }

    let then_label = after
        .trim_start()
        .strip_prefix("then")
        .and_then(paren_group)
        .map(|(inner, _)| inner.to_string())
        .filter(|label| !label.is_empty());

    Some((condition.to_string(), then_label))
}

/// First `(...)` group in `s`, with the remainder after the closing paren.
fn paren_group(s: &str) -> Option<(&str, &str)> {
    let start = s.find('(')?;
    let end = s[start + 1..].find(')')? + start + 1;
    Some((s[start + 1..end].trim(), &s[end + 1..]))
}
