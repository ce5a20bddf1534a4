//! Lint: every clickable control rendered by the calculator is registered as
//! a click target.
//!
//! Checks over `src/calculator/`:
//!
//! - Control text (the `▾`/`▴` dropdown arrow, `[ ... ]` button text) must not
//!   be added with a plain `cl.push(...)`, which renders it but leaves it
//!   un-tappable. Use `push_clickable()`.
//! - Every action ID declared in `actions.rs` must be referenced by
//!   `render.rs`; an ID nothing registers can never fire.
//!
//! And one over all of `src/`: module headers are `//!` inner docs.

use std::fs;
use std::path::{Path, PathBuf};

fn calculator_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src/calculator")
}

/// Dropdown arrows and `[ word ]`-style button text.
fn contains_control_text(s: &str) -> bool {
    if s.contains('▾') || s.contains('▴') {
        return true;
    }
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'[' || bytes.get(i + 1) != Some(&b' ') {
            continue;
        }
        let rest = &s[i + 2..];
        if let Some(end) = rest.find(" ]") {
            let label = &rest[..end];
            if !label.is_empty() && label.chars().all(|c| c.is_alphanumeric() || c == ' ') {
                return true;
            }
        }
    }
    false
}

/// Lines with a non-clickable `push(` call carrying control text.
fn find_control_text_in_push(source: &str) -> Vec<(usize, String)> {
    let mut violations = Vec::new();

    for (line_num_0, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.starts_with("//") {
            continue;
        }
        if !contains_control_text(line) {
            continue;
        }
        if line.contains(".push(") && !line.contains("push_clickable(") {
            violations.push((line_num_0 + 1, trimmed.to_string()));
        }
    }

    violations
}

/// `pub const NAME: u16` declarations, skipping range bounds (`*_END`).
fn declared_action_ids(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| line.trim().strip_prefix("pub const "))
        .filter_map(|rest| rest.split_once(": u16"))
        .map(|(name, _)| name.trim().to_string())
        .filter(|name| !name.ends_with("_END"))
        .collect()
}

#[test]
fn no_control_text_in_non_clickable_push() {
    let mut all_violations = Vec::new();
    visit_render_files(&calculator_dir(), &mut all_violations);

    if !all_violations.is_empty() {
        let mut msg = String::from(
            "Found control text in non-clickable cl.push() calls.\n\
             These should use push_clickable().\n\n",
        );
        for (file, line_num, line) in &all_violations {
            msg.push_str(&format!("  {}:{}: {}\n", file, line_num, line));
        }
        panic!("{}", msg);
    }
}

#[test]
fn every_action_id_is_rendered() {
    let dir = calculator_dir();
    let actions = fs::read_to_string(dir.join("actions.rs")).expect("read actions.rs");
    let render = fs::read_to_string(dir.join("render.rs")).expect("read render.rs");

    let ids = declared_action_ids(&actions);
    assert!(!ids.is_empty(), "no action IDs found in actions.rs");

    let missing: Vec<&String> = ids.iter().filter(|id| !render.contains(id.as_str())).collect();
    assert!(
        missing.is_empty(),
        "action IDs never registered by render.rs: {:?}",
        missing
    );
}

/// Whether a file opens with an outer `///` comment, which documents the
/// first item instead of the module.
fn has_outer_doc_header(source: &str) -> bool {
    source
        .lines()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.starts_with("///"))
        .unwrap_or(false)
}

#[test]
fn module_headers_use_inner_docs() {
    let mut offenders = Vec::new();
    visit_rs_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut |path: &Path, source: &str| {
        if has_outer_doc_header(source) {
            offenders.push(path.display().to_string());
        }
    });
    assert!(
        offenders.is_empty(),
        "module header should be `//!`, not `///`: {:?}",
        offenders
    );
}

fn visit_rs_files(dir: &Path, f: &mut dyn FnMut(&Path, &str)) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_rs_files(&path, f);
        } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
            if let Ok(source) = fs::read_to_string(&path) {
                f(&path, &source);
            }
        }
    }
}

fn visit_render_files(dir: &Path, violations: &mut Vec<(String, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            visit_render_files(&path, violations);
        } else if path.file_name().map(|n| n == "render.rs").unwrap_or(false) {
            let Ok(source) = fs::read_to_string(&path) else {
                continue;
            };
            let display_path = path.display().to_string();
            for (line_num, line) in find_control_text_in_push(&source) {
                violations.push((display_path.clone(), line_num, line));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_arrow_in_push() {
        let source = r#"cl.push(Line::from(" ▾ Train SSS"));"#;
        assert_eq!(find_control_text_in_push(source).len(), 1);
    }

    #[test]
    fn detects_button_in_push() {
        let source = r#"cl.push(Line::from("[ Calculate ]"));"#;
        assert_eq!(find_control_text_in_push(source).len(), 1);
    }

    #[test]
    fn allows_push_clickable() {
        let source = r#"cl.push_clickable(Line::from("[ Calculate ]"), CALCULATE);"#;
        assert!(find_control_text_in_push(source).is_empty());
    }

    #[test]
    fn ignores_comments() {
        let source = r#"// cl.push(Line::from(" ▾ menu"));"#;
        assert!(find_control_text_in_push(source).is_empty());
    }

    #[test]
    fn control_text_detection() {
        assert!(contains_control_text("[ Calculate ]"));
        assert!(contains_control_text(" ▴ open"));
        assert!(!contains_control_text("[123"));
        assert!(!contains_control_text("[ ]"));
        assert!(!contains_control_text("plain text"));
    }

    #[test]
    fn reads_action_ids() {
        let source = "pub const A: u16 = 1;\n// x\npub const ITEM_END: u16 = 9;\npub const B: u16 = 2;";
        assert_eq!(declared_action_ids(source), vec!["A", "B"]);
    }

    #[test]
    fn outer_doc_header_detection() {
        assert!(has_outer_doc_header("/// Calculator.\n\npub mod actions;"));
        assert!(!has_outer_doc_header("//! Calculator.\n\npub mod actions;"));
        assert!(!has_outer_doc_header("\nmod calculator;"));
    }
}
