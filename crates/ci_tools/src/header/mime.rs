//! MIME type sniffing for source files: content signatures first, then file name.

use std::path::Path;

/// MIME reported for text we cannot attribute to a language.
pub const PLAIN_TEXT_MIME: &str = "text/plain";
/// Plain text is parsed with this MIME's comment syntax.
pub const PLAIN_TEXT_SUBSTITUTE: &str = "text/x-go";

const BINARY_MIME: &str = "application/octet-stream";
const SNIFF_LEN: usize = 8 * 1024;

/// Detect the MIME type of a file from its leading bytes and its name.
pub fn detect_mime(path: &Path, content: &[u8]) -> &'static str {
    let head = &content[..content.len().min(SNIFF_LEN)];
    if head.contains(&0) {
        return BINARY_MIME;
    }
    if let Some(mime) = sniff_text(head) {
        return mime;
    }
    mime_from_name(path).unwrap_or(PLAIN_TEXT_MIME)
}

fn sniff_text(head: &[u8]) -> Option<&'static str> {
    let text = String::from_utf8_lossy(head);
    let trimmed = text.trim_start_matches('\u{feff}');
    if let Some(rest) = trimmed.strip_prefix("#!") {
        let line = rest.lines().next().unwrap_or_default();
        return Some(mime_for_interpreter(line));
    }
    let lead = trimmed.trim_start();
    if lead.starts_with("<?xml") {
        return Some("text/xml");
    }
    let lower: String = lead.chars().take(15).collect::<String>().to_ascii_lowercase();
    if lower.starts_with("<!doctype html") || lower.starts_with("<html") {
        return Some("text/html");
    }
    None
}

fn mime_for_interpreter(shebang: &str) -> &'static str {
    // `#!/usr/bin/env python3` and `#!/usr/bin/python3` both name the interpreter last.
    let interpreter = shebang
        .split_whitespace()
        .find(|word| !word.ends_with("/env") && !word.starts_with('-'))
        .map(|word| word.rsplit('/').next().unwrap_or(word))
        .unwrap_or_default();
    if interpreter.starts_with("python") {
        "text/x-python"
    } else if interpreter.starts_with("ruby") {
        "text/x-ruby"
    } else if interpreter.starts_with("node") {
        "application/javascript"
    } else {
        "text/x-shellscript"
    }
}

fn mime_from_name(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_string_lossy().to_ascii_lowercase();
    match name.as_str() {
        "makefile" | "gnumakefile" => return Some("text/x-makefile"),
        "dockerfile" | "containerfile" => return Some("text/x-dockerfile"),
        "cmakelists.txt" => return Some("text/x-cmake"),
        _ => {}
    }
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    let mime = match ext.as_str() {
        "c" | "h" => "text/x-c",
        "cc" | "cpp" | "cxx" | "hh" | "hpp" | "hxx" => "text/x-c++",
        "go" => "text/x-go",
        "java" => "text/x-java",
        "js" | "mjs" | "cjs" | "ts" => "application/javascript",
        "py" => "text/x-python",
        "sh" | "bash" | "zsh" => "text/x-shellscript",
        "rb" => "text/x-ruby",
        "yml" | "yaml" => "text/x-yaml",
        "toml" => "text/x-toml",
        "mk" => "text/x-makefile",
        "cmake" => "text/x-cmake",
        "html" | "htm" => "text/html",
        "xml" => "text/xml",
        _ => return None,
    };
    Some(mime)
}
