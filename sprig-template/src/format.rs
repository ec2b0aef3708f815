/// Build-mode switch for the serialization pass. Affects whitespace only,
/// never program semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable: re-indent by brace depth.
    Readable,
    /// Production: strip indentation and blank lines. Statement newlines are
    /// kept: spliced user code is never parsed, so joining lines could
    /// change what it means.
    Minified,
}

pub fn format_program(code: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Readable => indent(code),
        OutputMode::Minified => minify(code),
    }
}

fn minify(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for line in code.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn indent(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + code.len() / 4);
    let mut depth: i32 = 0;
    for raw in code.lines() {
        let line = raw.trim();
        if line.is_empty() {
            out.push('\n');
            continue;
        }
        let net = brace_net(line);
        let lead = if line.starts_with('}') {
            (depth - 1).max(0)
        } else {
            depth.max(0)
        };
        for _ in 0..lead {
            out.push_str("  ");
        }
        out.push_str(line);
        out.push('\n');
        depth = (depth + net).max(0);
    }
    out
}

/// Net brace depth change of one line, ignoring braces inside string
/// literals. Spliced user code can at worst skew indentation, never
/// semantics.
fn brace_net(line: &str) -> i32 {
    let mut net = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in line.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '{' => net += 1,
            '}' => net -= 1,
            _ => {}
        }
    }
    net
}
