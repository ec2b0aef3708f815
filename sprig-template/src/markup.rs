use std::fmt;

use crate::error::CompileError;

/// Source position of a parse-tree node, 1-based, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkupAttr {
    pub name: String,
    pub value: Option<String>, // value-less attrs allowed, e.g. `disabled`
}

/// Generic markup parse tree: node kind, tag, attributes, children, in
/// document order. Carries no template semantics; the AST builder layers
/// those on top.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Fragment {
        children: Vec<MarkupNode>,
    },
    Element {
        tag: String,
        attrs: Vec<MarkupAttr>,
        children: Vec<MarkupNode>,
        pos: Pos,
    },
    Text {
        value: String,
        pos: Pos,
    },
    Comment(String),
    Doctype {
        value: String,
        pos: Pos,
    },
}

/// Tags whose content is taken verbatim, without tag or expression
/// interpretation, up to the matching close tag.
fn is_raw_text_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("style") || tag.eq_ignore_ascii_case("script")
}

/// Minimal hand-rolled HTML-ish fragment parser with support for:
/// - nested elements and self-closing tags (`<input/>`)
/// - attributes with single/double-quoted or absent values
/// - comments and (rejected later) doctype declarations
/// - raw-text `style`/`script` content, captured verbatim
///
/// Unclosed ordinary elements at end of input are closed best-effort; an
/// unclosed raw-text element is an error.
pub fn parse_fragment(input: &str) -> Result<MarkupNode, CompileError> {
    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut stack: Vec<MarkupNode> = Vec::new();
    let mut roots: Vec<MarkupNode> = Vec::new();
    let mut tracker = PosTracker::new();

    fn push_child(stack: &mut Vec<MarkupNode>, roots: &mut Vec<MarkupNode>, node: MarkupNode) {
        if let Some(MarkupNode::Element { children, .. }) = stack.last_mut() {
            children.push(node);
        } else {
            roots.push(node);
        }
    }

    while i < bytes.len() {
        if bytes[i] == b'<' {
            if input[i..].starts_with("<!--") {
                // comment
                i += 4;
                let start = i;
                let end = input[i..].find("-->").map(|n| i + n).unwrap_or(bytes.len());
                push_child(
                    &mut stack,
                    &mut roots,
                    MarkupNode::Comment(input[start..end].to_string()),
                );
                i = (end + 3).min(bytes.len());
                continue;
            }

            if i + 1 < bytes.len() && bytes[i + 1] == b'!' {
                // doctype or other declaration
                let pos = tracker.pos_at(input, i);
                let start = i;
                while i < bytes.len() && bytes[i] != b'>' {
                    i += 1;
                }
                let end = i;
                if i < bytes.len() {
                    i += 1;
                }
                push_child(
                    &mut stack,
                    &mut roots,
                    MarkupNode::Doctype {
                        value: input[start..end].to_string(),
                        pos,
                    },
                );
                continue;
            }

            // closing tag?
            if i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                i += 2;
                let tag = read_ident(bytes, &mut i);
                skip_ws(bytes, &mut i);
                if i < bytes.len() && bytes[i] == b'>' {
                    i += 1;
                }
                // pop to the matching open element, implicitly closing any
                // unclosed inner elements on the way; a stray close with no
                // matching open element is ignored
                let matches = |n: &MarkupNode| {
                    matches!(n, MarkupNode::Element { tag: t, .. } if t.eq_ignore_ascii_case(&tag))
                };
                if stack.iter().any(matches) {
                    while let Some(n) = stack.pop() {
                        let done = matches(&n);
                        push_child(&mut stack, &mut roots, n);
                        if done {
                            break;
                        }
                    }
                }
                continue;
            }

            // opening or self-closing tag
            let pos = tracker.pos_at(input, i);
            i += 1;
            let tag = read_ident(bytes, &mut i);
            let mut attrs: Vec<MarkupAttr> = Vec::new();
            let mut self_closing = false;

            loop {
                skip_ws(bytes, &mut i);
                if i >= bytes.len() {
                    break;
                }
                match bytes[i] {
                    b'/' => {
                        // possible "/>"
                        self_closing = true;
                        i += 1;
                        skip_ws(bytes, &mut i);
                        if i < bytes.len() && bytes[i] == b'>' {
                            i += 1;
                        }
                        break;
                    }
                    b'>' => {
                        i += 1;
                        break;
                    }
                    _ => {
                        if let Some(attr) = read_attribute(bytes, &mut i) {
                            attrs.push(attr);
                        } else {
                            // skip unknown token
                            i += 1;
                        }
                    }
                }
            }

            if is_raw_text_tag(&tag) && !self_closing {
                let content_pos = tracker.pos_at(input, i);
                let (content, resume) = read_raw_text(input, i, &tag)
                    .ok_or_else(|| CompileError::UnterminatedRawText {
                        tag: tag.clone(),
                        pos,
                    })?;
                push_child(
                    &mut stack,
                    &mut roots,
                    MarkupNode::Element {
                        tag,
                        attrs,
                        children: vec![MarkupNode::Text {
                            value: content,
                            pos: content_pos,
                        }],
                        pos,
                    },
                );
                i = resume;
            } else if self_closing {
                push_child(
                    &mut stack,
                    &mut roots,
                    MarkupNode::Element {
                        tag,
                        attrs,
                        children: Vec::new(),
                        pos,
                    },
                );
            } else {
                stack.push(MarkupNode::Element {
                    tag,
                    attrs,
                    children: Vec::new(),
                    pos,
                });
            }
        } else {
            // text until next '<'
            let pos = tracker.pos_at(input, i);
            let start = i;
            while i < bytes.len() && bytes[i] != b'<' {
                i += 1;
            }
            push_child(
                &mut stack,
                &mut roots,
                MarkupNode::Text {
                    value: input[start..i].to_string(),
                    pos,
                },
            );
        }
    }

    // Unclosed tags: drain stack to parents (best-effort)
    while let Some(n) = stack.pop() {
        push_child(&mut stack, &mut roots, n);
    }

    Ok(MarkupNode::Fragment { children: roots })
}

/// Scan for the close tag of a raw-text element. Returns the verbatim
/// content and the offset just past the close tag.
fn read_raw_text(input: &str, from: usize, tag: &str) -> Option<(String, usize)> {
    let bytes = input.as_bytes();
    let mut j = from;
    while j + 1 < bytes.len() {
        if bytes[j] == b'<' && bytes[j + 1] == b'/' {
            let mut k = j + 2;
            let name = read_ident(bytes, &mut k);
            if name.eq_ignore_ascii_case(tag) {
                skip_ws(bytes, &mut k);
                if k < bytes.len() && bytes[k] == b'>' {
                    return Some((input[from..j].to_string(), k + 1));
                }
            }
        }
        j += 1;
    }
    None
}

/// Forward-only line/column tracker. The parser requests positions in
/// document order, so each request scans only the bytes since the previous
/// one and a whole parse stays linear.
struct PosTracker {
    offset: usize,
    line: u32,
    column: u32,
}

impl PosTracker {
    fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn pos_at(&mut self, input: &str, offset: usize) -> Pos {
        if offset < self.offset {
            *self = Self::new();
        }
        for &b in &input.as_bytes()[self.offset..offset] {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = offset;
        Pos {
            line: self.line,
            column: self.column,
        }
    }
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && (bytes[*i] as char).is_whitespace() {
        *i += 1;
    }
}

fn read_ident(bytes: &[u8], i: &mut usize) -> String {
    let start = *i;
    while *i < bytes.len() {
        let c = bytes[*i] as char;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            *i += 1;
        } else {
            break;
        }
    }
    String::from_utf8(bytes[start..*i].to_vec()).unwrap_or_default()
}

fn read_attribute(bytes: &[u8], i: &mut usize) -> Option<MarkupAttr> {
    let name_start = *i;
    while *i < bytes.len() {
        let c = bytes[*i] as char;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ':' {
            *i += 1;
        } else {
            break;
        }
    }
    if *i == name_start {
        return None;
    }
    let name = String::from_utf8(bytes[name_start..*i].to_vec()).ok()?;

    skip_ws(bytes, i);
    let mut value: Option<String> = None;
    if *i < bytes.len() && bytes[*i] == b'=' {
        *i += 1;
        skip_ws(bytes, i);
        value = read_quoted(bytes, i);
    }

    Some(MarkupAttr { name, value })
}

fn read_quoted(bytes: &[u8], i: &mut usize) -> Option<String> {
    if *i >= bytes.len() {
        return None;
    }
    let quote = bytes[*i];
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    *i += 1;
    let start = *i;
    while *i < bytes.len() && bytes[*i] != quote {
        *i += 1;
    }
    let s = String::from_utf8(bytes[start..*i].to_vec()).ok()?;
    if *i < bytes.len() {
        *i += 1;
    } // consume closing quote
    Some(s)
}
