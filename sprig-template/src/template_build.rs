use crate::error::CompileError;
use crate::markup::{MarkupAttr, MarkupNode, Pos};
use crate::template_ast::{App, EventBinding, Node};

/// Attribute names starting with this character are event bindings; the rest
/// of the name is the event name. Plain attributes are not propagated to the
/// AST at all.
const EVENT_PREFIX: char = ':';

/// Build the typed template AST from a generic markup parse tree. Pure: a
/// fresh root per call, no state shared across invocations.
pub fn build(root: &MarkupNode) -> Result<App, CompileError> {
    let mut app = App::default();
    walk(root, &mut app.children)?;
    Ok(app)
}

fn walk(node: &MarkupNode, parent: &mut Vec<Node>) -> Result<(), CompileError> {
    match node {
        // a fragment contributes no node of its own
        MarkupNode::Fragment { children } => {
            for child in children {
                walk(child, parent)?;
            }
        }

        MarkupNode::Text { value, pos } => split_text(value, *pos, parent)?,

        MarkupNode::Element { tag, children, .. } if tag.eq_ignore_ascii_case("style") => {
            parent.push(Node::Style {
                value: raw_content(children),
            });
        }
        MarkupNode::Element { tag, children, .. } if tag.eq_ignore_ascii_case("script") => {
            parent.push(Node::Script {
                value: raw_content(children),
            });
        }

        MarkupNode::Element {
            tag,
            attrs,
            children,
            pos,
        } => {
            let events = extract_events(attrs, *pos)?;
            let mut built = Vec::new();
            for child in children {
                walk(child, &mut built)?;
            }
            parent.push(Node::Element {
                tag: tag.clone(),
                events,
                children: built,
            });
        }

        MarkupNode::Comment(_) => {}

        MarkupNode::Doctype { pos, .. } => {
            return Err(CompileError::UnsupportedNodeKind {
                kind: "doctype".to_string(),
                pos: *pos,
            });
        }
    }
    Ok(())
}

/// Split trimmed text into alternating literal and template-expression
/// siblings. Every `{expr}` span becomes a template Text node with the
/// outer braces stripped; non-empty literal segments around the spans
/// become literal Text nodes. Whitespace-only text contributes nothing.
fn split_text(value: &str, pos: Pos, parent: &mut Vec<Node>) -> Result<(), CompileError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(());
    }

    // position of the trimmed text within the node
    let lead = &value[..value.len() - value.trim_start().len()];
    let mut cursor = advance(pos, lead);

    let mut rest = trimmed;
    while let Some(open) = rest.find('{') {
        let Some(close) = matching_brace(rest, open) else {
            return Err(CompileError::MalformedTemplateExpression {
                pos: advance(cursor, &rest[..open]),
            });
        };
        if open > 0 {
            parent.push(Node::Text {
                value: rest[..open].to_string(),
                template: false,
            });
        }
        parent.push(Node::Text {
            value: rest[open + 1..close].to_string(),
            template: true,
        });
        cursor = advance(cursor, &rest[..close + 1]);
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        parent.push(Node::Text {
            value: rest.to_string(),
            template: false,
        });
    }
    Ok(())
}

/// Byte offset of the `}` matching the `{` at `open`. Expressions may
/// contain their own braces (object literals, blocks); the span ends at the
/// brace that balances the opener, not at the first `}`.
fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Position after walking `text` from `pos`.
fn advance(mut pos: Pos, text: &str) -> Pos {
    for ch in text.chars() {
        if ch == '\n' {
            pos.line += 1;
            pos.column = 1;
        } else {
            pos.column += 1;
        }
    }
    pos
}

fn extract_events(attrs: &[MarkupAttr], pos: Pos) -> Result<Vec<EventBinding>, CompileError> {
    let mut events = Vec::new();
    for attr in attrs {
        let Some(name) = attr.name.strip_prefix(EVENT_PREFIX) else {
            continue; // plain attributes are dropped
        };
        let value = attr
            .value
            .clone()
            .ok_or_else(|| CompileError::MissingRequiredAttribute {
                name: attr.name.clone(),
                pos,
            })?;
        events.push(EventBinding {
            name: name.to_string(),
            value,
        });
    }
    Ok(events)
}

/// First text-bearing child of a style/script element, verbatim.
fn raw_content(children: &[MarkupNode]) -> String {
    children
        .iter()
        .find_map(|c| match c {
            MarkupNode::Text { value, .. } => Some(value.clone()),
            _ => None,
        })
        .unwrap_or_default()
}
