use std::collections::HashMap;

use crate::template_ast::{App, EventBinding, Node};

/// Result of one generation run: the program text plus its side artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The generated mount program (unformatted).
    pub code: String,
    /// Extracted CSS, concatenated in document order. Empty if the template
    /// has no style elements.
    pub css: String,
    /// Names of the per-expression update callbacks, in registration order.
    pub updates: Vec<String>,
}

/// Generate the mount program for a well-typed AST. Total: never fails once
/// the AST is built. All generation state is owned by this call; two runs
/// over the same AST yield identical output.
pub fn generate(app: &App) -> Program {
    let mut g = Generator::default();

    // extraction pre-pass, document order
    let css = collect_styles(&app.children);
    let script = collect_scripts(&app.children);

    if !css.is_empty() {
        g.line("import \"./build.css.js\";");
    }
    if !script.is_empty() {
        // verbatim splice: script code runs with full access to the
        // generated program's scope
        g.line(&script);
    }

    g.walk_app(app);
    g.line(RUNTIME);

    g.line("function update() {");
    for name in g.updates.clone() {
        g.line(&format!("{name}();"));
    }
    g.line("}");

    Program {
        code: g.out,
        css,
        updates: g.updates,
    }
}

/// The CSS-injection artifact: a standalone program that appends a style
/// element containing the extracted CSS to the document head.
pub fn css_program(css: &str) -> String {
    format!(
        r#"function CSS() {{
const css_code = {css};
const style = document.createElement("style");
style.type = "text/css";
style.appendChild(document.createTextNode(css_code));
document.head.appendChild(style);
}}

CSS();
"#,
        css = js_string(css)
    )
}

/// Per-invocation generation state. Nothing here outlives one `generate`
/// call, so independent compilations never interfere.
#[derive(Debug, Default)]
struct Generator {
    out: String,
    next_id: u32,
    updates: Vec<String>,
    /// identifier -> short description of the originating node (debug aid)
    registry: HashMap<String, String>,
}

impl Generator {
    fn line(&mut self, stmt: &str) {
        self.out.push_str(stmt);
        self.out.push('\n');
    }

    fn uid(&mut self, origin: String) -> String {
        self.next_id += 1;
        let id = format!("${}", base36(self.next_id));
        self.registry.insert(id.clone(), origin);
        id
    }

    /// The App root aliases the pre-existing mount container instead of
    /// constructing a node.
    fn walk_app(&mut self, app: &App) {
        let id = self.uid("ROOT".to_string());
        self.line(&format!("const {id} = ROOT;"));
        self.walk_children(&id, &app.children);
    }

    /// Structural walk for one element: construction, children (fully
    /// emitted before the append), one append statement, then listener
    /// registrations. Returns the element's identifier so the parent can
    /// append it by name.
    fn walk_element(&mut self, tag: &str, events: &[EventBinding], children: &[Node]) -> String {
        let id = self.uid(format!("<{tag}>"));
        self.line(&format!("const {id} = element(\"{tag}\");"));
        self.walk_children(&id, children);
        for event in events {
            self.line(&format!("{id}.on(\"{}\", () => {{", event.name));
            self.line(&event.value);
            // every event fires a full update sweep after the user handler
            self.line("update();");
            self.line("});");
        }
        id
    }

    fn walk_children(&mut self, id: &str, children: &[Node]) {
        let mut appended = Vec::new();
        for child in children {
            match child {
                Node::Text { value, template } => appended.push(self.text_node(value, *template)),
                Node::Element {
                    tag,
                    events,
                    children,
                } => appended.push(self.walk_element(tag, events, children)),
                // already extracted by the pre-pass
                Node::Style { .. } | Node::Script { .. } => {}
            }
        }
        self.line(&format!("{id}.append({});", appended.join(", ")));
    }

    fn text_node(&mut self, value: &str, template: bool) -> String {
        if template {
            let id = self.uid(format!("{{{value}}}"));
            self.line(&format!("const {id} = text({value});"));
            let update = format!("update{id}");
            self.line(&format!(
                "const {update} = () => {{ {id}.textContent = {value}; }};"
            ));
            self.updates.push(update);
            id
        } else {
            let id = self.uid(format!("\"{value}\""));
            self.line(&format!("const {id} = text({});", js_string(value)));
            id
        }
    }
}

fn collect_styles(children: &[Node]) -> String {
    let mut out = String::new();
    push_styles(children, &mut out);
    out
}

fn push_styles(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Style { value } => out.push_str(value),
            Node::Element { children, .. } => push_styles(children, out),
            _ => {}
        }
    }
}

fn collect_scripts(children: &[Node]) -> String {
    let mut out = String::new();
    push_scripts(children, &mut out);
    out
}

fn push_scripts(children: &[Node], out: &mut String) {
    for child in children {
        match child {
            Node::Script { value } => out.push_str(value),
            Node::Element { children, .. } => push_scripts(children, out),
            _ => {}
        }
    }
}

/// JS `(n).toString(36)`: lowercase base-36 rendering of the id counter.
fn base36(mut n: u32) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut buf = [0u8; 7];
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = DIGITS[(n % 36) as usize];
        n /= 36;
        if n == 0 {
            break;
        }
    }
    String::from_utf8_lossy(&buf[i..]).into_owned()
}

/// Quote a string as a JS string literal.
fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Fixed runtime helpers emitted into every generated program: an element
/// constructor exposing append/listener registration, and a text constructor
/// exposing content replacement.
const RUNTIME: &str = r#"function element(tag) {
const el = document.createElement(tag);
const children = [];
el.append = (...args) => {
children.push(...args);
args.forEach((child) => el.appendChild(child));
};
el.on = (event, callback) => {
el.addEventListener(event, callback);
};
return el;
}

function text(value) {
const el = document.createTextNode(value);
el.update = (value) => {
el.textContent = value;
};
return el;
}"#;
