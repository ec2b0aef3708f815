use sprig_template::{build, css_program, generate, parse_fragment};

fn generate_str(src: &str) -> sprig_template::Program {
    generate(&build(&parse_fragment(src).unwrap()).unwrap())
}

#[test]
fn codegen_div_with_live_text() {
    let program = generate_str("<div>Hello, {name}!</div>");

    assert!(program.code.contains("const $1 = ROOT;"));
    assert!(program.code.contains(r#"const $2 = element("div");"#));
    assert!(program.code.contains(r#"const $3 = text("Hello, ");"#));
    assert!(program.code.contains("const $4 = text(name);"));
    assert!(
        program
            .code
            .contains("const update$4 = () => { $4.textContent = name; };")
    );
    assert!(program.code.contains(r#"const $5 = text("!");"#));
    assert!(program.code.contains("$2.append($3, $4, $5);"));
    assert!(program.code.contains("$1.append($2);"));
    assert_eq!(program.updates, vec!["update$4".to_string()]);
    assert!(program.code.contains("update$4();"));
    assert!(program.css.is_empty());
}

#[test]
fn child_statements_precede_the_parent_append() {
    let program = generate_str("<div><span>x</span></div>");
    let span_append = program.code.find("$3.append($4);").expect("span append");
    let div_append = program.code.find("$2.append($3);").expect("div append");
    let root_append = program.code.find("$1.append($2);").expect("root append");
    assert!(span_append < div_append);
    assert!(div_append < root_append);
}

#[test]
fn event_listener_runs_handler_then_update_sweep() {
    let program = generate_str(r#"<button :click="count++">Add</button>"#);

    assert!(program.code.contains(r#"const $2 = element("button");"#));
    assert!(program.code.contains(r#"const $3 = text("Add");"#));
    let listener = program.code.find(r#"$2.on("click", () => {"#).expect("listener");
    let handler = program.code.find("count++").expect("handler body");
    let sweep = program.code.find("update();").expect("sweep call");
    assert!(listener < handler);
    assert!(handler < sweep);
    // listeners are registered after the element's own append statement
    let append = program.code.find("$2.append($3);").expect("append");
    assert!(append < listener);
}

#[test]
fn styles_are_extracted_not_constructed() {
    let program = generate_str("<style>a { color: red; }</style><div>x</div><style>b { color: blue; }</style>");

    // document-order concatenation
    assert_eq!(program.css, "a { color: red; }b { color: blue; }");
    // no construction statements for style content
    assert!(!program.code.contains("color: red"));
    assert!(program.code.contains(r#"import "./build.css.js";"#));
    // the import comes first
    assert!(program.code.starts_with(r#"import "./build.css.js";"#));
}

#[test]
fn scripts_are_spliced_at_the_top() {
    let program = generate_str("<script>let count = 0;</script><div>{count}</div>");

    let splice = program.code.find("let count = 0;").expect("spliced script");
    let root = program.code.find("const $1 = ROOT;").expect("root alias");
    assert!(splice < root);
}

#[test]
fn no_import_without_styles() {
    let program = generate_str("<div>x</div>");
    assert!(!program.code.contains("build.css.js"));
}

#[test]
fn runtime_helpers_and_update_sweep_are_emitted() {
    let program = generate_str("<div>{a}</div><div>{b}</div>");

    assert!(program.code.contains("function element(tag)"));
    assert!(program.code.contains("function text(value)"));
    assert!(program.code.contains("el.addEventListener(event, callback);"));

    // sweep calls every registered callback, in registration order
    assert_eq!(program.updates.len(), 2);
    let sweep_start = program.code.find("function update() {").expect("sweep");
    let first = program.code[sweep_start..]
        .find(&format!("{}();", program.updates[0]))
        .expect("first callback");
    let second = program.code[sweep_start..]
        .find(&format!("{}();", program.updates[1]))
        .expect("second callback");
    assert!(first < second);
}

#[test]
fn identifiers_count_in_base36() {
    // 36 allocations roll the counter past one base-36 digit
    let mut src = String::from("<div>");
    for _ in 0..40 {
        src.push_str("<span></span>");
    }
    src.push_str("</div>");
    let program = generate_str(&src);
    assert!(program.code.contains(r#"const $a = element("span");"#));
    assert!(program.code.contains(r#"const $10 = element("span");"#));
}

#[test]
fn nested_brace_expression_is_emitted_whole() {
    let program = generate_str("<p>{fmt({n: count})}</p>");
    assert!(program.code.contains("const $3 = text(fmt({n: count}));"));
    assert!(
        program
            .code
            .contains("const update$3 = () => { $3.textContent = fmt({n: count}); };")
    );
    // nothing of the expression leaks out as a literal sibling
    assert!(!program.code.contains(r#"text(")}")"#));
    assert!(program.code.contains("$2.append($3);"));
}

#[test]
fn generation_is_deterministic() {
    let tree = parse_fragment("<div>Hello, {name}!<button :click=\"n++\">go</button></div>").unwrap();
    let app = build(&tree).unwrap();
    let a = generate(&app);
    let b = generate(&app);
    assert_eq!(a, b);
}

#[test]
fn literal_text_is_quoted_and_escaped() {
    let program = generate_str(r#"<p>say "hi"</p>"#);
    assert!(program.code.contains(r#"const $3 = text("say \"hi\"");"#));
}

#[test]
fn css_artifact_injects_a_style_element() {
    let artifact = css_program("body { margin: 0; }");
    assert!(artifact.contains(r#"const css_code = "body { margin: 0; }";"#));
    assert!(artifact.contains(r#"document.createElement("style")"#));
    assert!(artifact.contains("document.head.appendChild(style);"));
    assert!(artifact.contains("CSS();"));
}
