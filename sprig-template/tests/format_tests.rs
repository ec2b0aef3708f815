use sprig_template::{OutputMode, compile, format_program};

#[test]
fn readable_indents_by_brace_depth() {
    let code = "function update() {\nupdate$4();\n}\n";
    let formatted = format_program(code, OutputMode::Readable);
    assert_eq!(formatted, "function update() {\n  update$4();\n}\n");
}

#[test]
fn minified_strips_indentation_and_blank_lines() {
    let code = "function update() {\n  update$4();\n\n}\n";
    let minified = format_program(code, OutputMode::Minified);
    assert_eq!(minified, "function update() {\nupdate$4();\n}\n");
}

#[test]
fn braces_inside_strings_do_not_affect_depth() {
    let code = "const $3 = text(\"a { b\");\nconst $4 = text(\"c\");\n";
    let formatted = format_program(code, OutputMode::Readable);
    assert_eq!(formatted, code);
}

#[test]
fn modes_agree_up_to_whitespace() {
    let program = compile(
        "<div><button :click=\"n++\">go</button>{n}</div><style>b { x: y; }</style>",
    )
    .unwrap();
    let readable = format_program(&program.code, OutputMode::Readable);
    let minified = format_program(&program.code, OutputMode::Minified);

    let strip = |s: &str| {
        s.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(&readable), strip(&minified));
}
