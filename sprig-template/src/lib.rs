pub mod error;
pub mod format;
pub mod markup;
pub mod template_ast;
pub mod template_build;
pub mod template_codegen;

pub use error::CompileError;
pub use format::{OutputMode, format_program};
pub use markup::{MarkupAttr, MarkupNode, Pos, parse_fragment};
pub use template_ast::{App, EventBinding, Node};
pub use template_build::build;
pub use template_codegen::{Program, css_program, generate};

/// Full pipeline: template text -> parse tree -> AST -> generated program.
/// Each call owns its compilation state; independent templates compiled in
/// one process never interfere.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let tree = parse_fragment(source)?;
    let app = build(&tree)?;
    Ok(generate(&app))
}
