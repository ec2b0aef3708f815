use thiserror::Error;

use crate::markup::Pos;

/// Everything that can go wrong between reading a template and holding a
/// well-typed AST. Generation itself never fails: all input-shape problems
/// surface here, at or before the build boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("malformed template expression at {pos}: `{{` without a matching `}}`")]
    MalformedTemplateExpression { pos: Pos },

    #[error("event binding `{name}` at {pos} has no handler source")]
    MissingRequiredAttribute { name: String, pos: Pos },

    #[error("unsupported node kind `{kind}` at {pos}")]
    UnsupportedNodeKind { kind: String, pos: Pos },

    #[error("`<{tag}>` at {pos} is never closed")]
    UnterminatedRawText { tag: String, pos: Pos },
}
