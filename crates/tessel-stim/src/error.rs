//! Error types for the stim text parser.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: {message}")]
    LexerError { line: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Input ended inside a construct.
    #[error("Unexpected end of input at line {line}: {context}")]
    UnexpectedEof { line: usize, context: String },

    /// Instruction name not understood.
    #[error("Unknown instruction '{name}' at line {line}")]
    UnknownInstruction { line: usize, name: String },

    /// Wrong number of parenthesised arguments.
    #[error("Instruction '{name}' at line {line} expects {expected} arguments, got {got}")]
    WrongArgumentCount {
        line: usize,
        name: String,
        expected: usize,
        got: usize,
    },

    /// A target is not valid for the instruction.
    #[error("Invalid target for '{name}' at line {line}: {target}")]
    InvalidTarget {
        line: usize,
        name: String,
        target: String,
    },

    /// `REPEAT 0` has no meaning.
    #[error("Repeat count must be at least 1 at line {line}")]
    InvalidRepeatCount { line: usize },

    /// A `}` with no open block.
    #[error("Unmatched '}}' at line {line}")]
    UnmatchedBrace { line: usize },

    /// IR error during program construction.
    #[error("Circuit error at line {line}: {source}")]
    CircuitError {
        line: usize,
        #[source]
        source: tessel_ir::IrError,
    },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
