use thiserror::Error;

/// Result alias used throughout the decoder.
pub(crate) type Result<T> = core::result::Result<T, DecodeError>;

/// A decode failure, carrying the 1-based line and column of the byte at
/// which the error was diagnosed.
///
/// The `Display` form is the flat diagnostic `"<error text> at line L col C"`.
/// Columns count UTF-8 code points from the start of the line, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line} col {column}")]
pub struct DecodeError {
    pub(crate) kind: ErrorKind,
    /// 1-based line of the offending byte.
    pub line: usize,
    /// 1-based column of the offending byte, in code points.
    pub column: usize,
}

impl DecodeError {
    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// Every diagnostic the decoder can produce.
///
/// End-of-input is not represented here: it is a token variant inside the
/// tokenizer, and is only converted into one of the `Unclosed*` kinds when it
/// is reached while a container or string is still open.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    // Input errors.
    #[error("invalid character")]
    InvalidChar,
    #[error("truncated character")]
    TruncatedChar,

    // Lexical errors.
    #[error("unclosed double quote string")]
    UnclosedDoubleQuoteString,
    #[error("unclosed single quote string")]
    UnclosedSingleQuoteString,
    #[error("newline in double quote string")]
    NewlineInDoubleQuoteString,
    #[error("newline in single quote string")]
    NewlineInSingleQuoteString,
    #[error("unclosed slash star comment")]
    UnclosedSlashStarComment,
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,
    #[error("margin must be whitespace only")]
    MarginMustBeWhitespaceOnly,
    #[error("missing newline specifier")]
    MissingNewlineSpecifier,
    #[error("invalid newline specifier")]
    InvalidNewlineSpecifier,
    #[error("invalid multiline start")]
    InvalidMultilineStart,
    #[error("invalid margin character")]
    InvalidMarginChar,
    #[error("unclosed multiline string")]
    UnclosedMultiline,

    // Structural errors.
    #[error("unexpected close brace")]
    UnexpectedCloseBrace,
    #[error("unexpected close square bracket")]
    UnexpectedCloseSquare,
    #[error("unclosed object")]
    UnclosedObject,
    #[error("unclosed array")]
    UnclosedArray,
    #[error("syntax error")]
    SyntaxError,
    #[error("max object or array depth exceeded")]
    MaxObjectArrayDepth,
    #[error("expect string identifier")]
    ExpectStringIdentifier,
    #[error("expect colon")]
    ExpectColon,
    #[error("expect identifier after comma")]
    ExpectIdentifierAfterComma,
    #[error("expect value after comma")]
    ExpectValueAfterComma,

    // Numeric-expression errors.
    #[error("invalid numeric expression")]
    InvalidNumericExpression,
    #[error("invalid binary number")]
    InvalidBinaryNumber,
    #[error("invalid hexadecimal number")]
    InvalidHexadecimalNumber,
    #[error("invalid octal number")]
    InvalidOctalNumber,
    #[error("invalid integer number")]
    InvalidIntegerNumber,
    #[error("invalid decimal number")]
    InvalidDecimalNumber,
    #[error("invalid ISO date-time")]
    InvalidIsoDateTime,
    #[error("number overflow")]
    NumberOverflow,
    #[error("division by zero")]
    DivisionByZero,
    #[error("operand must be integer")]
    OperandMustBeInteger,
    #[error("unopened parenthesis")]
    UnopenedParenthesis,
    #[error("unclosed parenthesis")]
    UnclosedParenthesis,
    #[error("missing operand")]
    MissingOperand,
}
