use std::fmt;
use std::ops::Range;

use annotate_snippets::{Level, Renderer, Snippet};
use winnow::combinator::delimited;
use winnow::token::take_while;
use winnow::{ModalResult, Parser};

use crate::instruction::Instruction;
use crate::operand::InvalidOperandKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A significant line without a well-formed `Name(...)` shape.
    MalformedInstructionLine,
    /// An operand token that is not `word`, `register` or `address`.
    InvalidOperandKind(InvalidOperandKind),
}

/// A fatal description error. The whole run aborts: no artifact is
/// emitted past the first bad line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    kind: ParseErrorKind,
    line_number: usize,
    line: String,
    span: Range<usize>,
}

impl ParseError {
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// 1-based line number in the description.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The offending line, as written.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Renders the error as an annotated snippet of the source text.
    pub fn display(&self, src: &str, origin: &str) -> String {
        let (title, label) = match &self.kind {
            ParseErrorKind::MalformedInstructionLine => (
                "malformed instruction line".to_string(),
                "expected `Name(kind1,kind2,...)`".to_string(),
            ),
            ParseErrorKind::InvalidOperandKind(err) => (
                err.to_string(),
                "expected `word`, `register` or `address`".to_string(),
            ),
        };

        let msg = Level::Error.title(&title).snippet(
            Snippet::source(src)
                .origin(origin)
                .fold(true)
                .annotation(Level::Error.span(self.span.clone()).label(&label)),
        );

        // Render before `title`/`label` drop; `msg` borrows both.
        let rendered = Renderer::styled().render(msg).to_string();
        rendered
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::MalformedInstructionLine => {
                write!(
                    f,
                    "line {}: malformed instruction line `{}`",
                    self.line_number, self.line
                )
            }
            ParseErrorKind::InvalidOperandKind(err) => {
                write!(f, "line {}: {}", self.line_number, err)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// `Name(args)` shape of a cleaned line: name is everything up to the
/// first `(`, args everything up to the first `)` after it. Anything
/// left beyond the `)` is ignored.
fn shape<'s>(input: &mut &'s str) -> ModalResult<(&'s str, &'s str)> {
    (
        take_while(1.., |c| c != '('),
        delimited('(', take_while(0.., |c| c != ')'), ')'),
    )
        .parse_next(input)
}

/// Parses a full description into the ordered instruction list.
///
/// Comment (`#`) and blank lines are skipped; every other line must be a
/// whitespace-insensitive `Name(kind1,kind2,...)`. The Nth significant
/// line gets opcode N.
pub fn parse(src: &str) -> Result<Vec<Instruction>, ParseError> {
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut opcode = 0;

    for (index, raw) in src.split_inclusive('\n').enumerate() {
        let start = offset;
        offset += raw.len();

        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // The format is whitespace-insensitive even inside names and
        // operand lists, so strip it all before looking at the shape.
        let cleaned: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        let line_span = start..start + line.len();

        let mut rest = cleaned.as_str();
        let (name, args) = shape.parse_next(&mut rest).map_err(|_| ParseError {
            kind: ParseErrorKind::MalformedInstructionLine,
            line_number: index + 1,
            line: line.to_string(),
            span: line_span.clone(),
        })?;

        let tokens = args.split(',').filter(|t| !t.is_empty());
        let instruction = Instruction::from_tokens(name, opcode, tokens).map_err(|err| {
            // Narrow the span to the token when it appears verbatim in
            // the raw line; interior whitespace can make it unfindable.
            let span = line
                .find(err.token())
                .map(|at| start + at..start + at + err.token().len())
                .unwrap_or(line_span.clone());

            ParseError {
                kind: ParseErrorKind::InvalidOperandKind(err),
                line_number: index + 1,
                line: line.to_string(),
                span,
            }
        })?;

        instructions.push(instruction);
        opcode += 1;
    }

    Ok(instructions)
}
