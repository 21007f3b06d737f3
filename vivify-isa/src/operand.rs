use std::fmt;

use winnow::combinator::alt;
use winnow::{ModalResult, Parser};

/// An operand token that is not one of the recognized kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidOperandKind {
    token: String,
}

impl InvalidOperandKind {
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Display for InvalidOperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid operand kind `{}`", self.token)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperandKind {
    Word,
    Register,
    Address,
}

fn kind(input: &mut &str) -> ModalResult<OperandKind> {
    alt((
        "word".value(OperandKind::Word),
        "register".value(OperandKind::Register),
        "address".value(OperandKind::Address),
    ))
    .parse_next(input)
}

impl OperandKind {
    /// Parses a full operand token. Case-sensitive, no aliases,
    /// nothing before or after the keyword.
    pub fn from_token(token: &str) -> Result<OperandKind, InvalidOperandKind> {
        kind.parse(token).map_err(|_| InvalidOperandKind {
            token: token.to_string(),
        })
    }

    /// Encoded width in bytes. Register operands are a single raw byte,
    /// word and address operands are 32-bit groups.
    pub fn width(self) -> usize {
        match self {
            Self::Register => 1,
            Self::Word => 4,
            Self::Address => 4,
        }
    }

    /// Field type of the operand in the generated instruction enum.
    pub fn field_type(self) -> &'static str {
        match self {
            Self::Register => "u8",
            Self::Word | Self::Address => "i32",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Word => "word",
            Self::Register => "register",
            Self::Address => "address",
        };
        f.write_str(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_tokens() {
        assert_eq!(OperandKind::from_token("word"), Ok(OperandKind::Word));
        assert_eq!(
            OperandKind::from_token("register"),
            Ok(OperandKind::Register)
        );
        assert_eq!(
            OperandKind::from_token("address"),
            Ok(OperandKind::Address)
        );
    }

    #[test]
    fn rejected_tokens() {
        for token in ["", "Word", "WORD", "wordx", "xword", "reg", "addr", "w ord"] {
            let err = OperandKind::from_token(token).unwrap_err();
            assert_eq!(err.token(), token);
        }
    }

    #[test]
    fn widths() {
        assert_eq!(OperandKind::Register.width(), 1);
        assert_eq!(OperandKind::Word.width(), 4);
        assert_eq!(OperandKind::Address.width(), 4);
    }

    #[test]
    fn field_types() {
        assert_eq!(OperandKind::Register.field_type(), "u8");
        assert_eq!(OperandKind::Word.field_type(), "i32");
        assert_eq!(OperandKind::Address.field_type(), "i32");
    }
}
