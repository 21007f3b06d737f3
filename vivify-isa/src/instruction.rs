use std::fmt;

use crate::operand::{InvalidOperandKind, OperandKind};

/// One instruction of the described machine. Built once by the parser,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    name: String,
    opcode: usize,
    operands: Vec<OperandKind>,
}

impl Instruction {
    /// Construction from already-validated kinds stays internal; the
    /// public path is `from_tokens`, which validates every token.
    pub(crate) fn new(name: &str, opcode: usize, operands: Vec<OperandKind>) -> Self {
        Self {
            name: name.to_string(),
            opcode,
            operands,
        }
    }

    /// Builds an instruction from raw operand tokens, failing on the
    /// first token that is not a recognized kind.
    pub fn from_tokens<'a, I>(
        name: &str,
        opcode: usize,
        tokens: I,
    ) -> Result<Self, InvalidOperandKind>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let operands = tokens
            .into_iter()
            .map(OperandKind::from_token)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(name, opcode, operands))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn opcode(&self) -> usize {
        self.opcode
    }

    pub fn operands(&self) -> &[OperandKind] {
        &self.operands
    }

    /// Total encoded size: the opcode byte plus every operand's width.
    pub fn size_in_bytes(&self) -> usize {
        1 + self.operands.iter().map(|op| op.width()).sum::<usize>()
    }
}

/// `Name[opcode](kind, ...)` listing form, for `-v` output and error
/// messages. Not an output artifact.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.opcode)?;
        if self.operands.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (i, op) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        write!(f, ")")
    }
}
