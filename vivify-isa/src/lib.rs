//! Compiles a line-oriented instruction set description into Rust
//! decode/size logic for that instruction set.
//!
//! A description is one instruction per line, `Name(kind1,kind2,...)`,
//! with each kind one of `word`, `register` or `address`. Whitespace is
//! insignificant; `#` lines and blank lines are skipped. Opcodes are
//! positional: the Nth significant line gets opcode N.
//!
//! The output is three source fragments meant to be embedded into a VM:
//! the instruction enum, an exhaustive size function, and a
//! slice-pattern decode function. Multi-byte operands are read through a
//! `convert(u8, u8, u8, u8) -> i32` the embedding VM supplies.

mod codegen;
mod instruction;
mod operand;
mod parser;

pub use codegen::{generate, Artifacts};
pub use instruction::Instruction;
pub use operand::{InvalidOperandKind, OperandKind};
pub use parser::{parse, ParseError, ParseErrorKind};

/// Parses a description and generates its artifacts in one step.
pub fn compile(src: &str) -> Result<Artifacts, ParseError> {
    let instructions = parse(src)?;
    Ok(generate(&instructions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_aborts_without_artifacts() {
        assert!(compile("Halt()\nBad stuff\n").is_err());
    }

    #[test]
    fn compile_of_valid_description() {
        let artifacts = compile("Nop()\n").unwrap();
        assert!(artifacts.type_decl.contains("Nop(), /* 0 */"));
    }
}
