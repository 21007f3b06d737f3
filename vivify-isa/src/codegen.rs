use std::fmt::Write as _;
use std::io;

use crate::instruction::Instruction;
use crate::operand::OperandKind;

/// The three generated source fragments, in the order they are meant to
/// be embedded: enum declaration, size function, decode function.
///
/// The decode fragment calls `convert(u8, u8, u8, u8) -> i32` for every
/// multi-byte operand; the embedding VM supplies it and owns the
/// endianness convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub type_decl: String,
    pub size_fn: String,
    pub decode_fn: String,
}

impl Artifacts {
    /// Writes the fragments in fixed order, separated by blank lines.
    pub fn write_to<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}\n{}\n{}", self.type_decl, self.size_fn, self.decode_fn)
    }
}

/// Generates all three fragments for the full instruction list.
/// Deterministic: the same list always yields byte-identical text.
pub fn generate(instructions: &[Instruction]) -> Artifacts {
    Artifacts {
        type_decl: type_decl(instructions),
        size_fn: size_fn(instructions),
        decode_fn: decode_fn(instructions),
    }
}

fn type_decl(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str("#[derive(Debug, PartialEq)]\n");
    out.push_str("enum Instruction {\n");
    for inst in instructions {
        let fields: Vec<&str> = inst.operands().iter().map(|op| op.field_type()).collect();
        let _ = writeln!(
            out,
            "\t{}({}), /* {} */",
            inst.name(),
            fields.join(", "),
            inst.opcode()
        );
    }
    out.push_str("}\n");
    out
}

fn size_fn(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str("impl Instruction {\n");
    out.push_str("\tfn size(&self) -> usize {\n");
    out.push_str("\t\tmatch self {\n");
    for inst in instructions {
        let holes: Vec<&str> = inst.operands().iter().map(|_| "_").collect();
        let _ = writeln!(
            out,
            "\t\t\tSelf::{}({}) => {},",
            inst.name(),
            holes.join(", "),
            inst.size_in_bytes()
        );
    }
    out.push_str("\t\t}\n");
    out.push_str("\t}\n");
    out.push_str("}\n");
    out
}

fn decode_fn(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    out.push_str("impl Instruction {\n");
    out.push_str("\tfn decode(bytes: &[u8]) -> Option<Self> {\n");
    out.push_str("\t\tmatch bytes {\n");
    for inst in instructions {
        let _ = writeln!(out, "\t\t\t{}", decode_arm(inst));
    }
    out.push_str("\t\t\t_ => None,\n");
    out.push_str("\t\t}\n");
    out.push_str("\t}\n");
    out.push_str("}\n");
    out
}

/// One slice-pattern arm. Byte binders are numbered sequentially across
/// the whole operand area, just past the opcode byte; the trailing `..`
/// lets longer buffers match while short ones fall through to `None`.
fn decode_arm(inst: &Instruction) -> String {
    let mut pattern = vec![inst.opcode().to_string()];
    let mut args = Vec::new();
    let mut byte = 0;

    for op in inst.operands() {
        match op {
            OperandKind::Register => {
                pattern.push(format!("b{}", byte));
                args.push(format!("*b{}", byte));
                byte += 1;
            }
            OperandKind::Word | OperandKind::Address => {
                let group: Vec<String> = (byte..byte + 4).map(|i| format!("*b{}", i)).collect();
                for i in byte..byte + 4 {
                    pattern.push(format!("b{}", i));
                }
                args.push(format!("convert({})", group.join(", ")));
                byte += 4;
            }
        }
    }
    pattern.push("..".to_string());

    format!(
        "[{}] => Some(Self::{}({})),",
        pattern.join(", "),
        inst.name(),
        args.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const SCENARIO: &str = "\
# ISA
Halt()
LoadByte(address,register)
Add(register,register,register)
";

    #[test]
    fn scenario_type_decl() {
        let artifacts = generate(&parse(SCENARIO).unwrap());
        assert_eq!(
            artifacts.type_decl,
            "#[derive(Debug, PartialEq)]\n\
             enum Instruction {\n\
             \tHalt(), /* 0 */\n\
             \tLoadByte(i32, u8), /* 1 */\n\
             \tAdd(u8, u8, u8), /* 2 */\n\
             }\n"
        );
    }

    #[test]
    fn scenario_size_fn() {
        let artifacts = generate(&parse(SCENARIO).unwrap());
        assert_eq!(
            artifacts.size_fn,
            "impl Instruction {\n\
             \tfn size(&self) -> usize {\n\
             \t\tmatch self {\n\
             \t\t\tSelf::Halt() => 1,\n\
             \t\t\tSelf::LoadByte(_, _) => 6,\n\
             \t\t\tSelf::Add(_, _, _) => 4,\n\
             \t\t}\n\
             \t}\n\
             }\n"
        );
    }

    #[test]
    fn scenario_decode_fn() {
        let artifacts = generate(&parse(SCENARIO).unwrap());
        assert_eq!(
            artifacts.decode_fn,
            "impl Instruction {\n\
             \tfn decode(bytes: &[u8]) -> Option<Self> {\n\
             \t\tmatch bytes {\n\
             \t\t\t[0, ..] => Some(Self::Halt()),\n\
             \t\t\t[1, b0, b1, b2, b3, b4, ..] => Some(Self::LoadByte(convert(*b0, *b1, *b2, *b3), *b4)),\n\
             \t\t\t[2, b0, b1, b2, ..] => Some(Self::Add(*b0, *b1, *b2)),\n\
             \t\t\t_ => None,\n\
             \t\t}\n\
             \t}\n\
             }\n"
        );
    }

    #[test]
    fn word_and_register_interleave() {
        let instructions = parse("Store(register,word)\n").unwrap();
        let artifacts = generate(&instructions);
        assert!(artifacts
            .decode_fn
            .contains("[0, b0, b1, b2, b3, b4, ..] => Some(Self::Store(*b0, convert(*b1, *b2, *b3, *b4))),"));
    }

    #[test]
    fn empty_description_still_generates() {
        let artifacts = generate(&[]);
        assert_eq!(
            artifacts.type_decl,
            "#[derive(Debug, PartialEq)]\nenum Instruction {\n}\n"
        );
        assert!(artifacts.decode_fn.contains("_ => None,"));
    }

    #[test]
    fn write_to_emits_all_three_in_order() {
        let artifacts = generate(&parse(SCENARIO).unwrap());
        let mut buf = Vec::new();
        artifacts.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let decl_at = text.find("enum Instruction").unwrap();
        let size_at = text.find("fn size").unwrap();
        let decode_at = text.find("fn decode").unwrap();
        assert!(decl_at < size_at && size_at < decode_at);
    }

    #[test]
    fn generation_is_deterministic() {
        let instructions = parse(SCENARIO).unwrap();
        assert_eq!(generate(&instructions), generate(&instructions));
    }
}
