//! The eight opcodes. Every other byte is a no-op.

pub const LESS: u8 = b'<';
pub const GREATER: u8 = b'>';
pub const MINUS: u8 = b'-';
pub const PLUS: u8 = b'+';
pub const DOT: u8 = b'.';
pub const COMMA: u8 = b',';
pub const LBRACKET: u8 = b'[';
pub const RBRACKET: u8 = b']';

/// Returns true if the byte has an effect when executed.
pub fn is_instruction(byte: u8) -> bool {
    matches!(
        byte,
        LESS | GREATER | MINUS | PLUS | DOT | COMMA | LBRACKET | RBRACKET
    )
}

/// Count the bytes in `program` that are instructions.
pub fn instruction_count(program: &[u8]) -> usize {
    program.iter().filter(|&&b| is_instruction(b)).count()
}
