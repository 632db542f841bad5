//! Disassembler - human-readable bytecode dump, used both right after
//! compilation (when bytecode dumping is enabled) and before each
//! dispatch step (when execution tracing is enabled).

use rlox_util::index_vec::Idx;

use crate::chunk::{Chunk, ConstIdx, OpCode};

/// Disassemble every instruction in `chunk`, prefixed with `name`.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) {
    println!("== {name} ==");
    let mut offset = 0;
    while offset < chunk.len() {
        offset = disassemble_instruction(chunk, offset);
    }
}

/// Disassemble the instruction at `offset`, printing it, and return the
/// offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
    print!("{offset:04} ");
    if offset > 0 && chunk.line_at(offset) == chunk.line_at(offset - 1) {
        print!("   | ");
    } else {
        print!("{:4} ", chunk.line_at(offset));
    }

    let byte = chunk.code()[offset];
    let Some(op) = OpCode::from_byte(byte) else {
        println!("Unknown opcode {byte}");
        return offset + 1;
    };

    match op {
        OpCode::Constant => constant_instruction("OP_CONSTANT", chunk, offset),
        OpCode::ConstantLong => constant_long_instruction("OP_CONSTANT_LONG", chunk, offset),
        OpCode::Nil => simple_instruction("OP_NIL", offset),
        OpCode::True => simple_instruction("OP_TRUE", offset),
        OpCode::False => simple_instruction("OP_FALSE", offset),
        OpCode::Equal => simple_instruction("OP_EQUAL", offset),
        OpCode::Greater => simple_instruction("OP_GREATER", offset),
        OpCode::Less => simple_instruction("OP_LESS", offset),
        OpCode::Add => simple_instruction("OP_ADD", offset),
        OpCode::Subtract => simple_instruction("OP_SUBTRACT", offset),
        OpCode::Multiply => simple_instruction("OP_MULTIPLY", offset),
        OpCode::Divide => simple_instruction("OP_DIVIDE", offset),
        OpCode::Not => simple_instruction("OP_NOT", offset),
        OpCode::Negate => simple_instruction("OP_NEGATE", offset),
        OpCode::Return => simple_instruction("OP_RETURN", offset),
    }
}

fn simple_instruction(name: &str, offset: usize) -> usize {
    println!("{name}");
    offset + 1
}

fn constant_instruction(name: &str, chunk: &Chunk, offset: usize) -> usize {
    let idx = chunk.code()[offset + 1] as usize;
    println!("{name:-16} {idx:4} '{}'", constant_at(chunk, idx));
    offset + 2
}

fn constant_long_instruction(name: &str, chunk: &Chunk, offset: usize) -> usize {
    let hi = chunk.code()[offset + 1] as usize;
    let mid = chunk.code()[offset + 2] as usize;
    let lo = chunk.code()[offset + 3] as usize;
    let idx = (hi << 16) | (mid << 8) | lo;
    println!("{name:-16} {idx:4} '{}'", constant_at(chunk, idx));
    offset + 4
}

fn constant_at(chunk: &Chunk, idx: usize) -> String {
    chunk.constant(ConstIdx::from_usize(idx)).to_string()
}
