//! Bytecode representation: values, heap objects, string interning,
//! chunks, and the disassembler used to inspect them.

pub mod chunk;
pub mod disasm;
pub mod intern;
pub mod object;
pub mod value;

pub use chunk::{Chunk, ConstIdx, OpCode, MAX_CONSTANTS};
pub use disasm::{disassemble_chunk, disassemble_instruction};
pub use intern::InternTable;
pub use object::{new_string_obj, Obj, ObjRef, ObjString};
pub use value::Value;
