//! The stack machine that executes chunks produced by `rlox-compile`.

pub mod vm;

pub use vm::{interpret, InterpretResult, Vm, STACK_MAX};
