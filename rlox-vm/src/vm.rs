//! Stack-based dispatch loop.

use rlox_bytecode::{disassemble_instruction, Chunk, ConstIdx, InternTable, OpCode, Value};
use rlox_util::diagnostic::Handler;
use rlox_util::index_vec::Idx;

/// Initial stack capacity. The stack is a growable `Vec` rather than a
/// fixed array; this grammar has no recursion deep enough to approach
/// the bound, so there is no overflow check.
pub const STACK_MAX: usize = 256;

/// Outcome of one `interpret` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

/// An instance of the virtual machine: the string table and the value
/// stack persist across `interpret` calls. A runtime error clears the
/// stack but otherwise leaves the VM usable for a subsequent call.
pub struct Vm {
    strings: InternTable,
    stack: Vec<Value>,
}

impl Vm {
    pub fn new() -> Self {
        Self {
            strings: InternTable::new(),
            stack: Vec::with_capacity(STACK_MAX),
        }
    }

    pub fn strings_mut(&mut self) -> &mut InternTable {
        &mut self.strings
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> Value {
        self.stack
            .pop()
            .expect("VM stack underflow: compiler emitted unbalanced bytecode")
    }

    /// Execute `chunk` from its first byte until `RETURN` or a runtime
    /// error. When `trace_execution` is set, the stack is logged at
    /// `trace` level and the next instruction is disassembled to stdout
    /// before each dispatch step.
    pub fn run(&mut self, chunk: &Chunk, handler: &Handler, trace_execution: bool) -> InterpretResult {
        self.stack.clear();
        let mut ip = 0usize;

        loop {
            if trace_execution {
                tracing::trace!(stack = ?format_stack(&self.stack), "dispatch");
                disassemble_instruction(chunk, ip);
            }

            let byte = chunk.code()[ip];
            ip += 1;

            let Some(op) = OpCode::from_byte(byte) else {
                self.stack.clear();
                handler.runtime_error(chunk.line_at(ip - 1), "Invalid opcode.");
                return InterpretResult::RuntimeError;
            };

            match op {
                OpCode::Constant => {
                    let idx = chunk.code()[ip] as usize;
                    ip += 1;
                    self.push(chunk.constant(ConstIdx::from_usize(idx)).clone());
                }
                OpCode::ConstantLong => {
                    let hi = chunk.code()[ip] as usize;
                    let mid = chunk.code()[ip + 1] as usize;
                    let lo = chunk.code()[ip + 2] as usize;
                    ip += 3;
                    let idx = (hi << 16) | (mid << 8) | lo;
                    self.push(chunk.constant(ConstIdx::from_usize(idx)).clone());
                }
                OpCode::Nil => self.push(Value::Nil),
                OpCode::True => self.push(Value::Bool(true)),
                OpCode::False => self.push(Value::Bool(false)),
                OpCode::Equal => {
                    let b = self.pop();
                    let a = self.pop();
                    self.push(Value::Bool(a == b));
                }
                OpCode::Greater | OpCode::Less | OpCode::Subtract | OpCode::Multiply | OpCode::Divide => {
                    let b = self.pop();
                    let a = self.pop();
                    match (a.as_number(), b.as_number()) {
                        (Some(a), Some(b)) => {
                            let result = match op {
                                OpCode::Greater => Value::Bool(a > b),
                                OpCode::Less => Value::Bool(a < b),
                                OpCode::Subtract => Value::Number(a - b),
                                OpCode::Multiply => Value::Number(a * b),
                                OpCode::Divide => Value::Number(a / b),
                                _ => unreachable!(),
                            };
                            self.push(result);
                        }
                        _ => {
                            self.stack.clear();
                            handler.runtime_error(chunk.line_at(ip - 1), "Operands must be numbers.");
                            return InterpretResult::RuntimeError;
                        }
                    }
                }
                OpCode::Add => {
                    let b = self.pop();
                    let a = self.pop();
                    match (a.as_number(), b.as_number(), a.as_string(), b.as_string()) {
                        (Some(x), Some(y), _, _) => self.push(Value::Number(x + y)),
                        (_, _, Some(x), Some(y)) => {
                            let concatenated = format!("{x}{y}");
                            let obj = self.strings.intern_take(concatenated);
                            self.push(Value::Obj(obj));
                        }
                        _ => {
                            self.stack.clear();
                            handler.runtime_error(
                                chunk.line_at(ip - 1),
                                "Operands must be two numbers or two strings.",
                            );
                            return InterpretResult::RuntimeError;
                        }
                    }
                }
                OpCode::Not => {
                    let v = self.pop();
                    self.push(Value::Bool(v.is_falsey()));
                }
                OpCode::Negate => {
                    if !self.stack.last().map(Value::is_number).unwrap_or(false) {
                        self.stack.clear();
                        handler.runtime_error(chunk.line_at(ip - 1), "Operand must be a number.");
                        return InterpretResult::RuntimeError;
                    }
                    let n = self.pop().as_number().expect("checked above");
                    self.push(Value::Number(-n));
                }
                OpCode::Return => {
                    let value = self.pop();
                    println!("{value}");
                    return InterpretResult::Ok;
                }
            }
        }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

fn format_stack(stack: &[Value]) -> String {
    let mut out = String::from("[ ");
    for value in stack {
        out.push_str(&value.to_string());
        out.push(' ');
    }
    out.push(']');
    out
}

/// Compile `source` into a fresh chunk and run it, the single entry
/// point for both the REPL and single-file execution.
pub fn interpret(
    vm: &mut Vm,
    source: &str,
    handler: &Handler,
    print_code: bool,
    trace_execution: bool,
) -> InterpretResult {
    let mut chunk = Chunk::new();
    if !rlox_compile::compile(source, &mut chunk, vm.strings_mut(), handler, print_code) {
        return InterpretResult::CompileError;
    }
    vm.run(&chunk, handler, trace_execution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_source(source: &str) -> (InterpretResult, usize) {
        let mut vm = Vm::new();
        let handler = Handler::new();
        let result = interpret(&mut vm, source, &handler, false, false);
        (result, handler.error_count())
    }

    #[test]
    fn arithmetic_precedence() {
        let (result, errors) = run_source("1 + 2 * 3");
        assert_eq!(result, InterpretResult::Ok);
        assert_eq!(errors, 0);
    }

    #[test]
    fn string_equality_via_interning() {
        let (result, _) = run_source("\"he\" + \"llo\" == \"hello\"");
        assert_eq!(result, InterpretResult::Ok);
    }

    #[test]
    fn negating_a_bool_is_a_runtime_error() {
        let (result, _) = run_source("-true");
        assert_eq!(result, InterpretResult::RuntimeError);
    }

    #[test]
    fn adding_number_and_string_is_a_runtime_error() {
        let (result, _) = run_source("1 + \"a\"");
        assert_eq!(result, InterpretResult::RuntimeError);
    }

    #[test]
    fn unterminated_binary_expression_is_a_compile_error() {
        let (result, errors) = run_source("1 +");
        assert_eq!(result, InterpretResult::CompileError);
        assert_eq!(errors, 1);
    }

    #[test]
    fn vm_is_reusable_after_a_runtime_error() {
        let mut vm = Vm::new();
        let handler = Handler::new();
        assert_eq!(interpret(&mut vm, "-true", &handler, false, false), InterpretResult::RuntimeError);
        assert_eq!(interpret(&mut vm, "1 + 1", &handler, false, false), InterpretResult::Ok);
    }

    #[test]
    fn less_equal_desugars_correctly() {
        let (result, _) = run_source("1 <= 2");
        assert_eq!(result, InterpretResult::Ok);
    }
}
