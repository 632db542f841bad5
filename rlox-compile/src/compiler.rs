//! Single-pass Pratt compiler: parses and emits bytecode in the same
//! walk, with no intermediate AST.

use rlox_bytecode::{disassemble_chunk, Chunk, InternTable, OpCode, Value};
use rlox_lex::{Scanner, Token, TokenKind};
use rlox_util::diagnostic::{Diagnostic, Handler};
use rlox_util::span::Span;

use crate::precedence::Precedence;

type ParseFn = for<'a> fn(&mut Compiler<'a>);

struct Rule {
    prefix: Option<ParseFn>,
    infix: Option<ParseFn>,
    precedence: Precedence,
}

fn rule_for(kind: TokenKind) -> Rule {
    use TokenKind::*;
    match kind {
        LeftParen => Rule { prefix: Some(grouping), infix: None, precedence: Precedence::None },
        Minus => Rule { prefix: Some(unary), infix: Some(binary), precedence: Precedence::Term },
        Plus => Rule { prefix: None, infix: Some(binary), precedence: Precedence::Term },
        Slash | Star => Rule { prefix: None, infix: Some(binary), precedence: Precedence::Factor },
        Bang => Rule { prefix: Some(unary), infix: None, precedence: Precedence::None },
        BangEqual | EqualEqual => {
            Rule { prefix: None, infix: Some(binary), precedence: Precedence::Equality }
        }
        Greater | GreaterEqual | Less | LessEqual => {
            Rule { prefix: None, infix: Some(binary), precedence: Precedence::Comparison }
        }
        Number => Rule { prefix: Some(number), infix: None, precedence: Precedence::None },
        String => Rule { prefix: Some(string), infix: None, precedence: Precedence::None },
        False | Nil | True => Rule { prefix: Some(literal), infix: None, precedence: Precedence::None },
        _ => Rule { prefix: None, infix: None, precedence: Precedence::None },
    }
}

/// Parser state for one `compile` call: the scanner, one token of
/// lookahead either side of the cursor, and error-recovery flags.
pub struct Compiler<'a> {
    scanner: Scanner<'a>,
    previous: Token<'a>,
    current: Token<'a>,
    had_error: bool,
    panic_mode: bool,
    chunk: &'a mut Chunk,
    strings: &'a mut InternTable,
    handler: &'a Handler,
    print_code: bool,
}

/// Compile `source` into `chunk`, interning any string literals into
/// `strings`. Returns `true` iff compilation succeeded; on failure the
/// chunk's contents are unspecified (the caller may still drop it).
pub fn compile(
    source: &str,
    chunk: &mut Chunk,
    strings: &mut InternTable,
    handler: &Handler,
    print_code: bool,
) -> bool {
    tracing::debug!(bytes = source.len(), "compiling source");
    let dummy = Token::new(TokenKind::Eof, "", 0);
    let mut compiler = Compiler {
        scanner: Scanner::new(source),
        previous: dummy,
        current: dummy,
        had_error: false,
        panic_mode: false,
        chunk,
        strings,
        handler,
        print_code,
    };
    compiler.advance();
    compiler.parse_precedence(Precedence::Assignment);
    compiler.consume(TokenKind::Eof, "Expect end of expression.");
    compiler.end_compiler();
    let ok = !compiler.had_error;
    tracing::debug!(ok, "compile finished");
    ok
}

impl<'a> Compiler<'a> {
    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.scan_next();
            if self.current.kind != TokenKind::Error {
                break;
            }
            self.error_at_current(self.current.lexeme);
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();
        let Some(prefix) = rule_for(self.previous.kind).prefix else {
            self.error("Expect expression.");
            return;
        };
        prefix(self);

        while precedence <= rule_for(self.current.kind).precedence {
            self.advance();
            let infix = rule_for(self.previous.kind)
                .infix
                .expect("a token with a set precedence must have an infix rule");
            infix(self);
        }
    }

    fn emit_constant(&mut self, value: Value, line: u32) {
        if self.chunk.write_constant(value, line).is_none() {
            self.error("Too many constants in one chunk.");
        }
    }

    fn end_compiler(&mut self) {
        let line = self.previous.line;
        self.chunk.write_op(OpCode::Return, line);
        if self.print_code && !self.had_error {
            disassemble_chunk(self.chunk, "code");
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.error_at(self.previous, message);
    }

    fn error_at_current(&mut self, message: impl Into<String>) {
        self.error_at(self.current, message);
    }

    /// Reports at most one diagnostic per error burst: once `panic_mode`
    /// is set, further errors are swallowed until the next successful
    /// `consume` — for this expression-only grammar that's only the
    /// trailing EOF, so there is exactly one synchronization point.
    fn error_at(&mut self, token: Token<'a>, message: impl Into<String>) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        self.had_error = true;
        let lexeme = if token.kind == TokenKind::Eof { None } else { Some(token.lexeme) };
        self.handler
            .report(Diagnostic::compile_error(Span::new(token.line), lexeme, message));
    }
}

fn grouping(compiler: &mut Compiler) {
    compiler.parse_precedence(Precedence::Assignment);
    compiler.consume(TokenKind::RightParen, "Expect ')' after expression.");
}

fn unary(compiler: &mut Compiler) {
    let operator = compiler.previous.kind;
    let line = compiler.previous.line;
    compiler.parse_precedence(Precedence::Unary);
    match operator {
        TokenKind::Minus => compiler.chunk.write_op(OpCode::Negate, line),
        TokenKind::Bang => compiler.chunk.write_op(OpCode::Not, line),
        _ => unreachable!("unary() dispatched for non-unary token kind"),
    }
}

fn binary(compiler: &mut Compiler) {
    let operator = compiler.previous.kind;
    let line = compiler.previous.line;
    let precedence = rule_for(operator).precedence;
    compiler.parse_precedence(precedence.next());
    match operator {
        TokenKind::Plus => compiler.chunk.write_op(OpCode::Add, line),
        TokenKind::Minus => compiler.chunk.write_op(OpCode::Subtract, line),
        TokenKind::Star => compiler.chunk.write_op(OpCode::Multiply, line),
        TokenKind::Slash => compiler.chunk.write_op(OpCode::Divide, line),
        TokenKind::EqualEqual => compiler.chunk.write_op(OpCode::Equal, line),
        TokenKind::BangEqual => {
            compiler.chunk.write_op(OpCode::Equal, line);
            compiler.chunk.write_op(OpCode::Not, line);
        }
        TokenKind::Greater => compiler.chunk.write_op(OpCode::Greater, line),
        TokenKind::GreaterEqual => {
            compiler.chunk.write_op(OpCode::Less, line);
            compiler.chunk.write_op(OpCode::Not, line);
        }
        TokenKind::Less => compiler.chunk.write_op(OpCode::Less, line),
        TokenKind::LessEqual => {
            compiler.chunk.write_op(OpCode::Greater, line);
            compiler.chunk.write_op(OpCode::Not, line);
        }
        _ => unreachable!("binary() dispatched for non-binary token kind"),
    }
}

fn number(compiler: &mut Compiler) {
    let line = compiler.previous.line;
    let value: f64 = compiler
        .previous
        .lexeme
        .parse()
        .expect("scanner guarantees a well-formed number lexeme");
    compiler.emit_constant(Value::Number(value), line);
}

fn string(compiler: &mut Compiler) {
    let line = compiler.previous.line;
    let lexeme = compiler.previous.lexeme;
    let content = &lexeme[1..lexeme.len() - 1];
    let obj = compiler.strings.intern_copy(content);
    compiler.emit_constant(Value::Obj(obj), line);
}

fn literal(compiler: &mut Compiler) {
    let line = compiler.previous.line;
    match compiler.previous.kind {
        TokenKind::False => compiler.chunk.write_op(OpCode::False, line),
        TokenKind::Nil => compiler.chunk.write_op(OpCode::Nil, line),
        TokenKind::True => compiler.chunk.write_op(OpCode::True, line),
        _ => unreachable!("literal() dispatched for non-literal token kind"),
    }
}
