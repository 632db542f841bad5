//! Scanner - turns a source buffer into a lazy sequence of tokens.
//!
//! One public entry point, `scan_next`, classifies exactly one token per
//! call. The scanner holds no buffered lookahead beyond the cursor
//! itself, so it composes naturally with the compiler's one-token
//! lookahead (`current`/`previous`).

use rlox_util::span::Span;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// A stateful cursor over source text that produces one `Token` per call
/// to `scan_next`.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
    token_start: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
        }
    }

    /// Scan and return the next token. Idempotent once EOF is reached.
    pub fn scan_next(&mut self) -> Token<'a> {
        self.skip_whitespace_and_comments();
        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let c = self.cursor.advance();

        if is_digit(c) {
            return self.lex_number();
        }
        if is_alpha(c) {
            return self.lex_identifier();
        }

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            '-' => self.make_token(TokenKind::Minus),
            '+' => self.make_token(TokenKind::Plus),
            ';' => self.make_token(TokenKind::Semicolon),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '!' => self.two_char('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.two_char('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.two_char('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.two_char('=', TokenKind::GreaterEqual, TokenKind::Greater),
            '"' => self.lex_string(),
            _ => self.error_token("Unexpected character."),
        }
    }

    fn two_char(&mut self, follow: char, two: TokenKind, one: TokenKind) -> Token<'a> {
        if self.cursor.matches(follow) {
            self.make_token(two)
        } else {
            self.make_token(one)
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.current_char() {
                ' ' | '\r' | '\t' | '\n' => {
                    self.cursor.advance();
                }
                '/' if self.cursor.peek_char(1) == '/' => {
                    while self.cursor.current_char() != '\n' && !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn lex_string(&mut self) -> Token<'a> {
        while self.cursor.current_char() != '"' && !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        if self.cursor.is_at_end() {
            return self.error_token("Unterminated string.");
        }
        self.cursor.advance(); // closing quote
        self.make_token(TokenKind::String)
    }

    fn lex_number(&mut self) -> Token<'a> {
        while is_digit(self.cursor.current_char()) {
            self.cursor.advance();
        }
        if self.cursor.current_char() == '.' && is_digit(self.cursor.peek_char(1)) {
            self.cursor.advance(); // '.'
            while is_digit(self.cursor.current_char()) {
                self.cursor.advance();
            }
        }
        self.make_token(TokenKind::Number)
    }

    fn lex_identifier(&mut self) -> Token<'a> {
        while is_alpha(self.cursor.current_char()) || is_digit(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start);
        self.make_token(keyword_kind(text).unwrap_or(TokenKind::Identifier))
    }

    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, self.cursor.slice_from(self.token_start), self.cursor.line())
    }

    fn error_token(&self, message: &'static str) -> Token<'a> {
        Token::new(TokenKind::Error, message, self.cursor.line())
    }

    pub fn current_span(&self) -> Span {
        Span::new(self.cursor.line())
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn keyword_kind(text: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match text {
        "and" => And,
        "class" => Class,
        "else" => Else,
        "false" => False,
        "for" => For,
        "fun" => Fun,
        "if" => If,
        "nil" => Nil,
        "or" => Or,
        "print" => Print,
        "return" => Return,
        "super" => Super,
        "this" => This,
        "true" => True,
        "var" => Var,
        "while" => While,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        let mut out = Vec::new();
        loop {
            let token = scanner.scan_next();
            let done = token.kind == TokenKind::Eof;
            out.push(token.kind);
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lex_totality_always_reaches_eof() {
        for src in ["", "   ", "// comment\n", "\"unterminated", "@#$"] {
            let mut scanner = Scanner::new(src);
            let mut saw_eof = false;
            for _ in 0..1000 {
                if scanner.scan_next().kind == TokenKind::Eof {
                    saw_eof = true;
                    break;
                }
            }
            assert!(saw_eof, "scanner never reached EOF for {src:?}");
        }
    }

    #[test]
    fn eof_is_idempotent() {
        let mut scanner = Scanner::new("1");
        scanner.scan_next();
        assert_eq!(scanner.scan_next().kind, TokenKind::Eof);
        assert_eq!(scanner.scan_next().kind, TokenKind::Eof);
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(
            kinds("!= == <= >="),
            vec![
                TokenKind::BangEqual,
                TokenKind::EqualEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn single_char_fallback_when_no_follow() {
        assert_eq!(kinds("! = < >"), vec![
            TokenKind::Bang,
            TokenKind::Equal,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn unterminated_string_is_error_token() {
        let mut scanner = Scanner::new("\"abc");
        let token = scanner.scan_next();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Unterminated string.");
    }

    #[test]
    fn string_literal_lexeme_includes_quotes() {
        let mut scanner = Scanner::new("\"hi\"");
        let token = scanner.scan_next();
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.lexeme, "\"hi\"");
    }

    #[test]
    fn number_with_fraction() {
        let mut scanner = Scanner::new("3.14");
        let token = scanner.scan_next();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "3.14");
    }

    #[test]
    fn trailing_dot_without_digit_is_not_consumed() {
        let mut scanner = Scanner::new("1.");
        let token = scanner.scan_next();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "1");
        assert_eq!(scanner.scan_next().kind, TokenKind::Dot);
    }

    #[test]
    fn keywords_classified() {
        assert_eq!(
            kinds("and or nil true false"),
            vec![
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Nil,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_not_matching_keyword() {
        let mut scanner = Scanner::new("andy");
        assert_eq!(scanner.scan_next().kind, TokenKind::Identifier);
    }

    #[test]
    fn line_comment_skipped_to_newline() {
        let mut scanner = Scanner::new("// hi\n1");
        let token = scanner.scan_next();
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.line, 2);
    }

    #[test]
    fn unknown_byte_is_error_token() {
        let mut scanner = Scanner::new("@");
        let token = scanner.scan_next();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Unexpected character.");
    }
}
