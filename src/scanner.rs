//! Lexical scanner for the Yatay scripting language (`spec.md` §4.1).
//!
//! The scanner consumes a UTF-8 source string and emits an ordered
//! sequence of tokens terminated by exactly one `EndOfFile` token. It
//! keeps three cursors into the source: `token_start` (first character of
//! the token being scanned), `current` (next character to consume), and
//! `line` (1-based, incremented on every `\n`). Scan errors are reported
//! into the `Diagnostics` sink but never stop scanning — the scanner
//! always produces a complete (possibly partial) token stream.

use crate::diagnostics::Diagnostics;
use crate::token::{Literal, Token, TokenKind};

/// Smallest and largest magnitude a number literal may have: the inclusive
/// range of exact integer representation in `f64` (±2^53).
const MAX_EXACT_INTEGER_MAGNITUDE: f64 = 9_007_199_254_740_992.0; // 2^53

pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    token_start: usize,
    current: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            token_start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the entire source into a token stream, reporting any scan
    /// errors into `diagnostics`. Always returns a stream ending in exactly
    /// one `EndOfFile` token, even if errors were reported along the way.
    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        while !self.is_at_end() {
            self.token_start = self.current;
            self.scan_token(diagnostics);
        }
        self.tokens
            .push(Token::new(TokenKind::EndOfFile, "", None, self.line));
        self.tokens
    }

    fn scan_token(&mut self, diagnostics: &mut Diagnostics) {
        let c = self.advance();
        match c {
            '(' => self.add_token(TokenKind::OpeningParenthesis),
            ')' => self.add_token(TokenKind::ClosingParenthesis),
            '[' => self.add_token(TokenKind::OpeningSquareBracket),
            ']' => self.add_token(TokenKind::ClosingSquareBracket),
            '{' => self.add_token(TokenKind::OpeningCurlyBrace),
            '}' => self.add_token(TokenKind::ClosingCurlyBrace),
            '.' => self.add_token(TokenKind::Dot),
            ',' => self.add_token(TokenKind::Comma),
            ';' => self.add_token(TokenKind::Semicolon),
            '#' => self.add_token(TokenKind::Hash),
            '+' => self.add_token(TokenKind::Plus),
            '-' => self.add_token(TokenKind::Minus),
            '*' => self.add_token(TokenKind::Asterisk),
            '/' => {
                if self.match_char('/') {
                    self.add_token(TokenKind::DoubleSlash);
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }
            ':' => {
                if self.match_char(':') {
                    // Line comment: discard up to but not including '\n' or EOF.
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenKind::Colon);
                }
            }
            '=' => {
                if self.match_char('<') {
                    self.add_token(TokenKind::LessOrEqual);
                } else {
                    self.add_token(TokenKind::Equal);
                }
            }
            '>' => {
                if self.match_char('<') {
                    self.add_token(TokenKind::Unequal);
                } else if self.match_char('=') {
                    self.add_token(TokenKind::GreaterOrEqual);
                } else {
                    self.add_token(TokenKind::Greater);
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.add_token(TokenKind::Assign);
                } else {
                    self.add_token(TokenKind::Less);
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => self.string(diagnostics),
            c if c.is_ascii_digit() => self.number(diagnostics),
            c if is_identifier_start(c) => self.identifier(),
            other => {
                diagnostics.error(self.line, format!("unexpected character '{}'", other));
            }
        }
    }

    fn string(&mut self, diagnostics: &mut Diagnostics) {
        while self.peek() != '"' && self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }

        if self.peek() != '"' {
            diagnostics.error(self.line, "closing quotation mark not found");
            return;
        }

        // Consume the closing quote.
        self.advance();

        let value: String = self.source[self.token_start + 1..self.current - 1]
            .iter()
            .collect();
        self.add_token_with_literal(TokenKind::String, Some(Literal::Text(value)));
    }

    fn number(&mut self, diagnostics: &mut Diagnostics) {
        if !self.consume_digit_run(diagnostics) {
            return;
        }

        if self.peek() == ',' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume ','
            if !self.consume_digit_run(diagnostics) {
                return;
            }
        }

        let lexeme: String = self.source[self.token_start..self.current].iter().collect();
        let normalized: String = lexeme.replace(',', ".").replace('_', "");

        match normalized.parse::<f64>() {
            Ok(value) => {
                if value.abs() > MAX_EXACT_INTEGER_MAGNITUDE {
                    diagnostics.error(self.line, "magnitude too large to represent in memory");
                    return;
                }
                self.add_token_with_literal(TokenKind::Number, Some(Literal::Number(value)));
            }
            Err(_) => {
                diagnostics.error(self.line, format!("invalid number literal '{}'", lexeme));
            }
        }
    }

    /// Consumes one or more digits, optionally separated by single
    /// underscores, reporting the underscore-placement errors from
    /// `spec.md` §4.1. Returns `false` (and has already reported an error)
    /// if the digit run is malformed.
    fn consume_digit_run(&mut self, diagnostics: &mut Diagnostics) -> bool {
        if !self.peek().is_ascii_digit() {
            diagnostics.error(self.line, "expected digit in number literal");
            return false;
        }

        loop {
            let c = self.peek();
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '_' {
                if self.peek_next() == '_' {
                    diagnostics.error(self.line, "no two consecutive underscores");
                    return false;
                }
                if !self.peek_next().is_ascii_digit() {
                    // Trailing underscore: either at the end of the number
                    // or immediately before the ',' separator.
                    diagnostics.error(self.line, "underscore must be between two digits");
                    return false;
                }
                self.advance();
            } else {
                break;
            }
        }

        true
    }

    fn identifier(&mut self) {
        while is_identifier_continue(self.peek()) {
            self.advance();
        }

        let lexeme: String = self.source[self.token_start..self.current].iter().collect();
        let kind = keyword_kind(&lexeme).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.add_token_with_literal(kind, None);
    }

    fn add_token_with_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let lexeme: String = self.source[self.token_start..self.current].iter().collect();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic() || is_spanish_letter(c)
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric() || is_spanish_letter(c)
}

fn is_spanish_letter(c: char) -> bool {
    matches!(
        c,
        'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü' | 'ñ' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Ü' | 'Ñ'
    )
}

fn keyword_kind(lexeme: &str) -> Option<TokenKind> {
    Some(match lexeme {
        "base" => TokenKind::KeywordBase,
        "clase" => TokenKind::KeywordClase,
        "definir" => TokenKind::KeywordDefinir,
        "devolver" => TokenKind::KeywordDevolver,
        "falso" => TokenKind::KeywordFalso,
        "instancia" => TokenKind::KeywordInstancia,
        "mientras" => TokenKind::KeywordMientras,
        "no" => TokenKind::KeywordNo,
        "o" => TokenKind::KeywordO,
        "repetir" => TokenKind::KeywordRepetir,
        "si" => TokenKind::KeywordSi,
        "sino" => TokenKind::KeywordSino,
        "verdadero" => TokenKind::KeywordVerdadero,
        "y" => TokenKind::KeywordY,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(src: &str) -> (Vec<Token>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let tokens = Scanner::new(src).scan_tokens(&mut diagnostics);
        (tokens, diagnostics)
    }

    #[test]
    fn empty_source_yields_only_eof() {
        let (tokens, diagnostics) = scan("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
        assert_eq!(tokens[0].line, 1);
        assert!(!diagnostics.had_static_error());
    }

    #[test]
    fn single_space_yields_only_eof_on_line_one() {
        let (tokens, _) = scan(" ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn three_newlines_advance_to_line_four() {
        let (tokens, _) = scan("\n\n\n");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].line, 4);
    }

    #[test]
    fn single_slash_vs_double_slash() {
        let (tokens, _) = scan("/ //");
        assert_eq!(tokens[0].kind, TokenKind::Slash);
        assert_eq!(tokens[1].kind, TokenKind::DoubleSlash);
    }

    #[test]
    fn multi_character_operators() {
        let (tokens, _) = scan("=< = >< >= > <= <");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LessOrEqual,
                TokenKind::Equal,
                TokenKind::Unequal,
                TokenKind::GreaterOrEqual,
                TokenKind::Greater,
                TokenKind::Assign,
                TokenKind::Less,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn line_comment_discards_to_newline() {
        let (tokens, _) = scan(":: todo esto se ignora\ndefinir");
        assert_eq!(tokens[0].kind, TokenKind::KeywordDefinir);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn unterminated_string_is_a_scan_error() {
        let (tokens, diagnostics) = scan("\"hola");
        assert!(diagnostics.had_static_error());
        // No string token was produced; only EOF remains.
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn string_with_embedded_newline_is_a_scan_error() {
        let (_, diagnostics) = scan("\"hola\nmundo\"");
        assert!(diagnostics.had_static_error());
    }

    #[test]
    fn well_formed_string_literal() {
        let (tokens, diagnostics) = scan("\"hola\"");
        assert!(!diagnostics.had_static_error());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, Some(Literal::Text("hola".to_string())));
    }

    #[test]
    fn number_with_underscored_integer_part_and_decimal() {
        let (tokens, diagnostics) = scan("1_000_000 + 2,5");
        assert!(!diagnostics.had_static_error());
        assert_eq!(tokens[0].literal, Some(Literal::Number(1_000_000.0)));
        assert_eq!(tokens[2].literal, Some(Literal::Number(2.5)));
    }

    #[test]
    fn consecutive_underscores_are_an_error() {
        let (_, diagnostics) = scan("1__2");
        assert!(diagnostics.had_static_error());
    }

    #[test]
    fn trailing_underscore_is_an_error() {
        let (_, diagnostics) = scan("12_");
        assert!(diagnostics.had_static_error());
    }

    #[test]
    fn underscore_before_comma_is_an_error() {
        let (_, diagnostics) = scan("12_,5");
        assert!(diagnostics.had_static_error());
    }

    #[test]
    fn magnitude_too_large_is_an_error() {
        let (_, diagnostics) = scan("99999999999999999999");
        assert!(diagnostics.had_static_error());
    }

    #[test]
    fn identifiers_allow_spanish_letters() {
        let (tokens, diagnostics) = scan("niño_pequeño");
        assert!(!diagnostics.had_static_error());
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "niño_pequeño");
    }

    #[test]
    fn keyword_table_matches_spec() {
        let (tokens, _) = scan(
            "base clase definir devolver falso instancia mientras no o repetir si sino verdadero y",
        );
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::KeywordBase,
                TokenKind::KeywordClase,
                TokenKind::KeywordDefinir,
                TokenKind::KeywordDevolver,
                TokenKind::KeywordFalso,
                TokenKind::KeywordInstancia,
                TokenKind::KeywordMientras,
                TokenKind::KeywordNo,
                TokenKind::KeywordO,
                TokenKind::KeywordRepetir,
                TokenKind::KeywordSi,
                TokenKind::KeywordSino,
                TokenKind::KeywordVerdadero,
                TokenKind::KeywordY,
                TokenKind::EndOfFile,
            ]
        );
    }

    #[test]
    fn unknown_character_reports_and_continues() {
        let (tokens, diagnostics) = scan("@ 1.");
        assert!(diagnostics.had_static_error());
        // Scanning continues past the bad character.
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn eof_is_always_last_and_unique() {
        let (tokens, _) = scan("definir x <= 10.");
        let eof_count = tokens.iter().filter(|t| t.is_eof()).count();
        assert_eq!(eof_count, 1);
        assert!(tokens.last().unwrap().is_eof());
    }

    #[test]
    fn token_lexemes_reproduce_source_in_order() {
        let source = ":: comentario\ndefinir niño_pequeño <= 1_000,5 + \"hola\" * (no verdadero).";
        let (tokens, diagnostics) = scan(source);
        assert!(!diagnostics.had_static_error());
        assert_lexemes_are_ordered_substrings_of(source, &tokens);
    }
}

/// Every non-EOF token's lexeme must be recoverable, in order, as a
/// substring of the source it was scanned from — the whitespace and
/// comments between tokens are simply not represented (`spec.md` §8:
/// "concatenating all tokens' lexemes in order ... reproduces the source
/// byte range they cover"). Shared by `mod tests` and `mod proptests`.
#[cfg(test)]
fn assert_lexemes_are_ordered_substrings_of(source: &str, tokens: &[Token]) {
    let chars: Vec<char> = source.chars().collect();
    let mut cursor = 0;
    for token in tokens {
        if token.kind == TokenKind::EndOfFile {
            continue;
        }
        let lexeme: Vec<char> = token.lexeme.chars().collect();
        if lexeme.is_empty() {
            continue;
        }
        let window = lexeme.len();
        let found = (cursor..=chars.len().saturating_sub(window))
            .find(|&start| chars[start..start + window] == lexeme[..]);
        let start = found.unwrap_or_else(|| {
            panic!(
                "lexeme '{}' not found as an ordered substring of '{}' after position {}",
                token.lexeme, source, cursor
            )
        });
        cursor = start + window;
    }
}
