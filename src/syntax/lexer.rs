//! Token scanner for PHP source units.
//!
//! This is not a full PHP lexer. It recognises exactly what the import
//! parser needs to see (names, braces, statement terminators) and reliably
//! skips everything that could hide a stray `use` or brace: comments,
//! string literals, heredocs and inline HTML.

use logos::Logos;

use crate::base::{TextRange, TextSize};

/// Raw logos token. Comments, strings and inline HTML are real tokens here
/// and get filtered out by [`tokenize`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[token("//", line_comment)]
    #[token("#", line_comment)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[token("'", single_quoted)]
    #[token("\"", double_quoted)]
    #[token("`", backtick_quoted)]
    StringLiteral,

    #[regex(r"<<<[ \t]*", heredoc)]
    Heredoc,

    #[token("?>", inline_html)]
    CloseTag,

    #[token("#[")]
    AttributeOpen,

    #[regex(r"\\?[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*(\\[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*)*")]
    Name,

    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,

    #[regex(r"[0-9][0-9a-zA-Z_]*(\.[0-9][0-9a-zA-Z_]*)?")]
    Number,

    #[token("\\")]
    NsSeparator,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

/// The kinds of token the import parser distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// An identifier or qualified name, e.g. `use`, `Foo`, `\Foo\Bar`.
    Name,
    /// A lone `\`, as in the group prefix `Foo\{`.
    NsSeparator,
    Variable,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    AttributeOpen,
    /// Anything else: operators, numbers, unknown bytes.
    Other,
}

/// A significant token with its source text and range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub range: TextRange,
}

impl<'src> Token<'src> {
    /// Whether this is a name token spelling `keyword` (case-insensitive,
    /// as PHP keywords are).
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Name && self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Tokenize a PHP source unit.
///
/// Text before the first open tag is inline HTML and produces no tokens.
/// A file without any open tag yields an empty stream.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    let Some(start) = find_open_tag_end(source, 0) else {
        return Vec::new();
    };

    let mut lexer = RawToken::lexer(&source[start..]);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(RawToken::LineComment)
            | Ok(RawToken::BlockComment)
            | Ok(RawToken::StringLiteral)
            | Ok(RawToken::Heredoc)
            | Ok(RawToken::CloseTag) => continue,
            Ok(RawToken::Name) => TokenKind::Name,
            Ok(RawToken::NsSeparator) => TokenKind::NsSeparator,
            Ok(RawToken::Variable) => TokenKind::Variable,
            Ok(RawToken::Semicolon) => TokenKind::Semicolon,
            Ok(RawToken::Comma) => TokenKind::Comma,
            Ok(RawToken::LBrace) => TokenKind::LBrace,
            Ok(RawToken::RBrace) => TokenKind::RBrace,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::AttributeOpen) => TokenKind::AttributeOpen,
            Ok(RawToken::Number) | Err(_) => TokenKind::Other,
        };

        let abs_start = start + span.start;
        let abs_end = start + span.end;
        tokens.push(Token {
            kind,
            text: &source[abs_start..abs_end],
            range: TextRange::new(
                TextSize::from(abs_start as u32),
                TextSize::from(abs_end as u32),
            ),
        });
    }

    tokens
}

/// Byte offset just past the first PHP open tag at or after `from`.
fn find_open_tag_end(source: &str, from: usize) -> Option<usize> {
    let rest = source.get(from..)?;
    let pos = rest.find("<?")?;
    let after = &rest[pos + 2..];
    let tag_len = if after.get(..3).is_some_and(|tag| tag.eq_ignore_ascii_case("php")) {
        5
    } else if after.starts_with('=') {
        3
    } else {
        2
    };
    Some(from + pos + tag_len)
}

fn line_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    // A close tag ends a line comment.
    let remainder = lex.remainder();
    let newline = remainder.find('\n').unwrap_or(remainder.len());
    let end = match remainder[..newline].find("?>") {
        Some(close) => close,
        None => newline,
    };
    lex.bump(end);
    true
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(remainder.len()),
    }
    true
}

/// Consume up to and including the unescaped closing `quote`.
fn bump_quoted(lex: &mut logos::Lexer<RawToken>, quote: u8) -> bool {
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                lex.bump(i + 1);
                return true;
            }
            _ => i += 1,
        }
    }
    lex.bump(bytes.len());
    true
}

fn single_quoted(lex: &mut logos::Lexer<RawToken>) -> bool {
    bump_quoted(lex, b'\'')
}

fn double_quoted(lex: &mut logos::Lexer<RawToken>) -> bool {
    bump_quoted(lex, b'"')
}

fn backtick_quoted(lex: &mut logos::Lexer<RawToken>) -> bool {
    bump_quoted(lex, b'`')
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

/// Heredoc and nowdoc: `<<<ID`, `<<<"ID"` or `<<<'ID'`, closed by a line
/// whose first non-blank text is `ID` not followed by an identifier byte.
fn heredoc(lex: &mut logos::Lexer<RawToken>) -> bool {
    let remainder = lex.remainder();
    let label_src = remainder.trim_start_matches(['\'', '"']);
    let label_len = label_src.bytes().take_while(|&b| is_ident_byte(b)).count();
    if label_len == 0 {
        // `<<<` without a label is not a heredoc; leave the rest alone.
        return false;
    }
    let label = &label_src[..label_len];

    let Some(body_start) = remainder.find('\n') else {
        lex.bump(remainder.len());
        return true;
    };

    let mut offset = body_start + 1;
    for line in remainder[body_start + 1..].split_inclusive('\n') {
        let trimmed = line.trim_start_matches([' ', '\t']);
        if let Some(after) = trimmed.strip_prefix(label) {
            if !after.bytes().next().is_some_and(is_ident_byte) {
                let indent = line.len() - trimmed.len();
                lex.bump(offset + indent + label.len());
                return true;
            }
        }
        offset += line.len();
    }

    lex.bump(remainder.len());
    true
}

/// `?>` switches back to inline HTML until the next open tag.
fn inline_html(lex: &mut logos::Lexer<RawToken>) -> bool {
    let remainder = lex.remainder();
    match find_open_tag_end(remainder, 0) {
        Some(end) => lex.bump(end),
        None => lex.bump(remainder.len()),
    }
    true
}
