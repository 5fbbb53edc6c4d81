//! Namespace blocks and `use` imports of one PHP source unit.
//!
//! The parser walks the token stream from [`tokenize`](super::lexer::tokenize)
//! tracking brace depth. Only `use` statements at the top level of a
//! namespace block are imports; trait `use` inside class bodies and closure
//! `use (...)` clauses sit deeper or are not followed by a name, and are
//! ignored.

use smol_str::SmolStr;

use super::lexer::{Token, TokenKind, tokenize};
use crate::base::{LineCol, LineIndex, NS_SEPARATOR, TextRange, short_name};

/// What a `use` statement imports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    /// `use Foo\Bar;`: classes, interfaces, traits, enums and namespaces.
    Class,
    /// `use function Foo\bar;`
    Function,
    /// `use const Foo\BAR;`
    Const,
}

/// One imported name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseImport {
    pub kind: ImportKind,
    /// The imported name without a leading separator, original case.
    pub name: SmolStr,
    /// The local alias: explicit `as` alias or the last name segment.
    pub alias: SmolStr,
    /// Range of the import clause in the source.
    pub range: TextRange,
}

impl UseImport {
    /// The case-insensitive lookup key of this import.
    pub fn key(&self) -> SmolStr {
        SmolStr::new(self.alias.to_ascii_lowercase())
    }
}

/// A namespace block and the imports declared at its top level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceBlock {
    /// Namespace name; empty for the global namespace.
    pub name: SmolStr,
    /// Range of the `namespace` keyword, or an empty range for the implicit
    /// global block.
    pub range: TextRange,
    pub imports: Vec<UseImport>,
    /// Short names of the classes, interfaces, traits and enums declared
    /// in the block.
    pub declarations: Vec<SmolStr>,
}

impl NamespaceBlock {
    fn new(name: &str, range: TextRange) -> Self {
        Self {
            name: SmolStr::new(name.strip_prefix(NS_SEPARATOR).unwrap_or(name)),
            range,
            imports: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Namespace names compare case-insensitively, as in PHP.
    pub fn is_namespace(&self, namespace: &str) -> bool {
        self.name.eq_ignore_ascii_case(namespace)
    }

    pub fn declares(&self, short_name: &str) -> bool {
        self.declarations.iter().any(|d| d.eq_ignore_ascii_case(short_name))
    }
}

/// Result of scanning a source unit for imports.
#[derive(Clone, Debug)]
pub struct ParsedImports {
    blocks: Vec<NamespaceBlock>,
    line_index: LineIndex,
}

impl ParsedImports {
    /// All namespace blocks in source order.
    pub fn blocks(&self) -> &[NamespaceBlock] {
        &self.blocks
    }

    /// The block whose imports govern names written in `namespace`.
    ///
    /// Imports apply only to the block they appear in. With a class name,
    /// the block declaring that class is chosen; otherwise, or when no
    /// block declares it, the last block opening `namespace`.
    pub fn block_for(&self, namespace: &str, class: Option<&str>) -> Option<&NamespaceBlock> {
        let mut matching = self.blocks.iter().filter(|block| block.is_namespace(namespace));
        let declaring = class.and_then(|class| matching.clone().find(|block| block.declares(class)));
        declaring.or_else(|| matching.next_back())
    }

    /// Source position of an import.
    pub fn line_col(&self, import: &UseImport) -> LineCol {
        self.line_index.range_start(import.range)
    }
}

/// Scan `source` for namespace blocks and their imports.
pub fn parse_imports(source: &str) -> ParsedImports {
    let tokens = tokenize(source);
    let mut parser = ImportParser::new(&tokens);
    parser.run();

    ParsedImports {
        blocks: parser.blocks,
        line_index: LineIndex::new(source),
    }
}

struct ImportParser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    blocks: Vec<NamespaceBlock>,
    depth: usize,
    braced: bool,
}

impl<'t, 'src> ImportParser<'t, 'src> {
    fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            tokens,
            pos: 0,
            blocks: vec![NamespaceBlock::new("", TextRange::default())],
            depth: 0,
            braced: false,
        }
    }

    fn peek(&self, ahead: usize) -> Option<&Token<'src>> {
        self.tokens.get(self.pos + ahead)
    }

    fn peek_kind(&self, ahead: usize) -> Option<TokenKind> {
        self.peek(ahead).map(|t| t.kind)
    }

    fn bump(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).copied();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.peek_kind(0) == Some(kind) {
            self.bump()
        } else {
            None
        }
    }

    fn current_block(&mut self) -> &mut NamespaceBlock {
        // `blocks` starts with the implicit global block and never shrinks.
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    fn run(&mut self) {
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::LBrace => self.depth += 1,
                TokenKind::RBrace => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.braced && self.depth == 0 {
                        self.braced = false;
                        self.blocks.push(NamespaceBlock::new("", TextRange::empty(token.range.end())));
                    }
                }
                TokenKind::Name if self.depth == 0 && token.is_keyword("namespace") => {
                    self.namespace_declaration(token);
                }
                TokenKind::Name if self.depth == usize::from(self.braced) && token.is_keyword("use") => {
                    let imports = self.use_statement();
                    self.current_block().imports.extend(imports);
                }
                TokenKind::Name if self.depth == usize::from(self.braced) && is_declaration_keyword(&token) => {
                    if let Some(name) = self.declared_name() {
                        self.current_block().declarations.push(SmolStr::new(name));
                    }
                }
                _ => {}
            }
        }
    }

    /// The name after `class`, `interface`, `trait` or `enum`, unless the
    /// keyword is an anonymous `new class` or a `Foo::class` constant.
    fn declared_name(&mut self) -> Option<&'src str> {
        let previous = self.pos.checked_sub(2).and_then(|i| self.tokens.get(i));
        if previous.is_some_and(|t| t.is_keyword("new") || t.text == ":") {
            return None;
        }
        self.eat(TokenKind::Name).map(|name| name.text)
    }

    /// `namespace Foo;`, `namespace Foo { ... }` or `namespace { ... }`.
    fn namespace_declaration(&mut self, keyword: Token<'src>) {
        let name = match self.eat(TokenKind::Name) {
            Some(name) => name.text,
            None if self.peek_kind(0) == Some(TokenKind::LBrace) => "",
            None => return,
        };

        if self.eat(TokenKind::LBrace).is_some() {
            self.depth += 1;
            self.braced = true;
        }

        tracing::trace!(namespace = name, "namespace block");
        self.blocks.push(NamespaceBlock::new(name, keyword.range));
    }

    /// Optional `function` / `const` marker before an imported name.
    fn import_kind(&mut self, default: ImportKind) -> ImportKind {
        let Some(token) = self.peek(0) else {
            return default;
        };
        if self.peek_kind(1) != Some(TokenKind::Name) {
            return default;
        }
        let kind = if token.is_keyword("function") {
            ImportKind::Function
        } else if token.is_keyword("const") {
            ImportKind::Const
        } else {
            return default;
        };
        self.bump();
        kind
    }

    /// The optional `as Alias` tail of an import clause.
    fn alias(&mut self) -> Option<Token<'src>> {
        let is_as = self.peek(0).is_some_and(|t| t.is_keyword("as"));
        if is_as && self.peek_kind(1) == Some(TokenKind::Name) {
            self.bump();
            return self.bump();
        }
        None
    }

    fn clause(&mut self, kind: ImportKind, prefix: Option<&str>, name: Token<'src>) -> UseImport {
        let relative = name.text.strip_prefix(NS_SEPARATOR).unwrap_or(name.text);
        let full = match prefix {
            Some(prefix) => format!("{prefix}{NS_SEPARATOR}{relative}"),
            None => relative.to_string(),
        };

        let (alias, range) = match self.alias() {
            Some(alias) => (SmolStr::new(alias.text), name.range.cover(alias.range)),
            None => (SmolStr::new(short_name(&full)), name.range),
        };

        tracing::trace!(name = %full, alias = %alias, ?kind, "use import");
        UseImport {
            kind,
            name: SmolStr::new(full),
            alias,
            range,
        }
    }

    /// Everything after a top-level `use` keyword up to `;`.
    ///
    /// Returns nothing when the keyword is not followed by a name, which is
    /// the shape of a closure `use ($x)` clause.
    fn use_statement(&mut self) -> Vec<UseImport> {
        let kind = self.import_kind(ImportKind::Class);
        let mut imports = Vec::new();

        while let Some(name) = self.eat(TokenKind::Name) {
            let is_group = self.peek_kind(0) == Some(TokenKind::NsSeparator)
                && self.peek_kind(1) == Some(TokenKind::LBrace);

            if is_group {
                self.bump();
                self.bump();
                let prefix = name.text.strip_prefix(NS_SEPARATOR).unwrap_or(name.text);
                self.group(kind, prefix, &mut imports);
            } else {
                imports.push(self.clause(kind, None, name));
            }

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        self.eat(TokenKind::Semicolon);
        imports
    }

    /// Members of `Prefix\{A, B as C, function d}` after the opening brace.
    fn group(&mut self, kind: ImportKind, prefix: &str, imports: &mut Vec<UseImport>) {
        loop {
            if self.eat(TokenKind::RBrace).is_some() {
                return;
            }
            let member_kind = self.import_kind(kind);
            let Some(name) = self.eat(TokenKind::Name) else {
                return;
            };
            imports.push(self.clause(member_kind, Some(prefix), name));

            if self.eat(TokenKind::Comma).is_none() {
                self.eat(TokenKind::RBrace);
                return;
            }
        }
    }
}

fn is_declaration_keyword(token: &Token<'_>) -> bool {
    ["class", "interface", "trait", "enum"].iter().any(|kw| token.is_keyword(kw))
}
