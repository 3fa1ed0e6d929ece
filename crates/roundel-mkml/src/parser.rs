use crate::ast::{DslDocument, Import, Node, Prop, Value};
use crate::error::{ErrorKind, ParseError};
use crate::lexer::{Lexer, Token, TokenWithPos};

/// Deepest block nesting accepted, counting the root widget's block as 1.
pub const MAX_NESTING: usize = 64;

/// Grammar:
///
/// ```text
/// document := import* node
/// import   := "import" STRING "as" IDENT
/// node     := IDENT block?
/// block    := "{" (IDENT ":" value | node)* "}"
/// value    := STRING | NUMBER | DIMENSION | IDENT
/// ```
///
/// Blocks are tracked on an explicit stack rather than by recursion, so
/// input depth never touches the call stack.
pub struct Parser {
    tokens: Vec<TokenWithPos>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPos>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse_document(mut self) -> Result<DslDocument, ParseError> {
        let mut imports = Vec::new();
        while self.eat(&Token::Import) {
            imports.push(self.import_tail()?);
        }

        let root = self.tree()?;
        match self.peek() {
            Token::Eof => Ok(DslDocument { imports, root }),
            other => Err(self.error(ErrorKind::TrailingInput(other.describe()))),
        }
    }

    // ── cursor ────────────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).map_or(&Token::Eof, |t| &t.token)
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        self.pos = (self.pos + 1).min(self.tokens.len());
        token
    }

    /// Consumes the next token if it is `expected`.
    fn eat(&mut self, expected: &Token) -> bool {
        let hit = self.peek() == expected;
        if hit {
            self.bump();
        }
        hit
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        let (line, col) = self
            .tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.col));
        ParseError { kind, line, col }
    }

    fn expected(&self, expected: &'static str) -> ParseError {
        self.error(ErrorKind::Expected { expected, found: self.peek().describe() })
    }

    // ── productions ───────────────────────────────────────────────────────

    fn import_tail(&mut self) -> Result<Import, ParseError> {
        let Token::Str(path) = self.peek().clone() else {
            return Err(self.expected("an import path string"));
        };
        self.bump();
        if !self.eat(&Token::As) {
            return Err(self.expected("`as`"));
        }
        let alias = self.ident("an import alias")?;
        Ok(Import { path, alias })
    }

    fn ident(&mut self, what: &'static str) -> Result<String, ParseError> {
        let Token::Ident(name) = self.peek() else {
            return Err(self.expected(what));
        };
        let name = name.clone();
        self.bump();
        Ok(name)
    }

    /// Parses one node and everything nested inside it.
    ///
    /// `open` holds the ancestors of `current` whose blocks are still open;
    /// a child is attached to its parent when its own block closes.
    fn tree(&mut self) -> Result<Node, ParseError> {
        let mut current = Node::new(self.ident("a widget name")?);
        if !self.eat(&Token::LBrace) {
            return Ok(current);
        }
        let mut open: Vec<Node> = Vec::new();

        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    let Some(mut parent) = open.pop() else {
                        return Ok(current);
                    };
                    parent.children.push(current);
                    current = parent;
                }
                Token::Ident(_) if self.peek_nth(1) == &Token::Colon => {
                    let key = self.ident("a property name")?;
                    self.bump(); // `:`
                    let value = self.value()?;
                    current.props.push(Prop { key, value });
                }
                Token::Ident(_) => {
                    let child = Node::new(self.ident("a widget name")?);
                    if self.peek() != &Token::LBrace {
                        current.children.push(child);
                        continue;
                    }
                    // `current` is at depth open.len() + 1; the child goes one deeper.
                    if open.len() + 2 > MAX_NESTING {
                        return Err(self.error(ErrorKind::TooDeep { limit: MAX_NESTING }));
                    }
                    self.bump();
                    open.push(std::mem::replace(&mut current, child));
                }
                Token::Eof => return Err(self.error(ErrorKind::UnclosedBlock)),
                _ => return Err(self.expected("a property (key: value), a widget name or `}`")),
            }
        }
    }

    fn value(&mut self) -> Result<Value, ParseError> {
        let value = match self.peek() {
            Token::Str(s) => Value::Str(s.clone()),
            Token::Number(n) => Value::Number(*n),
            Token::Dimension(n, unit) => Value::Dimension(*n, *unit),
            Token::Ident(s) => Value::Ident(s.clone()),
            _ => return Err(self.expected("a value")),
        };
        self.bump();
        Ok(value)
    }
}

/// Parse a `.mkml` source string into a [`DslDocument`].
pub fn parse_str(src: &str) -> Result<DslDocument, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    Parser::new(tokens).parse_document()
}
