use crate::ast::{FunctionNode, Node, Operator, Tree};
use crate::error::ParseError;
use crate::scanner::{self, AcceptFn, Mode, Scanner, Token};

/// Default bound on how deeply substitutions may nest inside one another.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Options that govern parsing.
#[derive(Clone, Debug, bon::Builder)]
pub struct ParserOptions {
    /// How many substitutions may enclose a substitution before parsing fails.
    #[builder(default = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// Parses the given string into an expression tree, using default options.
///
/// # Arguments
///
/// * `input` - The string to parse.
pub fn parse(input: &str) -> Result<Tree, ParseError> {
    parse_with_options(input, &ParserOptions::default())
}

/// Parses the given string into an expression tree.
///
/// # Arguments
///
/// * `input` - The string to parse.
/// * `options` - The options to use when parsing.
pub fn parse_with_options(input: &str, options: &ParserOptions) -> Result<Tree, ParseError> {
    Parser::new(input, options).parse()
}

/// Recursive-descent parser for substitution strings.
pub struct Parser<'a> {
    input: &'a str,
    scanner: Scanner<'a>,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Returns a new parser instance.
    ///
    /// # Arguments
    ///
    /// * `input` - The string to parse.
    /// * `options` - The options to use when parsing.
    pub fn new(input: &'a str, options: &ParserOptions) -> Self {
        Self {
            input,
            scanner: Scanner::new(input),
            options: options.clone(),
            depth: 0,
        }
    }

    /// Parses the whole input.
    pub fn parse(mut self) -> Result<Tree, ParseError> {
        tracing::debug!(target: "parse", "parsing '{}'", self.input);

        match self.parse_any() {
            Ok(root) => {
                tracing::debug!(target: "parse", "  => {root:?}");
                Ok(Tree::new(root))
            }
            Err(err) => {
                tracing::debug!(target: "parse", "parse error at offset {}: {err}", self.scanner.offset());
                Err(err)
            }
        }
    }

    fn parse_any(&mut self) -> Result<Node, ParseError> {
        let mut pieces = vec![];

        loop {
            self.scanner.configure(Mode::TOP_LEVEL, scanner::accept_any);
            match self.scanner.scan() {
                Token::Eof => break,
                Token::Ident => pieces.push(Node::Text(self.scanner.text().to_owned())),
                Token::LeftBrace => pieces.push(self.parse_func()?),
                Token::BareVar => pieces.push(self.parse_bare_var()),
                Token::DoubleDollar => pieces.push(self.parse_double_dollar()?),
                Token::Illegal | Token::RightBrace => return Err(ParseError::BadSubstitution),
            }
        }

        Ok(Node::from_pieces(pieces))
    }

    fn parse_double_dollar(&self) -> Result<Node, ParseError> {
        match self.scanner.text() {
            "$" => Ok(Node::Text(String::from("$"))),
            other => Err(ParseError::DoubleDollar(other.to_owned())),
        }
    }

    fn parse_bare_var(&self) -> Node {
        let name = self.scanner.text().to_owned();
        let source = std::format!("${name}");

        Node::Function(FunctionNode {
            parameter: name,
            operator: None,
            args: vec![],
            nesting: self.depth,
            source,
        })
    }

    /// Parses the remainder of a substitution whose `${` was just scanned.
    fn parse_func(&mut self) -> Result<Node, ParseError> {
        if self.depth > self.options.max_nesting_depth {
            return Err(ParseError::NestingTooDeep(self.options.max_nesting_depth));
        }

        let start = self.scanner.token_start();

        if self.scanner.peek() == Some('#') {
            return self.parse_length_func(start);
        }

        self.scanner.configure(Mode::IDENT, scanner::accept_ident);
        let name = match self.scanner.scan() {
            Token::Ident => self.scanner.text().to_owned(),
            _ => return Err(ParseError::VariableName),
        };

        match self.scanner.peek() {
            Some(':') => match self.scanner.peek_two() {
                Some('=' | '-' | '?' | '+') => self.parse_default_func(name, start),
                _ => self.parse_substring_func(name, start),
            },
            Some('=' | '-' | '?' | '+') => self.parse_default_func(name, start),
            Some(',' | '^') => self.parse_casing_func(name, start),
            Some('/') => self.parse_replace_func(name, start),
            Some('#') => self.parse_remove_func(name, start, scanner::accept_hash_operator),
            Some('%') => self.parse_remove_func(name, start, scanner::accept_percent_operator),
            _ => {
                self.scanner.configure(Mode::RBRACE, scanner::accept_ident);
                match self.scanner.scan() {
                    Token::RightBrace => Ok(self.finish(name, None, vec![], start)),
                    _ => Err(ParseError::MissingClosingBrace),
                }
            }
        }
    }

    // ${#param}
    fn parse_length_func(&mut self, start: usize) -> Result<Node, ParseError> {
        self.scan_operator(scanner::accept_one_hash, &ParseError::BadSubstitution)?;

        self.scanner.configure(Mode::IDENT, scanner::accept_ident);
        let name = match self.scanner.scan() {
            Token::Ident => self.scanner.text().to_owned(),
            _ => return Err(ParseError::BadSubstitution),
        };

        self.consume_rbrace()?;
        Ok(self.finish(name, Some(Operator::Length), vec![], start))
    }

    // ${param=word} ${param:=word} ${param:-word} ${param:?word} ${param:+word}
    // and their colon-less forms.
    fn parse_default_func(&mut self, name: String, start: usize) -> Result<Node, ParseError> {
        let accept: AcceptFn = if self.scanner.peek() == Some(':') {
            scanner::accept_colon_default_operator
        } else {
            scanner::accept_default_operator
        };

        let token = self.scan_operator(accept, &ParseError::DefaultFunction)?;
        let operator = Operator::default_family(&token).ok_or(ParseError::DefaultFunction)?;

        let word = self.parse_argument(scanner::accept_not_closing)?;
        self.consume_rbrace()?;

        Ok(self.finish(name, Some(operator), vec![word], start))
    }

    // ${param:offset} ${param:offset:length}
    fn parse_substring_func(&mut self, name: String, start: usize) -> Result<Node, ParseError> {
        self.scan_operator(scanner::accept_one_colon, &ParseError::BadSubstitution)?;

        let offset = self.parse_argument(scanner::reject_colon_close)?;
        if offset.is_empty_text() {
            return Err(ParseError::BadSubstitution);
        }

        let mut args = vec![offset];

        self.scanner
            .configure(Mode::IDENT | Mode::RBRACE, scanner::accept_one_colon);
        match self.scanner.scan() {
            Token::RightBrace => self.scanner.unread(),
            Token::Ident => args.push(self.parse_argument(scanner::reject_colon_close)?),
            Token::Eof => return Err(ParseError::MissingClosingBrace),
            _ => return Err(ParseError::BadSubstitution),
        }

        // A third colon-separated field is rejected here.
        self.consume_rbrace()?;
        Ok(self.finish(name, Some(Operator::Substring), args, start))
    }

    // ${param#word} ${param##word} ${param%word} ${param%%word}
    fn parse_remove_func(
        &mut self,
        name: String,
        start: usize,
        accept: AcceptFn,
    ) -> Result<Node, ParseError> {
        let token = self.scan_operator(accept, &ParseError::BadSubstitution)?;
        let operator = Operator::remove(&token).ok_or(ParseError::BadSubstitution)?;

        let pattern = self.parse_argument(scanner::accept_not_closing)?;
        self.consume_rbrace()?;

        Ok(self.finish(name, Some(operator), vec![pattern], start))
    }

    // ${param/pattern/string} ${param//pattern/string}
    // ${param/#pattern/string} ${param/%pattern/string}
    fn parse_replace_func(&mut self, name: String, start: usize) -> Result<Node, ParseError> {
        let token = self.scan_operator(scanner::accept_replace_operator, &ParseError::BadSubstitution)?;
        let operator = Operator::replace(&token).ok_or(ParseError::BadSubstitution)?;

        let pattern = self.parse_argument(scanner::accept_not_slash)?;

        self.scanner
            .configure(Mode::IDENT | Mode::RBRACE, scanner::accept_one_slash);
        let replacement = match self.scanner.scan() {
            // No replacement given; matches are deleted.
            Token::RightBrace => {
                self.scanner.unread();
                Node::Text(String::new())
            }
            Token::Ident => self.parse_argument(scanner::accept_not_closing)?,
            Token::Eof => return Err(ParseError::MissingClosingBrace),
            _ => return Err(ParseError::BadSubstitution),
        };

        self.consume_rbrace()?;
        Ok(self.finish(name, Some(operator), vec![pattern, replacement], start))
    }

    // ${param,} ${param,,} ${param^} ${param^^}
    fn parse_casing_func(&mut self, name: String, start: usize) -> Result<Node, ParseError> {
        let token = self.scan_operator(scanner::accept_casing_operator, &ParseError::BadSubstitution)?;
        let operator = Operator::casing(&token).ok_or(ParseError::BadSubstitution)?;

        self.consume_rbrace()?;
        Ok(self.finish(name, Some(operator), vec![], start))
    }

    /// Parses one argument slot: a run of literal text, nested substitutions,
    /// bare variables and `$$` escapes that ends at the first character the
    /// predicate rejects.
    fn parse_argument(&mut self, accept: AcceptFn) -> Result<Node, ParseError> {
        self.depth += 1;

        let mut pieces = vec![];
        loop {
            self.scanner.configure(Mode::ARGUMENT, accept);
            match self.scanner.scan() {
                Token::Eof | Token::Illegal => break,
                Token::Ident => pieces.push(Node::Text(self.scanner.text().to_owned())),
                Token::LeftBrace => pieces.push(self.parse_func()?),
                Token::BareVar => pieces.push(self.parse_bare_var()),
                Token::DoubleDollar => pieces.push(self.parse_double_dollar()?),
                Token::RightBrace => return Err(ParseError::FunctionSubstitution),
            }
        }

        self.depth -= 1;
        Ok(Node::from_pieces(pieces))
    }

    fn scan_operator(&mut self, accept: AcceptFn, err: &ParseError) -> Result<String, ParseError> {
        self.scanner.configure(Mode::IDENT, accept);
        match self.scanner.scan() {
            Token::Ident => Ok(self.scanner.text().to_owned()),
            _ => Err(err.clone()),
        }
    }

    fn consume_rbrace(&mut self) -> Result<(), ParseError> {
        self.scanner.configure(Mode::RBRACE, scanner::accept_any);
        match self.scanner.scan() {
            Token::RightBrace => Ok(()),
            Token::Eof => Err(ParseError::MissingClosingBrace),
            _ => Err(ParseError::BadSubstitution),
        }
    }

    fn finish(
        &self,
        parameter: String,
        operator: Option<Operator>,
        args: Vec<Node>,
        start: usize,
    ) -> Node {
        debug_assert!(
            operator.is_none_or(|op| {
                let (min, max) = op.arity();
                (min..=max).contains(&args.len())
            }),
            "{operator:?} built with {} arguments",
            args.len()
        );

        Node::Function(FunctionNode {
            parameter,
            operator,
            args,
            nesting: self.depth,
            source: self
                .input
                .get(start..self.scanner.offset())
                .unwrap_or_default()
                .to_owned(),
        })
    }
}
