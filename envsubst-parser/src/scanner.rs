//! Character-class scanner driven by a mode and an acceptance predicate.
//!
//! The parser reconfigures the scanner before each call to [`Scanner::scan`]:
//! the mode selects which token kinds may be produced, and the acceptance
//! predicate decides which characters may continue an identifier run in the
//! current grammatical context.

/// Decides whether a character may extend the current identifier run. Receives
/// the candidate character and its zero-based index within the token.
pub(crate) type AcceptFn = fn(char, usize) -> bool;

/// Characters that may be escaped with a backslash inside a substitution.
const ESCAPE_CHARS: &[char] = &['\\', '/', '}', '$', ':'];

bitflags::bitflags! {
    /// The set of token kinds the scanner may produce.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Mode: u8 {
        /// Runs of characters accepted by the current predicate.
        const IDENT = 1;
        /// `${`
        const LBRACE = 1 << 1;
        /// `}`
        const RBRACE = 1 << 2;
        /// `$name`
        const BARE_VAR = 1 << 3;
        /// `$$`
        const DOUBLE_DOLLAR = 1 << 4;
        /// Backslash escapes of [`ESCAPE_CHARS`] inside identifier runs.
        const ESCAPE = 1 << 5;

        /// Literal text outside of any substitution.
        const TOP_LEVEL = Self::IDENT.bits()
            | Self::LBRACE.bits()
            | Self::BARE_VAR.bits()
            | Self::DOUBLE_DOLLAR.bits();
        /// An argument slot inside a substitution.
        const ARGUMENT = Self::TOP_LEVEL.bits() | Self::ESCAPE.bits();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// The character at the cursor does not start any token enabled by the mode.
    Illegal,
    Eof,
    Ident,
    LeftBrace,
    RightBrace,
    BareVar,
    DoubleDollar,
}

pub(crate) struct Scanner<'a> {
    input: &'a str,
    /// Byte offset of the cursor.
    pos: usize,
    /// Byte offset where the most recent token started.
    start: usize,
    text: String,
    mode: Mode,
    accept: AcceptFn,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            text: String::new(),
            mode: Mode::TOP_LEVEL,
            accept: accept_any,
        }
    }

    pub const fn configure(&mut self, mode: Mode, accept: AcceptFn) {
        self.mode = mode;
        self.accept = accept;
    }

    /// Scans the next token. On [`Token::Illegal`] and [`Token::Eof`] the cursor
    /// is left where it was.
    pub fn scan(&mut self) -> Token {
        self.start = self.pos;
        self.text.clear();

        let mut chars = self.rest().chars();
        let Some(c) = chars.next() else {
            return Token::Eof;
        };
        let next = chars.next();

        if c == '$' {
            if self.mode.contains(Mode::LBRACE) && next == Some('{') {
                self.pos += 2;
                self.text.push_str("${");
                return Token::LeftBrace;
            }

            if self.mode.contains(Mode::DOUBLE_DOLLAR) && next == Some('$') {
                // When the second dollar itself starts a substitution, only the first
                // one is consumed so that `$${v}` and `$$v` yield `$` plus the value.
                let third = chars.next();
                if third == Some('{') || third.is_some_and(is_ident_char) {
                    self.pos += 1;
                } else {
                    self.pos += 2;
                }
                self.text.push('$');
                return Token::DoubleDollar;
            }

            if self.mode.contains(Mode::BARE_VAR) && next.is_some_and(is_ident_char) {
                self.pos += 1;
                while let Some(c) = self.peek().filter(|c| is_ident_char(*c)) {
                    self.text.push(c);
                    self.pos += c.len_utf8();
                }
                return Token::BareVar;
            }
        }

        if c == '}' && self.mode.contains(Mode::RBRACE) {
            self.pos += 1;
            self.text.push('}');
            return Token::RightBrace;
        }

        if self.mode.contains(Mode::IDENT) {
            return self.scan_ident();
        }

        Token::Illegal
    }

    fn scan_ident(&mut self) -> Token {
        let mut index = 0;

        while let Some(c) = self.peek() {
            if c == '\\' && self.mode.contains(Mode::ESCAPE) {
                if let Some(escaped) = self.peek_two().filter(|e| ESCAPE_CHARS.contains(e)) {
                    self.text.push(escaped);
                    self.pos += c.len_utf8() + escaped.len_utf8();
                    index += 1;
                    continue;
                }
            }

            if c == '$' && index > 0 && self.starts_token(self.pos) {
                break;
            }

            if !(self.accept)(c, index) {
                break;
            }

            self.text.push(c);
            self.pos += c.len_utf8();
            index += 1;
        }

        if index == 0 {
            self.pos = self.start;
            Token::Illegal
        } else {
            Token::Ident
        }
    }

    /// Returns whether a `$` at the given offset begins a token enabled by the mode.
    fn starts_token(&self, offset: usize) -> bool {
        let mut chars = self.input.get(offset..).unwrap_or_default().chars().skip(1);
        match chars.next() {
            Some('{') => self.mode.contains(Mode::LBRACE),
            Some('$') => self.mode.contains(Mode::DOUBLE_DOLLAR),
            Some(c) if is_ident_char(c) => self.mode.contains(Mode::BARE_VAR),
            _ => false,
        }
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Returns the character at the cursor without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Returns the character after the one at the cursor without consuming either.
    pub fn peek_two(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Returns the text of the most recently scanned token, with escapes resolved.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Steps back over the most recently scanned token.
    pub const fn unread(&mut self) {
        self.pos = self.start;
    }

    /// Byte offset of the cursor.
    pub const fn offset(&self) -> usize {
        self.pos
    }

    /// Byte offset where the most recently scanned token started.
    pub const fn token_start(&self) -> usize {
        self.start
    }
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub(crate) const fn accept_any(_c: char, _index: usize) -> bool {
    true
}

pub(crate) fn accept_ident(c: char, _index: usize) -> bool {
    is_ident_char(c)
}

pub(crate) const fn accept_one_hash(c: char, index: usize) -> bool {
    c == '#' && index == 0
}

pub(crate) const fn accept_hash_operator(c: char, index: usize) -> bool {
    c == '#' && index < 2
}

pub(crate) const fn accept_percent_operator(c: char, index: usize) -> bool {
    c == '%' && index < 2
}

pub(crate) const fn accept_casing_operator(c: char, index: usize) -> bool {
    matches!(c, ',' | '^') && index < 2
}

pub(crate) const fn accept_replace_operator(c: char, index: usize) -> bool {
    match index {
        0 => c == '/',
        1 => matches!(c, '/' | '#' | '%'),
        _ => false,
    }
}

/// Accepts `:-`, `:=`, `:?` and `:+`.
pub(crate) const fn accept_colon_default_operator(c: char, index: usize) -> bool {
    match index {
        0 => c == ':',
        1 => matches!(c, '-' | '=' | '?' | '+'),
        _ => false,
    }
}

/// Accepts `-`, `=`, `?` and `+`.
pub(crate) const fn accept_default_operator(c: char, index: usize) -> bool {
    index == 0 && matches!(c, '-' | '=' | '?' | '+')
}

pub(crate) const fn accept_one_colon(c: char, index: usize) -> bool {
    c == ':' && index == 0
}

pub(crate) const fn accept_one_slash(c: char, index: usize) -> bool {
    c == '/' && index == 0
}

pub(crate) const fn accept_not_closing(c: char, _index: usize) -> bool {
    c != '}'
}

pub(crate) const fn reject_colon_close(c: char, _index: usize) -> bool {
    c != ':' && c != '}'
}

pub(crate) const fn accept_not_slash(c: char, _index: usize) -> bool {
    c != '/' && c != '}'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan_all(input: &str, mode: Mode, accept: AcceptFn) -> Vec<(Token, String)> {
        let mut scanner = Scanner::new(input);
        scanner.configure(mode, accept);

        let mut tokens = vec![];
        loop {
            let token = scanner.scan();
            if matches!(token, Token::Eof | Token::Illegal) {
                tokens.push((token, String::new()));
                break;
            }
            tokens.push((token, scanner.text().to_owned()));
        }
        tokens
    }

    #[test]
    fn top_level_tokens() {
        assert_eq!(
            scan_all("a ${b} $c $$ d", Mode::TOP_LEVEL, accept_any),
            vec![
                (Token::Ident, "a ".to_owned()),
                (Token::LeftBrace, "${".to_owned()),
                (Token::Ident, "b} ".to_owned()),
                (Token::BareVar, "c".to_owned()),
                (Token::Ident, " ".to_owned()),
                (Token::DoubleDollar, "$".to_owned()),
                (Token::Ident, " d".to_owned()),
                (Token::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn lone_dollar_is_text() {
        assert_eq!(
            scan_all("$ 5$", Mode::TOP_LEVEL, accept_any),
            vec![(Token::Ident, "$ 5$".to_owned()), (Token::Eof, String::new())]
        );
    }

    #[test]
    fn double_dollar_before_substitution() {
        assert_eq!(
            scan_all("$${v}", Mode::TOP_LEVEL, accept_any),
            vec![
                (Token::DoubleDollar, "$".to_owned()),
                (Token::LeftBrace, "${".to_owned()),
                (Token::Ident, "v}".to_owned()),
                (Token::Eof, String::new()),
            ]
        );
        assert_eq!(
            scan_all("$$v", Mode::TOP_LEVEL, accept_any),
            vec![
                (Token::DoubleDollar, "$".to_owned()),
                (Token::BareVar, "v".to_owned()),
                (Token::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn escapes_only_when_enabled() {
        assert_eq!(
            scan_all(r"a\/b/c", Mode::ARGUMENT, accept_not_slash),
            vec![(Token::Ident, "a/b".to_owned()), (Token::Illegal, String::new())]
        );
        assert_eq!(
            scan_all(r"a\/b", Mode::TOP_LEVEL, accept_any),
            vec![(Token::Ident, r"a\/b".to_owned()), (Token::Eof, String::new())]
        );
        assert_eq!(
            scan_all(r"x\*\\y", Mode::ARGUMENT, accept_not_closing),
            vec![(Token::Ident, r"x\*\y".to_owned()), (Token::Eof, String::new())]
        );
    }

    #[test]
    fn peek_and_unread() {
        let mut scanner = Scanner::new(":-x}");
        assert_eq!(scanner.peek(), Some(':'));
        assert_eq!(scanner.peek_two(), Some('-'));

        scanner.configure(Mode::IDENT, accept_colon_default_operator);
        assert_eq!(scanner.scan(), Token::Ident);
        assert_eq!(scanner.text(), ":-");
        assert_eq!(scanner.offset(), 2);

        scanner.unread();
        assert_eq!(scanner.offset(), 0);
        assert_eq!(scanner.peek(), Some(':'));
    }

    #[test]
    fn rejected_first_char_is_illegal() {
        let mut scanner = Scanner::new("}");
        scanner.configure(Mode::IDENT, accept_ident);
        assert_eq!(scanner.scan(), Token::Illegal);
        assert_eq!(scanner.offset(), 0);

        scanner.configure(Mode::RBRACE, accept_ident);
        assert_eq!(scanner.scan(), Token::RightBrace);
    }
}
