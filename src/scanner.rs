use anyhow::Context;
use regex::Regex;

/// Lexical state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Normal,
    InString(char),
}

/// One unit consumed by the [`Scanner`].
///
/// Structural events (parens, brackets, commas) are only produced outside of
/// strings; the same characters inside a string come out as [`Event::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Char(char),
    StringStart(char),
    StringEnd(char),
    /// A doubled quote (`''` or `""`) inside a string of the same quote.
    EscapedQuote(char),
    LeftParen,
    RightParen,
    LeftSquare,
    RightSquare,
    Comma,
}

pub struct Scanner<'a> {
    source: &'a str,
    current: usize,
    state: ScanState,
    paren_depth: i64,
    bracket_depth: i64,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Starts scanning at byte `offset`, which must lie on a char boundary.
    pub fn at(source: &'a str, offset: usize) -> Self {
        Self {
            source,
            current: offset.min(source.len()),
            state: ScanState::Normal,
            paren_depth: 0,
            bracket_depth: 0,
        }
    }

    /// Byte offset of the next character to be consumed.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn paren_depth(&self) -> i64 {
        self.paren_depth
    }

    pub fn bracket_depth(&self) -> i64 {
        self.bracket_depth
    }

    pub fn is_top_level(&self) -> bool {
        self.state == ScanState::Normal && self.paren_depth == 0 && self.bracket_depth == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    pub fn next_event(&mut self) -> Option<Event> {
        let curr_char = self.advance()?;
        let event = match self.state {
            ScanState::InString(quote) => {
                if curr_char == quote {
                    if self.peek() == Some(quote) {
                        self.advance();
                        Event::EscapedQuote(quote)
                    } else {
                        self.state = ScanState::Normal;
                        Event::StringEnd(quote)
                    }
                } else {
                    Event::Char(curr_char)
                }
            }
            ScanState::Normal => match curr_char {
                c if c == '\'' || c == '"' => {
                    self.state = ScanState::InString(c);
                    Event::StringStart(c)
                }
                '(' => {
                    self.paren_depth += 1;
                    Event::LeftParen
                }
                ')' => {
                    self.paren_depth -= 1;
                    Event::RightParen
                }
                '[' => {
                    self.bracket_depth += 1;
                    Event::LeftSquare
                }
                ']' => {
                    self.bracket_depth -= 1;
                    Event::RightSquare
                }
                ',' => Event::Comma,
                c => Event::Char(c),
            },
        };
        Some(event)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

/// The text between the outer parentheses of one `VALUES (...)` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawStatement<'a> {
    /// 0-based position among the statements extracted from one buffer.
    pub ordinal: usize,
    pub text: &'a str,
}

/// Finds `INSERT INTO <table> ... VALUES (...);` blocks for a single table.
pub struct StatementExtractor {
    table: String,
    insert_pattern: Regex,
}

impl StatementExtractor {
    pub fn new(table: &str) -> anyhow::Result<Self> {
        let insert_pattern = Regex::new(&format!(
            r#"INSERT\s+INTO\s+[`"]?{}\b[`"]?"#,
            regex::escape(table)
        ))
        .with_context(|| format!("failed to compile insert pattern for table `{table}`"))?;
        Ok(Self {
            table: table.to_owned(),
            insert_pattern,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn extract<'a>(&self, sql: &'a str) -> Vec<RawStatement<'a>> {
        let mut statements = vec![];
        let mut cursor = 0;

        while cursor < sql.len() {
            let Some(insert) = self.insert_pattern.find_at(sql, cursor) else {
                break;
            };
            let Some(values_start) = sql[insert.end()..]
                .find("VALUES")
                .map(|idx| insert.end() + idx)
            else {
                log::warn!(
                    "Found `INSERT INTO {}` at byte {} without `VALUES`",
                    self.table,
                    insert.start()
                );
                break;
            };
            let Some(open_paren) = sql[values_start..]
                .find('(')
                .map(|idx| values_start + idx)
            else {
                log::warn!("Found `VALUES` at byte {} without `(`", values_start);
                break;
            };

            let Some(close_paren) = matching_paren(sql, open_paren) else {
                log::warn!(
                    "Unterminated values list starting at byte {}, stopping extraction",
                    open_paren
                );
                break;
            };
            let Some(semicolon) = sql[close_paren..].find(';').map(|idx| close_paren + idx) else {
                log::warn!(
                    "Missing `;` after values list closed at byte {}, stopping extraction",
                    close_paren
                );
                break;
            };

            statements.push(RawStatement {
                ordinal: statements.len(),
                text: &sql[open_paren + 1..close_paren],
            });
            cursor = semicolon + 1;
        }

        log::debug!(
            "Extracted {} statements for table {}",
            statements.len(),
            self.table
        );
        statements
    }
}

/// Byte offset of the `)` closing the `(` at `open_paren`, skipping quoted text.
fn matching_paren(sql: &str, open_paren: usize) -> Option<usize> {
    let mut scanner = Scanner::at(sql, open_paren);
    while let Some(event) = scanner.next_event() {
        if event == Event::RightParen && scanner.paren_depth() == 0 {
            return Some(scanner.position() - 1);
        }
    }
    None
}

pub fn extract_statements<'a>(sql: &'a str, table: &str) -> anyhow::Result<Vec<RawStatement<'a>>> {
    Ok(StatementExtractor::new(table)?.extract(sql))
}
