//! Recursive-descent parser for the text record encoding.
//!
//! Grammar: a sequence of fields, where a field is `name: scalar` or
//! `name { fields }` (the colon is optional before a braced message).
//! `#` starts a comment running to end of line; `,` and `;` may trail a
//! field. Scalars are quoted strings, numbers, booleans, or bare
//! identifiers (e.g. enum value names).

use super::TextFormatError;

/// One parsed `name: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub name: String,
    pub value: TextValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextValue {
    String(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    /// Bare identifier, e.g. an enum value name.
    Identifier(String),
    Message(Vec<TextField>),
}

impl TextValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view; integers widen to f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TextValue::Number(n) => Some(*n),
            TextValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TextValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TextValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&[TextField]> {
        match self {
            TextValue::Message(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Parse `input` into its top-level fields, in input order.
pub fn parse(input: &str) -> Result<Vec<TextField>, TextFormatError> {
    let mut parser = Parser::new(input);
    let fields = parser.parse_fields(false)?;
    Ok(fields)
}

struct Parser<'a> {
    rest: &'a str,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            line: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Skip whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn parse_fields(&mut self, nested: bool) -> Result<Vec<TextField>, TextFormatError> {
        let mut fields = Vec::new();

        loop {
            self.skip_trivia();

            match self.peek() {
                None => {
                    if nested {
                        return Err(TextFormatError::UnterminatedMessage { line: self.line });
                    }
                    break;
                }
                Some('}') if nested => break,
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    fields.push(self.parse_field()?);
                }
                Some(c) => {
                    return Err(TextFormatError::UnexpectedCharacter {
                        found: c,
                        line: self.line,
                    });
                }
            }
        }

        Ok(fields)
    }

    fn parse_field(&mut self) -> Result<TextField, TextFormatError> {
        let name = self.parse_identifier();
        self.skip_trivia();

        // Scalars require a colon; braced messages may omit it
        let has_colon = if self.peek() == Some(':') {
            self.bump();
            true
        } else {
            false
        };
        self.skip_trivia();

        let value = match self.peek() {
            Some('{') => {
                self.bump();
                let fields = self.parse_fields(true)?;
                self.bump(); // closing '}'
                TextValue::Message(fields)
            }
            Some(_) if !has_colon => {
                return Err(TextFormatError::MissingValue {
                    field: name,
                    line: self.line,
                });
            }
            Some('"') => TextValue::String(self.parse_string()?),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()?
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.parse_identifier();
                match word.as_str() {
                    "true" => TextValue::Bool(true),
                    "false" => TextValue::Bool(false),
                    _ => TextValue::Identifier(word),
                }
            }
            _ => {
                return Err(TextFormatError::MissingValue {
                    field: name,
                    line: self.line,
                });
            }
        };

        // Optional field separator
        self.skip_trivia();
        if matches!(self.peek(), Some(',') | Some(';')) {
            self.bump();
        }

        Ok(TextField { name, value })
    }

    fn parse_identifier(&mut self) -> String {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }
        ident
    }

    fn parse_string(&mut self) -> Result<String, TextFormatError> {
        let open_line = self.line;
        self.bump(); // opening quote

        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(value),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(c @ ('"' | '\\')) => value.push(c),
                    Some(c) => {
                        return Err(TextFormatError::UnexpectedCharacter {
                            found: c,
                            line: self.line,
                        });
                    }
                    None => return Err(TextFormatError::UnterminatedString { line: open_line }),
                },
                // Strings do not span lines
                Some('\n') | None => {
                    return Err(TextFormatError::UnterminatedString { line: open_line });
                }
                Some(c) => value.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Result<TextValue, TextFormatError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if text.contains(['.', 'e', 'E']) {
            text.parse::<f64>()
                .map(TextValue::Number)
                .map_err(|_| TextFormatError::InvalidNumber {
                    text,
                    line: self.line,
                })
        } else {
            text.parse::<i64>()
                .map(TextValue::Integer)
                .map_err(|_| TextFormatError::InvalidNumber {
                    text,
                    line: self.line,
                })
        }
    }
}
