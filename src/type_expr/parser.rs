#![deny(missing_docs)]

//! # Type-Descriptor Parser
//!
//! A self-contained lexer and recursive-descent parser for the textual
//! type-descriptor grammar used in documentation overlays:
//!
//! - bare names: `string`, `objectId`, `Widget`, `object-id`
//! - unions: `string|number`, flattened left to right
//! - records: `{name: string, count}` (entry types optional)
//! - generics: `Array<string>`, `Map<string, number>`
//! - literals: `'draft'`, `"done"`, `42`, `-1.5`
//! - parenthesized groups: `(string|number)`
//!
//! Parsing never panics; failures surface as [`ParseError`] values which
//! the resolver turns into inline `INVALID` schema fragments.

use std::fmt;

/// A node of the parsed type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A bare identifier: a primitive name, a schema reference, or an
    /// unknown name.
    Name(String),
    /// A union of alternatives, flattened.
    Union(Vec<TypeExpr>),
    /// A record with ordered entries.
    Record(Vec<RecordEntry>),
    /// A parametrized form like `Array<T>`.
    Generic {
        /// The parametrized subject.
        subject: Box<TypeExpr>,
        /// The type arguments, in order.
        args: Vec<TypeExpr>,
    },
    /// A string literal.
    StringValue(String),
    /// A numeric literal, kept as source text.
    NumberValue(String),
}

/// One `key: type` entry of a record; the type is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordEntry {
    /// The entry key.
    pub key: String,
    /// The entry type, when given.
    pub value: Option<TypeExpr>,
}

impl TypeExpr {
    /// Reprints the expression as descriptor text, used for `format`
    /// hints on fragments that have no native schema representation.
    pub fn render(&self) -> String {
        match self {
            TypeExpr::Name(name) => name.clone(),
            TypeExpr::Union(alts) => alts
                .iter()
                .map(TypeExpr::render)
                .collect::<Vec<_>>()
                .join("|"),
            TypeExpr::Record(entries) => {
                let inner = entries
                    .iter()
                    .map(|entry| match &entry.value {
                        Some(value) => format!("{}: {}", entry.key, value.render()),
                        None => entry.key.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", inner)
            }
            TypeExpr::Generic { subject, args } => {
                let inner = args
                    .iter()
                    .map(TypeExpr::render)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}<{}>", subject.render(), inner)
            }
            TypeExpr::StringValue(s) => format!("'{}'", s),
            TypeExpr::NumberValue(n) => n.clone(),
        }
    }
}

/// A parse failure: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Human-readable description.
    pub message: String,
    /// Byte offset into the descriptor text.
    pub offset: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Num(String),
    Pipe,
    LBrace,
    RBrace,
    Lt,
    Gt,
    LParen,
    RParen,
    Colon,
    Comma,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    // Dashes and dots stay inside one identifier so `object-id` and
    // dotted names lex as single tokens.
    c.is_alphanumeric() || matches!(c, '_' | '$' | '-' | '.')
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '|' => {
                tokens.push((Token::Pipe, offset));
                i += 1;
            }
            '{' => {
                tokens.push((Token::LBrace, offset));
                i += 1;
            }
            '}' => {
                tokens.push((Token::RBrace, offset));
                i += 1;
            }
            '<' => {
                tokens.push((Token::Lt, offset));
                i += 1;
            }
            '>' => {
                tokens.push((Token::Gt, offset));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, offset));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, offset));
                i += 1;
            }
            ':' => {
                tokens.push((Token::Colon, offset));
                i += 1;
            }
            ',' => {
                tokens.push((Token::Comma, offset));
                i += 1;
            }
            '\'' | '"' => {
                let quote = c;
                let mut value = String::new();
                i += 1;
                loop {
                    match chars.get(i) {
                        Some(&(_, ch)) if ch == quote => {
                            i += 1;
                            break;
                        }
                        Some(&(_, '\\')) => {
                            if let Some(&(_, escaped)) = chars.get(i + 1) {
                                value.push(escaped);
                                i += 2;
                            } else {
                                return Err(ParseError {
                                    message: "unterminated string literal".to_string(),
                                    offset,
                                });
                            }
                        }
                        Some(&(_, ch)) => {
                            value.push(ch);
                            i += 1;
                        }
                        None => {
                            return Err(ParseError {
                                message: "unterminated string literal".to_string(),
                                offset,
                            })
                        }
                    }
                }
                tokens.push((Token::Str(value), offset));
            }
            c if c.is_ascii_digit()
                || ((c == '-' || c == '+')
                    && chars
                        .get(i + 1)
                        .is_some_and(|&(_, next)| next.is_ascii_digit())) =>
            {
                let mut text = String::new();
                if c == '-' || c == '+' {
                    text.push(c);
                    i += 1;
                }
                let mut seen_dot = false;
                while let Some(&(_, ch)) = chars.get(i) {
                    if ch.is_ascii_digit() {
                        text.push(ch);
                        i += 1;
                    } else if ch == '.' && !seen_dot {
                        seen_dot = true;
                        text.push(ch);
                        i += 1;
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Num(text), offset));
            }
            c if is_ident_start(c) => {
                let mut text = String::new();
                while let Some(&(_, ch)) = chars.get(i) {
                    if is_ident_continue(ch) {
                        text.push(ch);
                        i += 1;
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(text), offset));
            }
            other => {
                return Err(ParseError {
                    message: format!("unexpected character '{}'", other),
                    offset,
                })
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map_or(self.end, |&(_, offset)| offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected {}", what)))
        }
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            offset: self.offset(),
        }
    }

    fn parse_union(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.parse_postfix()?;
        if self.peek() != Some(&Token::Pipe) {
            return Ok(first);
        }

        let mut alts = Vec::new();
        flatten_into(&mut alts, first);
        while self.peek() == Some(&Token::Pipe) {
            self.pos += 1;
            flatten_into(&mut alts, self.parse_postfix()?);
        }
        Ok(TypeExpr::Union(alts))
    }

    fn parse_postfix(&mut self) -> Result<TypeExpr, ParseError> {
        let primary = self.parse_primary()?;
        if matches!(primary, TypeExpr::Name(_)) && self.peek() == Some(&Token::Lt) {
            self.pos += 1;
            let mut args = vec![self.parse_union()?];
            while self.peek() == Some(&Token::Comma) {
                self.pos += 1;
                args.push(self.parse_union()?);
            }
            self.expect(&Token::Gt, "'>' closing type arguments")?;
            return Ok(TypeExpr::Generic {
                subject: Box::new(primary),
                args,
            });
        }
        Ok(primary)
    }

    fn parse_primary(&mut self) -> Result<TypeExpr, ParseError> {
        match self.advance() {
            Some(Token::Ident(name)) => Ok(TypeExpr::Name(name)),
            Some(Token::Str(value)) => Ok(TypeExpr::StringValue(value)),
            Some(Token::Num(text)) => Ok(TypeExpr::NumberValue(text)),
            Some(Token::LBrace) => self.parse_record(),
            Some(Token::LParen) => {
                let inner = self.parse_union()?;
                self.expect(&Token::RParen, "')'")?;
                Ok(inner)
            }
            Some(token) => Err(ParseError {
                message: format!("unexpected token {:?}", token),
                offset: self.tokens[self.pos - 1].1,
            }),
            None => Err(self.error("unexpected end of input".to_string())),
        }
    }

    fn parse_record(&mut self) -> Result<TypeExpr, ParseError> {
        let mut entries = Vec::new();
        if self.peek() == Some(&Token::RBrace) {
            self.pos += 1;
            return Ok(TypeExpr::Record(entries));
        }

        loop {
            let key = match self.advance() {
                Some(Token::Ident(key)) | Some(Token::Str(key)) => key,
                _ => return Err(self.error("expected record key".to_string())),
            };
            let value = if self.peek() == Some(&Token::Colon) {
                self.pos += 1;
                Some(self.parse_union()?)
            } else {
                None
            };
            entries.push(RecordEntry { key, value });

            match self.peek() {
                Some(Token::Comma) => self.pos += 1,
                _ => break,
            }
        }
        self.expect(&Token::RBrace, "'}' closing record")?;
        Ok(TypeExpr::Record(entries))
    }
}

fn flatten_into(alts: &mut Vec<TypeExpr>, expr: TypeExpr) {
    match expr {
        TypeExpr::Union(nested) => alts.extend(nested),
        other => alts.push(other),
    }
}

/// Parses a type-descriptor string into an expression tree.
pub fn parse(input: &str) -> Result<TypeExpr, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
    };
    if parser.peek().is_none() {
        return Err(parser.error("empty type descriptor".to_string()));
    }
    let expr = parser.parse_union()?;
    if parser.peek().is_some() {
        return Err(parser.error("unexpected trailing input".to_string()));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_name() {
        assert_eq!(parse("string").unwrap(), TypeExpr::Name("string".into()));
        assert_eq!(parse("object-id").unwrap(), TypeExpr::Name("object-id".into()));
    }

    #[test]
    fn test_union_flattening() {
        let expr = parse("string|number|boolean").unwrap();
        assert_eq!(
            expr,
            TypeExpr::Union(vec![
                TypeExpr::Name("string".into()),
                TypeExpr::Name("number".into()),
                TypeExpr::Name("boolean".into()),
            ])
        );
    }

    #[test]
    fn test_parenthesized_union_flattens() {
        let expr = parse("(string|number)|boolean").unwrap();
        if let TypeExpr::Union(alts) = expr {
            assert_eq!(alts.len(), 3);
        } else {
            panic!("expected union");
        }
    }

    #[test]
    fn test_string_literals() {
        let expr = parse("'a'|\"b\"").unwrap();
        assert_eq!(
            expr,
            TypeExpr::Union(vec![
                TypeExpr::StringValue("a".into()),
                TypeExpr::StringValue("b".into()),
            ])
        );
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(parse("42").unwrap(), TypeExpr::NumberValue("42".into()));
        assert_eq!(parse("-1.5").unwrap(), TypeExpr::NumberValue("-1.5".into()));
    }

    #[test]
    fn test_generic() {
        let expr = parse("Array<string>").unwrap();
        assert_eq!(
            expr,
            TypeExpr::Generic {
                subject: Box::new(TypeExpr::Name("Array".into())),
                args: vec![TypeExpr::Name("string".into())],
            }
        );
    }

    #[test]
    fn test_generic_multiple_args() {
        let expr = parse("Map<string, number>").unwrap();
        if let TypeExpr::Generic { args, .. } = expr {
            assert_eq!(args.len(), 2);
        } else {
            panic!("expected generic");
        }
    }

    #[test]
    fn test_record() {
        let expr = parse("{name: string, count}").unwrap();
        assert_eq!(
            expr,
            TypeExpr::Record(vec![
                RecordEntry {
                    key: "name".into(),
                    value: Some(TypeExpr::Name("string".into())),
                },
                RecordEntry {
                    key: "count".into(),
                    value: None,
                },
            ])
        );
    }

    #[test]
    fn test_nested_generic_union() {
        let expr = parse("Array<'a'|'b'>").unwrap();
        if let TypeExpr::Generic { args, .. } = expr {
            assert!(matches!(args[0], TypeExpr::Union(_)));
        } else {
            panic!("expected generic");
        }
    }

    #[test]
    fn test_render_round_trip() {
        for descriptor in ["string|number", "Array<string>", "{a: number, b}", "'x'"] {
            let rendered = parse(descriptor).unwrap().render();
            assert_eq!(parse(&rendered).unwrap(), parse(descriptor).unwrap());
        }
    }

    #[test]
    fn test_error_reports_offset() {
        let err = parse("string|").unwrap_err();
        assert_eq!(err.offset, 7);
        assert!(err.message.contains("unexpected end of input"));
    }

    #[test]
    fn test_error_unexpected_character() {
        let err = parse("a;b").unwrap_err();
        assert!(err.message.contains("unexpected character"));
    }

    #[test]
    fn test_error_unterminated_string() {
        assert!(parse("'abc").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_trailing_input() {
        assert!(parse("string number").is_err());
    }
}
