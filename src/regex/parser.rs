//! Recursive-descent parser for the supported POSIX-ERE subset.
//!
//! ```text
//! alternation  := concatenation ( '|' alternation )?
//! concatenation:= atom+                        -- until '|' or ')' or EOF
//! atom         := primary quantifier?
//! primary      := group | charset | escape | '.' | anchor | literal
//! group        := '(' alternation ')'
//! charset      := '[' '^'? char+ ']'
//! escape       := '\' ( digit | 'd' | 'w' | any )
//! quantifier   := '+' | '*' | '?'
//! anchor       := '^' | '$'
//! literal      := any char not in the metacharacter set
//! ```

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use super::ast::{AnchorKind, CharClassKind, Node, QuantKind};
use super::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("pattern ends inside a group")]
    UnterminatedGroup,
    #[error("pattern ends inside a character set")]
    UnterminatedCharSet,
    #[error("character set `[]`/`[^]` has no members")]
    EmptyCharSet,
    #[error("quantifier with no preceding atom")]
    DanglingQuantifier,
    #[error("pattern ends with a trailing backslash")]
    TrailingEscape,
    #[error("trailing characters after the pattern")]
    TrailingCharacters,
    #[error("alternation branch has no atoms")]
    EmptyAlternative,
}

// An empty input string compiles to a pattern with no root node, which
// matches with zero width at any position.
pub fn parse(pattern: &str) -> Result<Regex, ParseError> {
    if pattern.is_empty() {
        return Ok(Regex {
            root: None,
            group_count: 0,
        });
    }

    let mut parser = Parser {
        chars: pattern.chars().peekable(),
        group_count: 0,
    };
    let root = parser.parse_alternation()?;
    if parser.chars.peek().is_some() {
        return Err(ParseError::TrailingCharacters);
    }
    Ok(Regex {
        root: Some(root),
        group_count: parser.group_count,
    })
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    group_count: usize,
}

impl<'a> Parser<'a> {
    fn parse_alternation(&mut self) -> Result<Node, ParseError> {
        let mut branches = vec![self.parse_concatenation()?];
        while self.peek_is('|') {
            self.chars.next();
            branches.push(self.parse_concatenation()?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap())
        } else {
            Ok(Node::Alt(branches))
        }
    }

    fn parse_concatenation(&mut self) -> Result<Node, ParseError> {
        let mut atoms = Vec::new();
        while let Some(&c) = self.chars.peek() {
            if c == '|' || c == ')' {
                break;
            }
            atoms.push(self.parse_atom()?);
        }
        match atoms.len() {
            0 => Err(ParseError::EmptyAlternative),
            1 => Ok(atoms.pop().unwrap()),
            _ => Ok(Node::Concat(atoms)),
        }
    }

    fn parse_atom(&mut self) -> Result<Node, ParseError> {
        let primary = self.parse_primary()?;
        let kind = match self.chars.peek() {
            Some('+') => Some(QuantKind::Plus),
            Some('*') => Some(QuantKind::Star),
            Some('?') => Some(QuantKind::Opt),
            _ => None,
        };
        match kind {
            Some(kind) => {
                self.chars.next();
                Ok(Node::Quant {
                    child: Box::new(primary),
                    kind,
                    greedy: true,
                })
            }
            None => Ok(primary),
        }
    }

    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        // parse_concatenation only calls us when peek() is Some and is
        // not '|' / ')', so this is always a genuine character.
        let c = *self.chars.peek().expect("parse_primary called at EOF");
        match c {
            '(' => self.parse_group(),
            '[' => self.parse_charset(),
            '\\' => self.parse_escape(),
            '.' => {
                self.chars.next();
                Ok(Node::Dot)
            }
            '^' => {
                self.chars.next();
                Ok(Node::Anchor(AnchorKind::Start))
            }
            '$' => {
                self.chars.next();
                Ok(Node::Anchor(AnchorKind::End))
            }
            '+' | '*' | '?' => Err(ParseError::DanglingQuantifier),
            _ => {
                self.chars.next();
                Ok(Node::Literal(c))
            }
        }
    }

    fn parse_group(&mut self) -> Result<Node, ParseError> {
        self.chars.next(); // consume '('
        self.group_count += 1;
        let index = self.group_count;
        let child = self.parse_alternation()?;
        match self.chars.next() {
            Some(')') => Ok(Node::Group {
                child: Box::new(child),
                index,
            }),
            _ => Err(ParseError::UnterminatedGroup),
        }
    }

    fn parse_charset(&mut self) -> Result<Node, ParseError> {
        self.chars.next(); // consume '['
        let negated = self.peek_is('^');
        if negated {
            self.chars.next();
        }
        let mut set = Vec::new();
        loop {
            match self.chars.next() {
                Some(']') => break,
                Some(c) => {
                    if !set.contains(&c) {
                        set.push(c);
                    }
                }
                None => return Err(ParseError::UnterminatedCharSet),
            }
        }
        if set.is_empty() {
            return Err(ParseError::EmptyCharSet);
        }
        Ok(Node::CharSet { set, negated })
    }

    fn parse_escape(&mut self) -> Result<Node, ParseError> {
        self.chars.next(); // consume '\'
        match self.chars.next() {
            Some('d') => Ok(Node::CharClass(CharClassKind::Digit)),
            Some('w') => Ok(Node::CharClass(CharClassKind::Word)),
            Some(c) if c.is_ascii_digit() && c != '0' => {
                Ok(Node::Backref(c.to_digit(10).unwrap() as usize))
            }
            Some(c) => Ok(Node::Literal(c)),
            None => Err(ParseError::TrailingEscape),
        }
    }

    fn peek_is(&mut self, c: char) -> bool {
        self.chars.peek() == Some(&c)
    }
}
