//! Rule language.
//!
//! One rule per line:
//!
//! ```text
//! IF (<var> IS <label>) [ (AND|OR) (<var> IS <label>) ]  THEN  <var> IS <label> [ <var> IS <label> ]*
//! ```
//!
//! Keywords are case-sensitive and cannot be used as names. Whitespace between
//! tokens is free-form.

use tracing::debug;

use crate::dsl::{Antecedent, Clause, Operator};
use crate::error::{FuzzyError, Result};
use crate::rules::{Rule, RuleSet};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token<'a> {
    LParen,
    RParen,
    Word(&'a str),
}

const KEYWORDS: [&str; 5] = ["IF", "IS", "AND", "OR", "THEN"];

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn tokenize(line: &str) -> std::result::Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            },
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            },
            c if c.is_whitespace() => {
                chars.next();
            },
            c if is_ident_char(c) => {
                let mut end = start;

                while let Some(&(i, c)) = chars.peek() {
                    if !is_ident_char(c) {
                        break;
                    }
                    end = i + c.len_utf8();
                    chars.next();
                }

                tokens.push(Token::Word(&line[start..end]));
            },
            other => return Err(format!("unexpected character `{other}`")),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek() == Some(Token::Word(keyword))
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> std::result::Result<(), String> {
        if self.at_keyword(keyword) {
            self.pos += 1;
            Ok(())
        } else {
            Err(format!("expected `{keyword}`"))
        }
    }

    fn expect(&mut self, token: Token<'static>, what: &str) -> std::result::Result<(), String> {
        if self.peek() == Some(token) {
            self.pos += 1;
            Ok(())
        } else {
            Err(format!("expected {what}"))
        }
    }

    fn ident(&mut self, what: &str) -> std::result::Result<&'a str, String> {
        match self.peek() {
            Some(Token::Word(word)) if !KEYWORDS.contains(&word) => {
                self.pos += 1;
                Ok(word)
            },
            _ => Err(format!("expected {what}")),
        }
    }

    // <var> IS <label>
    fn clause(&mut self) -> std::result::Result<Clause, String> {
        let variable = self.ident("variable name")?;
        self.expect_keyword("IS")?;
        let label = self.ident("label")?;

        Ok(Clause::new(variable, label))
    }

    // (<var> IS <label>)
    fn paren_clause(&mut self) -> std::result::Result<Clause, String> {
        self.expect(Token::LParen, "`(`")?;
        let clause = self.clause()?;
        self.expect(Token::RParen, "`)`")?;

        Ok(clause)
    }

    fn antecedent(&mut self) -> std::result::Result<Antecedent, String> {
        let lhs = self.paren_clause()?;

        let op = match self.peek() {
            Some(Token::Word("AND")) => Operator::And,
            Some(Token::Word("OR")) => Operator::Or,
            _ => return Ok(Antecedent::Is(lhs)),
        };
        self.bump();
        let rhs = self.paren_clause()?;

        Ok(Antecedent::Binary(lhs, op, rhs))
    }

    fn consequent(&mut self) -> std::result::Result<Vec<Clause>, String> {
        if self.peek().is_none() {
            return Err("missing consequent".into());
        }

        let mut clauses = vec![self.clause()?];

        while self.peek().is_some() {
            clauses.push(self.clause()?);
        }

        Ok(clauses)
    }

    fn rule(&mut self) -> std::result::Result<Rule, String> {
        self.expect_keyword("IF")?;
        let antecedent = self.antecedent()?;
        self.expect_keyword("THEN")?;
        let consequent = self.consequent()?;

        Ok(Rule {
            antecedent,
            consequent,
        })
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<Rule> {
    tokenize(line)
        .and_then(|tokens| Parser { tokens, pos: 0 }.rule())
        .map_err(|reason| FuzzyError::RuleSyntax {
            line_number,
            line: line.to_owned(),
            reason,
        })
}

/// Parses a single rule.
pub fn parse_rule(line: &str) -> Result<Rule> {
    parse_line(line, 1)
}

/// Parses one rule per line, stopping at the first invalid line.
///
/// A final trailing newline is allowed; any other blank line is an error.
pub fn load_rules(text: &str) -> Result<RuleSet> {
    let rules = text
        .lines()
        .enumerate()
        .map(|(i, line)| parse_line(line, i + 1))
        .collect::<Result<RuleSet>>()?;

    debug!(rules = rules.len(), "loaded rule set");

    Ok(rules)
}

#[cfg(test)]
fn syntax_error(result: Result<impl std::fmt::Debug>) -> (usize, String, String) {
    match result {
        Err(FuzzyError::RuleSyntax {
            line_number,
            line,
            reason,
        }) => (line_number, line, reason),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_parse_binary_rule() {
    let rule = parse_rule("IF (d_L IS close_L) AND (d_R IS far_R)  THEN  Rotate IS high_right").unwrap();

    assert_eq!(
        rule.antecedent,
        Antecedent::and(Clause::new("d_L", "close_L"), Clause::new("d_R", "far_R"))
    );
    assert_eq!(rule.consequent, vec![Clause::new("Rotate", "high_right")]);

    let rule = parse_rule("IF (x IS a) OR (x IS b) THEN y IS z").unwrap();
    assert_eq!(rule.antecedent, Antecedent::or(Clause::new("x", "a"), Clause::new("x", "b")));
}

#[test]
fn test_parse_single_clause_and_multiple_consequents() {
    let rule = parse_rule("IF (center_dist IS close) THEN gas IS low Rotate IS nothing").unwrap();

    assert_eq!(rule.antecedent, Antecedent::Is(Clause::new("center_dist", "close")));
    assert_eq!(
        rule.consequent,
        vec![Clause::new("gas", "low"), Clause::new("Rotate", "nothing")]
    );
}

#[test]
fn test_parse_whitespace_is_free_form() {
    let expected = parse_rule("IF (d_R IS moderate_R) AND (d_L IS moderate_L) THEN Rotate IS nothing").unwrap();

    for line in [
        "IF (d_R IS moderate_R ) AND (d_L IS moderate_L)  THEN  Rotate IS nothing",
        "  IF(d_R IS moderate_R)AND(d_L IS moderate_L)THEN Rotate IS nothing  ",
        "IF\t( d_R  IS  moderate_R )\tAND ( d_L IS moderate_L ) THEN Rotate IS nothing",
    ] {
        assert_eq!(parse_rule(line).unwrap(), expected, "{line}");
    }
}

#[test]
fn test_missing_consequent_is_rejected() {
    let (line_number, line, reason) = syntax_error(parse_rule("IF (a IS b) THEN"));

    assert_eq!(line_number, 1);
    assert_eq!(line, "IF (a IS b) THEN");
    assert_eq!(reason, "missing consequent");
}

#[test]
fn test_malformed_rules() {
    for (line, reason) in [
        ("", "expected `IF`"),
        ("if (a IS b) THEN c IS d", "expected `IF`"),
        ("IF a IS b THEN c IS d", "expected `(`"),
        ("IF (a is b) THEN c IS d", "expected `IS`"),
        ("IF (a IS b THEN c IS d", "expected `)`"),
        ("IF (a IS b) and (c IS d) THEN e IS f", "expected `THEN`"),
        ("IF (a IS b) AND (c IS d) OR (e IS f) THEN g IS h", "expected `THEN`"),
        ("IF (a IS b) AND THEN c IS d", "expected `(`"),
        ("IF (a IS b) THEN c IS", "expected label"),
        ("IF (a IS b) THEN c IS d e", "expected `IS`"),
        ("IF (a IS b) THEN (c IS d)", "expected variable name"),
        ("IF (THEN IS b) THEN c IS d", "expected variable name"),
        ("IF (a IS b) THEN c IS d;", "unexpected character `;`"),
    ] {
        let (_, text, actual) = syntax_error(parse_rule(line));
        assert_eq!(text, line);
        assert_eq!(actual, reason, "{line}");
    }
}

#[test]
fn test_load_rules() {
    let text = "IF (d_L IS close) THEN Rotate IS high_right\nIF (d_R IS close) THEN Rotate IS high_left\n";
    let rules = load_rules(text).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.0[1].consequent, vec![Clause::new("Rotate", "high_left")]);
    assert_eq!(text.parse::<RuleSet>(), Ok(rules));
    assert_eq!(load_rules("").unwrap().len(), 0);
}

#[test]
fn test_load_rules_fails_fast() {
    let text = "IF (a IS b) THEN c IS d\nIF (a IS b) THEN\nIF (a IS b) OOPS\n";
    let (line_number, line, _) = syntax_error(load_rules(text));

    assert_eq!(line_number, 2);
    assert_eq!(line, "IF (a IS b) THEN");

    // Blank lines in the middle are not skipped
    let (line_number, line, _) = syntax_error(load_rules("IF (a IS b) THEN c IS d\n\nIF (a IS b) THEN c IS d"));
    assert_eq!(line_number, 2);
    assert_eq!(line, "");
}
