//! Arithmetic expression evaluation and result formatting.
//!
//! Input strings are sanitized to the calculator's character set, then parsed
//! with a small recursive descent grammar and evaluated over `f64`. There is
//! no symbol table and no function call syntax: the evaluator can only ever
//! see numeric literals, `+ - * / %`, and parentheses.
//!
//! Precedence, lowest to highest: add/subtract, multiply/divide/remainder,
//! unary sign, parentheses.

use std::fmt;

/// Characters that survive sanitization. Everything else is stripped
/// before tokenization.
const ALLOWED: &str = "0123456789+-*/.()%";

/// Maximum fractional digits in formatted results.
const MAX_FRACTION_DIGITS: usize = 10;

/// Evaluation failure.
///
/// All variants are terminal: callers map them to an error display state and
/// never propagate them past the component boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Nothing left to evaluate after sanitization.
    Empty,
    /// A numeric literal that does not parse (e.g. `1.2.3` or a lone `.`).
    MalformedNumber(String),
    /// An operator or parenthesis in a position the grammar does not allow.
    UnexpectedToken(String),
    /// Input ended while an operand or closing parenthesis was expected.
    UnexpectedEnd,
    /// The result is NaN or infinite (division by zero and friends).
    NonFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Empty => write!(f, "empty expression"),
            EvalError::MalformedNumber(s) => write!(f, "malformed number: {s}"),
            EvalError::UnexpectedToken(s) => write!(f, "unexpected token: {s}"),
            EvalError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            EvalError::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvalError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Strips every character outside the calculator's set.
///
/// This is the sandboxing step: after it, the tokenizer can only ever see
/// digits, operators, dots, and parentheses.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| ALLOWED.contains(*c)).collect()
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::MalformedNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            // Sanitization removed everything else already.
            _ => i += 1,
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.advance();
                    value *= self.unary()?;
                }
                Token::Slash => {
                    self.advance();
                    value /= self.unary()?;
                }
                Token::Percent => {
                    self.advance();
                    value %= self.unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(other) => Err(EvalError::UnexpectedToken(other.describe())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}

/// Evaluates an arithmetic expression string.
///
/// The input is sanitized first, so callers may pass raw display text.
/// Non-finite results (division by zero, `% 0`) are evaluation failures.
///
/// # Errors
/// Returns an [`EvalError`] for empty, malformed, or non-finite expressions.
pub fn evaluate(raw: &str) -> Result<f64, EvalError> {
    let sanitized = sanitize(raw);
    if sanitized.is_empty() {
        return Err(EvalError::Empty);
    }

    let tokens = tokenize(&sanitized)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;

    if let Some(extra) = parser.peek() {
        return Err(EvalError::UnexpectedToken(extra.describe()));
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }

    Ok(value)
}

/// Formats an evaluator result for display and history.
///
/// At most 10 fractional digits, trailing zeros dropped, integer part
/// grouped with comma separators (single en-US-style locale).
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{value:.MAX_FRACTION_DIGITS$}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(unsigned.len() + unsigned.len() / 3);
    let digits = int_part.len();
    for (idx, c) in int_part.chars().enumerate() {
        if idx > 0 && (digits - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Formats a scientific-function result: 10 fixed fractional digits, then
/// trailing zeros and a lone trailing point stripped. No grouping.
///
/// NaN and infinities pass through as their plain text forms; the scientific
/// dispatcher displays them literally rather than erroring.
pub fn format_fixed_trimmed(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{value:.MAX_FRACTION_DIGITS$}");
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_multiplication_before_addition() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
    }

    #[test]
    fn parens_override_precedence() {
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
    }

    #[test]
    fn remainder_binds_like_multiplication() {
        assert_eq!(evaluate("10 % 4 + 1").unwrap(), 3.0);
        assert_eq!(evaluate("7 % 3").unwrap(), 1.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("2 * -3").unwrap(), -6.0);
        assert_eq!(evaluate("-(2 + 3)").unwrap(), -5.0);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(evaluate("5 / 0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("0 / 0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("5 % 0"), Err(EvalError::NonFinite));
    }

    #[test]
    fn trailing_operator_is_an_error() {
        assert_eq!(evaluate("5 +"), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn unbalanced_parens_are_an_error() {
        assert_eq!(evaluate("(1 + 2"), Err(EvalError::UnexpectedEnd));
        assert!(matches!(
            evaluate("1 + 2)"),
            Err(EvalError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn empty_and_letters_only_are_errors() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("abc"), Err(EvalError::Empty));
    }

    #[test]
    fn sanitize_strips_foreign_characters() {
        assert_eq!(sanitize("1 + alert(2)"), "1+(2)");
        assert_eq!(evaluate("2; DROP TABLE + 2").unwrap(), 4.0);
    }

    #[test]
    fn malformed_number_is_an_error() {
        assert!(matches!(
            evaluate("1.2.3"),
            Err(EvalError::MalformedNumber(_))
        ));
        assert!(matches!(evaluate("."), Err(EvalError::MalformedNumber(_))));
    }

    #[test]
    fn decimal_arithmetic() {
        assert_eq!(evaluate("1.5 * 2").unwrap(), 3.0);
        assert_eq!(evaluate("0.1 + 0.2").unwrap(), 0.1 + 0.2);
    }

    #[test]
    fn grouped_format_inserts_separators() {
        assert_eq!(format_grouped(1_234_567.5), "1,234,567.5");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(-12_345.0), "-12,345");
    }

    #[test]
    fn grouped_format_caps_fraction_digits() {
        // 0.1 + 0.2 displays as 0.3 once rounded to ten fractional digits.
        assert_eq!(format_grouped(0.1 + 0.2), "0.3");
        assert_eq!(format_grouped(1.0 / 3.0), "0.3333333333");
    }

    #[test]
    fn fixed_trimmed_strips_trailing_zeros() {
        assert_eq!(format_fixed_trimmed(3.0), "3");
        assert_eq!(format_fixed_trimmed(2.25), "2.25");
        assert_eq!(format_fixed_trimmed(0.5), "0.5");
    }

    #[test]
    fn fixed_trimmed_passes_non_finite_through() {
        assert_eq!(format_fixed_trimmed(f64::NAN), "NaN");
        assert_eq!(format_fixed_trimmed(f64::INFINITY), "inf");
    }
}
