//! Restricted interpreter for posting-rule conditions.
//!
//! Conditions are data, not code. The grammar is a single comparison of one
//! operation-data field against one literal:
//!
//! ```text
//! condition := field OP literal
//! OP        := == | != | >= | <= | > | <
//! literal   := number | 'text' | "text" | bare_word | true | false
//! ```
//!
//! There is deliberately no boolean combination, no arithmetic, and no
//! access to anything outside the supplied field map. This keeps rule
//! conditions auditable and injection-safe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::operation::{FieldValue, OperationData};

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Less than.
    Lt,
    /// Greater or equal.
    Ge,
    /// Less or equal.
    Le,
}

impl CmpOp {
    fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }

    fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Ge | Self::Le)
    }
}

/// Literal operand of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Numeric literal.
    Number(Decimal),
    /// Text literal.
    Text(String),
    /// Boolean literal.
    Bool(bool),
}

/// A parsed, validated rule condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Operation-data field the condition reads.
    pub field: String,
    /// Comparison operator.
    pub op: CmpOp,
    /// Literal the field is compared against.
    pub literal: Literal,
}

impl Condition {
    /// Parses a raw condition expression.
    ///
    /// # Errors
    ///
    /// Returns `ConditionEvaluation` if the expression does not match the
    /// restricted grammar.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let fail = |reason: &str| EngineError::ConditionEvaluation {
            condition: raw.to_string(),
            reason: reason.to_string(),
        };

        // The earliest operator in the string is the real one; anything after
        // it belongs to the literal (which may itself contain operator
        // symbols, e.g. inside quotes). Two-character symbols are listed
        // before > and < so that ">=" at a position beats ">" at the same one.
        let mut found: Option<(usize, CmpOp, usize)> = None;
        for (symbol, op) in [
            ("==", CmpOp::Eq),
            ("!=", CmpOp::Ne),
            (">=", CmpOp::Ge),
            ("<=", CmpOp::Le),
            (">", CmpOp::Gt),
            ("<", CmpOp::Lt),
        ] {
            if let Some(pos) = raw.find(symbol) {
                if found.is_none_or(|(best, _, _)| pos < best) {
                    found = Some((pos, op, symbol.len()));
                }
            }
        }
        let (pos, op, op_len) = found.ok_or_else(|| fail("no comparison operator"))?;

        let field = raw[..pos].trim();
        let literal_text = raw[pos + op_len..].trim();

        if field.is_empty() {
            return Err(fail("missing field name"));
        }
        if !is_identifier(field) {
            return Err(fail("field name is not a plain identifier"));
        }
        if literal_text.is_empty() {
            return Err(fail("missing literal"));
        }

        let literal = parse_literal(literal_text).ok_or_else(|| fail("unparseable literal"))?;

        if op.is_ordering() && !matches!(literal, Literal::Number(_)) {
            return Err(fail("ordering comparison requires a numeric literal"));
        }

        Ok(Self {
            field: field.to_string(),
            op,
            literal,
        })
    }

    /// Evaluates the condition against the supplied operation data.
    ///
    /// # Errors
    ///
    /// Returns `ConditionEvaluation` if the field is missing or its type does
    /// not match the literal.
    pub fn evaluate(&self, data: &OperationData) -> Result<bool, EngineError> {
        let fail = |reason: String| EngineError::ConditionEvaluation {
            condition: format!("{} {} {:?}", self.field, self.op.as_str(), self.literal),
            reason,
        };

        let value = data
            .get(&self.field)
            .ok_or_else(|| fail(format!("operation data has no field \"{}\"", self.field)))?;

        match (&self.literal, value) {
            (Literal::Number(lit), FieldValue::Number(val)) => Ok(compare(self.op, val.cmp(lit))),
            (Literal::Text(lit), FieldValue::Text(val)) => match self.op {
                CmpOp::Eq => Ok(val == lit),
                CmpOp::Ne => Ok(val != lit),
                _ => Err(fail("ordering comparison is not defined for text".to_string())),
            },
            (Literal::Bool(lit), FieldValue::Bool(val)) => match self.op {
                CmpOp::Eq => Ok(val == lit),
                CmpOp::Ne => Ok(val != lit),
                _ => Err(fail("ordering comparison is not defined for booleans".to_string())),
            },
            _ => Err(fail(format!(
                "field \"{}\" has a different type than the literal",
                self.field
            ))),
        }
    }
}

fn compare(op: CmpOp, ordering: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};
    match op {
        CmpOp::Eq => ordering == Equal,
        CmpOp::Ne => ordering != Equal,
        CmpOp::Gt => ordering == Greater,
        CmpOp::Lt => ordering == Less,
        CmpOp::Ge => ordering != Less,
        CmpOp::Le => ordering != Greater,
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_literal(text: &str) -> Option<Literal> {
    // Quoted text: 'BANCO' or "BANCO"
    for quote in ['\'', '"'] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            let inner = &text[1..text.len() - 1];
            if inner.contains(quote) {
                return None;
            }
            return Some(Literal::Text(inner.to_string()));
        }
    }

    match text {
        "true" => return Some(Literal::Bool(true)),
        "false" => return Some(Literal::Bool(false)),
        _ => {}
    }

    if let Ok(number) = text.parse::<Decimal>() {
        return Some(Literal::Number(number));
    }

    // Bare words (e.g. BANCO) are accepted as text for rule-author convenience.
    if is_identifier(text) {
        return Some(Literal::Text(text.to_string()));
    }

    None
}
