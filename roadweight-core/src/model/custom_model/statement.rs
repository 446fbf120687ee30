use serde::{Deserialize, Serialize};

/// position of a statement within a decision chain
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    /// opens a new decision chain
    If,
    /// tested only if no earlier clause of the chain matched
    ElseIf,
    /// matches unconditionally, must end the chain
    Else,
}

/// operation applied to the running speed or priority value
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    /// scale the running value by the operand
    Multiply,
    /// clamp the running value to at most the operand
    Limit,
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Keyword::If => write!(f, "if"),
            Keyword::ElseIf => write!(f, "else_if"),
            Keyword::Else => write!(f, "else"),
        }
    }
}

impl Op {
    pub fn apply(&self, value: f64, operand: f64) -> f64 {
        match self {
            Op::Multiply => value * operand,
            Op::Limit => value.min(operand),
        }
    }
}

/// operand of a statement: a number, or text holding either a number or the
/// name of a decimal attribute.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum OperandValue {
    Number(f64),
    Text(String),
}

impl From<f64> for OperandValue {
    fn from(value: f64) -> Self {
        OperandValue::Number(value)
    }
}

impl From<&str> for OperandValue {
    fn from(value: &str) -> Self {
        OperandValue::Text(value.to_string())
    }
}

impl std::fmt::Display for OperandValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandValue::Number(n) => write!(f, "{n}"),
            OperandValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// one clause of a custom model. serialized in the familiar custom model
/// JSON form, e.g. `{"if": "road_class == PRIMARY", "multiply_by": 0.5}` or
/// `{"else": "", "limit_to": "30"}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "StatementRecord", into = "StatementRecord")]
pub struct Statement {
    pub keyword: Keyword,
    /// condition expression, empty for [`Keyword::Else`]
    pub condition: String,
    pub op: Op,
    pub value: OperandValue,
}

impl Statement {
    pub fn if_clause(condition: &str, op: Op, value: impl Into<OperandValue>) -> Statement {
        Statement {
            keyword: Keyword::If,
            condition: condition.to_string(),
            op,
            value: value.into(),
        }
    }

    pub fn else_if_clause(condition: &str, op: Op, value: impl Into<OperandValue>) -> Statement {
        Statement {
            keyword: Keyword::ElseIf,
            condition: condition.to_string(),
            op,
            value: value.into(),
        }
    }

    pub fn else_clause(op: Op, value: impl Into<OperandValue>) -> Statement {
        Statement {
            keyword: Keyword::Else,
            condition: String::new(),
            op,
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self.op {
            Op::Multiply => "multiply_by",
            Op::Limit => "limit_to",
        };
        match self.keyword {
            Keyword::Else => write!(f, "else {op} {}", self.value),
            keyword => write!(f, "{keyword} '{}' {op} {}", self.condition, self.value),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
struct StatementRecord {
    #[serde(rename = "if", default, skip_serializing_if = "Option::is_none")]
    if_condition: Option<String>,
    #[serde(rename = "else_if", default, skip_serializing_if = "Option::is_none")]
    else_if_condition: Option<String>,
    #[serde(rename = "else", default, skip_serializing_if = "Option::is_none")]
    else_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    multiply_by: Option<OperandValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit_to: Option<OperandValue>,
}

impl TryFrom<StatementRecord> for Statement {
    type Error = String;

    fn try_from(record: StatementRecord) -> Result<Self, Self::Error> {
        let (keyword, condition) = match (
            record.if_condition,
            record.else_if_condition,
            record.else_condition,
        ) {
            (Some(c), None, None) => (Keyword::If, c),
            (None, Some(c), None) => (Keyword::ElseIf, c),
            (None, None, Some(c)) => (Keyword::Else, c),
            _ => {
                return Err(String::from(
                    "statement needs exactly one of 'if', 'else_if' or 'else'",
                ))
            }
        };
        let (op, value) = match (record.multiply_by, record.limit_to) {
            (Some(v), None) => (Op::Multiply, v),
            (None, Some(v)) => (Op::Limit, v),
            _ => {
                return Err(String::from(
                    "statement needs exactly one of 'multiply_by' or 'limit_to'",
                ))
            }
        };
        Ok(Statement {
            keyword,
            condition,
            op,
            value,
        })
    }
}

impl From<Statement> for StatementRecord {
    fn from(statement: Statement) -> Self {
        let mut record = StatementRecord::default();
        match statement.keyword {
            Keyword::If => record.if_condition = Some(statement.condition),
            Keyword::ElseIf => record.else_if_condition = Some(statement.condition),
            Keyword::Else => record.else_condition = Some(statement.condition),
        }
        match statement.op {
            Op::Multiply => record.multiply_by = Some(statement.value),
            Op::Limit => record.limit_to = Some(statement.value),
        }
        record
    }
}
