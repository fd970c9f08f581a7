use crate::error::SpecError;

use super::feedback::Feedback;

/// Skip-condition expression tree, compiled once at specification load time.
/// Malformed shapes and unknown metric names are rejected while parsing so
/// that evaluation itself can never fail mid-sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipCondition {
    Literal(f64),
    Metric(Metric),
    LessThan(Box<SkipCondition>, Box<SkipCondition>),
    GreaterThan(Box<SkipCondition>, Box<SkipCondition>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Achieved aggregate producer rate divided by the requested rate of the
    /// test that just ran. Exactly 1.0 when the requested rate is uncapped
    /// (non-positive), so an uncapped test never looks saturated.
    SentDivRequestedMbPerSec,
}

/// Everything a condition may reference about the test that just ran.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'feedback> {
    pub requested_mb_per_sec: i64,
    pub feedback: &'feedback Feedback,
}

impl EvalContext<'_> {
    fn efficiency_ratio(&self) -> f64 {
        if self.requested_mb_per_sec <= 0 {
            return 1.0;
        }
        self.feedback.sent_mb_per_sec() / self.requested_mb_per_sec as f64
    }
}

/// Result of evaluating a condition node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CondValue {
    Number(f64),
    Bool(bool),
}

impl CondValue {
    /// Booleans coerce to 1.0/0.0 when used as comparison operands,
    /// matching the behavior the grid format was written against.
    fn as_number(self) -> f64 {
        match self {
            CondValue::Number(value) => value,
            CondValue::Bool(true) => 1.0,
            CondValue::Bool(false) => 0.0,
        }
    }

    pub fn is_truthy(self) -> bool {
        match self {
            CondValue::Number(value) => value != 0.0,
            CondValue::Bool(value) => value,
        }
    }
}

impl SkipCondition {
    /// Compiles a raw `skip_remaining_throughput` document fragment.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::MalformedSkipCondition` for any shape that is not
    /// a number, a known metric name, or a `less-than`/`greater-than` node
    /// with exactly two operands, and `SpecError::UnknownMetric` for an
    /// unrecognized metric reference.
    pub fn parse(value: &serde_json::Value) -> Result<Self, SpecError> {
        match value {
            serde_json::Value::Number(number) => number
                .as_f64()
                .map(SkipCondition::Literal)
                .ok_or_else(|| malformed(value)),
            serde_json::Value::String(name) => {
                if name == "sent_div_requested_mb_per_sec" {
                    Ok(SkipCondition::Metric(Metric::SentDivRequestedMbPerSec))
                } else {
                    Err(SpecError::UnknownMetric { name: name.clone() })
                }
            }
            serde_json::Value::Object(map) => {
                let (key, operands) = match map.iter().next() {
                    Some(entry) if map.len() == 1 => entry,
                    Some(_) | None => return Err(malformed(value)),
                };
                let (first, second) = match operands.as_array().map(Vec::as_slice) {
                    Some([first, second]) => (first, second),
                    Some(_) | None => return Err(malformed(value)),
                };
                let lhs = Box::new(Self::parse(first)?);
                let rhs = Box::new(Self::parse(second)?);
                match key.as_str() {
                    "less-than" => Ok(SkipCondition::LessThan(lhs, rhs)),
                    "greater-than" => Ok(SkipCondition::GreaterThan(lhs, rhs)),
                    _ => Err(malformed(value)),
                }
            }
            serde_json::Value::Null
            | serde_json::Value::Bool(_)
            | serde_json::Value::Array(_) => Err(malformed(value)),
        }
    }

    /// Pure evaluation against the previous test's feedback.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> CondValue {
        match self {
            SkipCondition::Literal(value) => CondValue::Number(*value),
            SkipCondition::Metric(Metric::SentDivRequestedMbPerSec) => {
                CondValue::Number(ctx.efficiency_ratio())
            }
            SkipCondition::LessThan(lhs, rhs) => {
                CondValue::Bool(lhs.evaluate(ctx).as_number() < rhs.evaluate(ctx).as_number())
            }
            SkipCondition::GreaterThan(lhs, rhs) => {
                CondValue::Bool(lhs.evaluate(ctx).as_number() > rhs.evaluate(ctx).as_number())
            }
        }
    }
}

fn malformed(value: &serde_json::Value) -> SpecError {
    SpecError::MalformedSkipCondition {
        fragment: value.to_string(),
    }
}
