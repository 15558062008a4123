//! Filter conditions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a condition is joined to the conditions before it.
///
/// The logic tag of the first condition in a query is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanLogic {
    #[default]
    And,
    Or,
}

/// A comparison operator understood by the server.
///
/// Operators the client does not know about are carried through verbatim
/// in [`Operator::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    #[default]
    IsEqual,
    IsNotEqual,
    IsGreater,
    IsLess,
    IsGreaterOrEqual,
    IsLessOrEqual,
    BeginsWith,
    Contains,
    DayIsEqual,
    MonthIsEqual,
    YearIsEqual,
    LastXDays,
    LastXWeeks,
    LastXMonths,
    LastXYears,
    NextXDays,
    NextXWeeks,
    NextXMonths,
    NextXYears,
    Other(String),
}

impl Operator {
    /// The wire name of this operator.
    pub fn as_str(&self) -> &str {
        match self {
            Self::IsEqual => "is_equal",
            Self::IsNotEqual => "is_not_equal",
            Self::IsGreater => "is_greater",
            Self::IsLess => "is_less",
            Self::IsGreaterOrEqual => "is_greater_or_equal",
            Self::IsLessOrEqual => "is_less_or_equal",
            Self::BeginsWith => "begins_with",
            Self::Contains => "contains",
            Self::DayIsEqual => "day_is_equal",
            Self::MonthIsEqual => "month_is_equal",
            Self::YearIsEqual => "year_is_equal",
            Self::LastXDays => "last_x_days",
            Self::LastXWeeks => "last_x_weeks",
            Self::LastXMonths => "last_x_months",
            Self::LastXYears => "last_x_years",
            Self::NextXDays => "next_x_days",
            Self::NextXWeeks => "next_x_weeks",
            Self::NextXMonths => "next_x_months",
            Self::NextXYears => "next_x_years",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Operator {
    fn from(name: &str) -> Self {
        match name {
            "is_equal" => Self::IsEqual,
            "is_not_equal" => Self::IsNotEqual,
            "is_greater" => Self::IsGreater,
            "is_less" => Self::IsLess,
            "is_greater_or_equal" => Self::IsGreaterOrEqual,
            "is_less_or_equal" => Self::IsLessOrEqual,
            "begins_with" => Self::BeginsWith,
            "contains" => Self::Contains,
            "day_is_equal" => Self::DayIsEqual,
            "month_is_equal" => Self::MonthIsEqual,
            "year_is_equal" => Self::YearIsEqual,
            "last_x_days" => Self::LastXDays,
            "last_x_weeks" => Self::LastXWeeks,
            "last_x_months" => Self::LastXMonths,
            "last_x_years" => Self::LastXYears,
            "next_x_days" => Self::NextXDays,
            "next_x_weeks" => Self::NextXWeeks,
            "next_x_months" => Self::NextXMonths,
            "next_x_years" => Self::NextXYears,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Operator {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One filter condition of a query.
///
/// Field name, operator and logic are fixed once the condition has been
/// added to a query. `value` stays public so edit forms can change it in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    field_name: String,
    operator: Operator,
    /// The operand compared against the field.
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    blogic: BooleanLogic,
}

impl Condition {
    pub(crate) fn new(field_name: impl Into<String>, blogic: BooleanLogic) -> Self {
        Self {
            field_name: field_name.into(),
            operator: Operator::default(),
            value: Value::Null,
            blogic,
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn blogic(&self) -> BooleanLogic {
        self.blogic
    }

    /// Replaces the operand.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }
}

/// Completes a freshly appended [`Condition`].
///
/// Each operator method sets the operator and operand and hands the
/// condition back to the caller.
#[derive(Debug)]
pub struct ConditionBuilder<'a> {
    condition: &'a mut Condition,
}

impl<'a> ConditionBuilder<'a> {
    pub(crate) fn new(condition: &'a mut Condition) -> Self {
        Self { condition }
    }

    /// Direct access to the bound condition.
    pub fn condition(self) -> &'a mut Condition {
        self.condition
    }

    /// Sets an arbitrary operator, known or not.
    pub fn with(self, operator: impl Into<Operator>, value: impl Into<Value>) -> &'a mut Condition {
        self.condition.operator = operator.into();
        self.condition.value = value.into();
        self.condition
    }

    pub fn equal_to(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::IsEqual, value)
    }

    pub fn not_equal_to(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::IsNotEqual, value)
    }

    pub fn greater_than(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::IsGreater, value)
    }

    pub fn less_than(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::IsLess, value)
    }

    pub fn greater_or_equal_to(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::IsGreaterOrEqual, value)
    }

    pub fn less_or_equal_to(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::IsLessOrEqual, value)
    }

    pub fn begins_with(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::BeginsWith, value)
    }

    pub fn contains(self, value: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::Contains, value)
    }

    pub fn day_is_equal(self, day: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::DayIsEqual, day)
    }

    pub fn month_is_equal(self, month: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::MonthIsEqual, month)
    }

    pub fn year_is_equal(self, year: impl Into<Value>) -> &'a mut Condition {
        self.with(Operator::YearIsEqual, year)
    }

    // Relative date windows take a count of units.

    pub fn last_num_days(self, num: i64) -> &'a mut Condition {
        self.with(Operator::LastXDays, num)
    }

    pub fn last_num_weeks(self, num: i64) -> &'a mut Condition {
        self.with(Operator::LastXWeeks, num)
    }

    pub fn last_num_months(self, num: i64) -> &'a mut Condition {
        self.with(Operator::LastXMonths, num)
    }

    pub fn last_num_years(self, num: i64) -> &'a mut Condition {
        self.with(Operator::LastXYears, num)
    }

    pub fn next_num_days(self, num: i64) -> &'a mut Condition {
        self.with(Operator::NextXDays, num)
    }

    pub fn next_num_weeks(self, num: i64) -> &'a mut Condition {
        self.with(Operator::NextXWeeks, num)
    }

    pub fn next_num_months(self, num: i64) -> &'a mut Condition {
        self.with(Operator::NextXMonths, num)
    }

    pub fn next_num_years(self, num: i64) -> &'a mut Condition {
        self.with(Operator::NextXYears, num)
    }
}
