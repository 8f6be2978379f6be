//! Customer record validation
//!
//! Validation runs in two phases. The per-field pass checks presence, JSON
//! type and bounds of every field and collects all violations. The record
//! pass then checks invariants spanning several fields, which only run when
//! the fields involved passed on their own.

use std::fmt;

use serde_json::{Map, Value};

use super::features::{
    CustomerFeatures, FieldRule, FieldType, FEATURE_COUNT, FIELD_RULES, GEOGRAPHY_GERMANY,
    GEOGRAPHY_SPAIN,
};

/// Reason a value was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Required field absent
    Missing,
    /// Value is not a whole number
    NotAnInteger,
    /// Value is not a number
    NotANumber,
    BelowMinimum { min: f64 },
    AboveMaximum { max: f64 },
    /// Geography_Germany and Geography_Spain both set
    GeographyExclusive,
    /// Record is not a JSON object
    NotAnObject,
    /// Batch body is not a JSON array
    NotAList,
}

impl ViolationKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotAnInteger => "int_type",
            Self::NotANumber => "float_type",
            Self::BelowMinimum { .. } => "greater_than_equal",
            Self::AboveMaximum { .. } => "less_than_equal",
            Self::GeographyExclusive => "value_error",
            Self::NotAnObject => "model_type",
            Self::NotAList => "list_type",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Field required"),
            Self::NotAnInteger => write!(f, "Input should be a valid integer"),
            Self::NotANumber => write!(f, "Input should be a valid number"),
            Self::BelowMinimum { min } => {
                write!(f, "Input should be greater than or equal to {}", min)
            }
            Self::AboveMaximum { max } => {
                write!(f, "Input should be less than or equal to {}", max)
            }
            Self::GeographyExclusive => write!(
                f,
                "Geography_Germany and Geography_Spain cannot both be 1"
            ),
            Self::NotAnObject => write!(f, "Input should be a valid object"),
            Self::NotAList => write!(f, "Input should be a valid list"),
        }
    }
}

/// One rejected value, located by batch position and field name
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub index: Option<usize>,
    pub field: Option<&'static str>,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn field(field: &'static str, kind: ViolationKind) -> Self {
        Self {
            index: None,
            field: Some(field),
            kind,
        }
    }

    pub fn record(kind: ViolationKind) -> Self {
        Self {
            index: None,
            field: None,
            kind,
        }
    }

    fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.index, self.field) {
            (Some(index), Some(field)) => write!(f, "[{}].{}: {}", index, field, self.kind),
            (Some(index), None) => write!(f, "[{}]: {}", index, self.kind),
            (None, Some(field)) => write!(f, "{}: {}", field, self.kind),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

/// Every violation found in a record or batch
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// True if any violation names `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == Some(field))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Numeric reading of a JSON value. Numbers pass through; strings holding a
/// number (surrounding whitespace allowed) are parsed.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Check a single field value against its rule
fn check_field(rule: &FieldRule, value: Option<&Value>) -> Result<f64, ViolationKind> {
    let number = match value {
        None => return Err(ViolationKind::Missing),
        Some(value) => numeric_value(value),
    };

    let number = match (rule.field_type, number) {
        (FieldType::Integer, Some(n)) if n.is_finite() && n.fract() == 0.0 => n,
        (FieldType::Integer, _) => return Err(ViolationKind::NotAnInteger),
        (FieldType::Float, Some(n)) if n.is_finite() => n,
        (FieldType::Float, _) => return Err(ViolationKind::NotANumber),
    };

    if number < rule.min {
        return Err(ViolationKind::BelowMinimum { min: rule.min });
    }

    if let Some(max) = rule.max {
        if number > max {
            return Err(ViolationKind::AboveMaximum { max });
        }
    }

    Ok(number)
}

/// Whole-record invariants over individually valid fields
fn check_record(
    values: &[f64; FEATURE_COUNT],
    valid: &[bool; FEATURE_COUNT],
) -> Option<FieldViolation> {
    let geography_checked = valid[GEOGRAPHY_GERMANY] && valid[GEOGRAPHY_SPAIN];

    if geography_checked && values[GEOGRAPHY_GERMANY] == 1.0 && values[GEOGRAPHY_SPAIN] == 1.0 {
        return Some(FieldViolation::field(
            FIELD_RULES[GEOGRAPHY_SPAIN].name,
            ViolationKind::GeographyExclusive,
        ));
    }

    None
}

fn validate_object(object: &Map<String, Value>) -> Result<CustomerFeatures, ValidationErrors> {
    let mut values = [0.0; FEATURE_COUNT];
    let mut valid = [false; FEATURE_COUNT];
    let mut violations = Vec::new();

    for (position, rule) in FIELD_RULES.iter().enumerate() {
        match check_field(rule, object.get(rule.name)) {
            Ok(value) => {
                values[position] = value;
                valid[position] = true;
            }
            Err(kind) => violations.push(FieldViolation::field(rule.name, kind)),
        }
    }

    if let Some(violation) = check_record(&values, &valid) {
        violations.push(violation);
    }

    if violations.is_empty() {
        Ok(CustomerFeatures::from_checked(values))
    } else {
        Err(ValidationErrors { violations })
    }
}

/// Validate one raw record. Unknown fields are ignored.
pub fn validate_record(raw: &Value) -> Result<CustomerFeatures, ValidationErrors> {
    match raw {
        Value::Object(object) => validate_object(object),
        _ => Err(ValidationErrors::single(FieldViolation::record(
            ViolationKind::NotAnObject,
        ))),
    }
}

/// Validate an ordered batch of raw records.
///
/// Every record is checked. If any fails, the whole batch is rejected and
/// the violations of all failing records are returned, tagged with their
/// position.
pub fn validate_batch(raw: &Value) -> Result<Vec<CustomerFeatures>, ValidationErrors> {
    let records = match raw {
        Value::Array(records) => records,
        _ => {
            return Err(ValidationErrors::single(FieldViolation::record(
                ViolationKind::NotAList,
            )))
        }
    };

    let mut features = Vec::with_capacity(records.len());
    let mut violations = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match validate_record(record) {
            Ok(valid) => features.push(valid),
            Err(errors) => violations.extend(
                errors
                    .into_violations()
                    .into_iter()
                    .map(|v| v.at_index(index)),
            ),
        }
    }

    if violations.is_empty() {
        Ok(features)
    } else {
        Err(ValidationErrors { violations })
    }
}
