//! Customer feature record and its fixed-order numeric encoding

use std::ops::Index;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::validation::{validate_record, ValidationErrors};

/// Number of features the classifier expects
pub const FEATURE_COUNT: usize = 10;

pub const CREDIT_SCORE: usize = 0;
pub const GEOGRAPHY_GERMANY: usize = 8;
pub const GEOGRAPHY_SPAIN: usize = 9;

/// JSON type a field must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Float,
}

/// Name, type and inclusive bounds of one input field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub field_type: FieldType,
    pub min: f64,
    pub max: Option<f64>,
}

impl FieldRule {
    const fn integer(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            field_type: FieldType::Integer,
            min,
            max: Some(max),
        }
    }

    const fn non_negative_float(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Float,
            min: 0.0,
            max: None,
        }
    }
}

/// Field rules in training-time feature order.
pub const FIELD_RULES: [FieldRule; FEATURE_COUNT] = [
    FieldRule::integer("CreditScore", 300.0, 850.0),
    FieldRule::integer("Age", 18.0, 100.0),
    FieldRule::integer("Tenure", 0.0, 10.0),
    FieldRule::non_negative_float("Balance"),
    FieldRule::integer("NumOfProducts", 1.0, 4.0),
    FieldRule::integer("HasCrCard", 0.0, 1.0),
    FieldRule::integer("IsActiveMember", 0.0, 1.0),
    FieldRule::non_negative_float("EstimatedSalary"),
    FieldRule::integer("Geography_Germany", 0.0, 1.0),
    FieldRule::integer("Geography_Spain", 0.0, 1.0),
];

/// Feature names in the order the classifier consumes them
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    FIELD_RULES.map(|rule| rule.name)
}

/// Fixed-order numeric encoding of a customer record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn credit_score(&self) -> f64 {
        self.0[CREDIT_SCORE]
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// A validated customer record.
///
/// Instances only come out of [`validate_record`], so every value held here
/// satisfies the field bounds and the geography exclusion rule. Deserializing
/// goes through the same validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct CustomerFeatures {
    #[serde(rename = "CreditScore")]
    credit_score: u16,
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Tenure")]
    tenure: u8,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "NumOfProducts")]
    num_of_products: u8,
    #[serde(rename = "HasCrCard")]
    has_cr_card: u8,
    #[serde(rename = "IsActiveMember")]
    is_active_member: u8,
    #[serde(rename = "EstimatedSalary")]
    estimated_salary: f64,
    #[serde(rename = "Geography_Germany")]
    geography_germany: u8,
    #[serde(rename = "Geography_Spain")]
    geography_spain: u8,
}

impl CustomerFeatures {
    /// Build from values already checked against [`FIELD_RULES`].
    pub(super) fn from_checked(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            credit_score: values[0] as u16,
            age: values[1] as u8,
            tenure: values[2] as u8,
            balance: values[3],
            num_of_products: values[4] as u8,
            has_cr_card: values[5] as u8,
            is_active_member: values[6] as u8,
            estimated_salary: values[7],
            geography_germany: values[8] as u8,
            geography_spain: values[9] as u8,
        }
    }

    pub fn credit_score(&self) -> u16 {
        self.credit_score
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn tenure(&self) -> u8 {
        self.tenure
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn num_of_products(&self) -> u8 {
        self.num_of_products
    }

    pub fn has_cr_card(&self) -> bool {
        self.has_cr_card == 1
    }

    pub fn is_active_member(&self) -> bool {
        self.is_active_member == 1
    }

    pub fn estimated_salary(&self) -> f64 {
        self.estimated_salary
    }

    pub fn geography_germany(&self) -> bool {
        self.geography_germany == 1
    }

    pub fn geography_spain(&self) -> bool {
        self.geography_spain == 1
    }

    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector([
            f64::from(self.credit_score),
            f64::from(self.age),
            f64::from(self.tenure),
            self.balance,
            f64::from(self.num_of_products),
            f64::from(self.has_cr_card),
            f64::from(self.is_active_member),
            self.estimated_salary,
            f64::from(self.geography_germany),
            f64::from(self.geography_spain),
        ])
    }
}

impl TryFrom<Value> for CustomerFeatures {
    type Error = ValidationErrors;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate_record(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "CreditScore": 700,
            "Age": 35,
            "Tenure": 5,
            "Balance": 50000.0,
            "NumOfProducts": 2,
            "HasCrCard": 1,
            "IsActiveMember": 1,
            "EstimatedSalary": 70000.0,
            "Geography_Germany": 0,
            "Geography_Spain": 1
        })
    }

    #[test]
    fn test_feature_order() {
        assert_eq!(
            feature_names(),
            [
                "CreditScore",
                "Age",
                "Tenure",
                "Balance",
                "NumOfProducts",
                "HasCrCard",
                "IsActiveMember",
                "EstimatedSalary",
                "Geography_Germany",
                "Geography_Spain",
            ]
        );
        assert_eq!(FIELD_RULES[CREDIT_SCORE].name, "CreditScore");
        assert_eq!(FIELD_RULES[GEOGRAPHY_GERMANY].name, "Geography_Germany");
        assert_eq!(FIELD_RULES[GEOGRAPHY_SPAIN].name, "Geography_Spain");
    }

    #[test]
    fn test_feature_vector_preserves_order() {
        let features = validate_record(&sample()).unwrap();
        let vector = features.to_feature_vector();

        assert_eq!(
            vector.as_slice(),
            &[700.0, 35.0, 5.0, 50000.0, 2.0, 1.0, 1.0, 70000.0, 0.0, 1.0]
        );
        assert_eq!(vector.credit_score(), 700.0);
        assert_eq!(vector[GEOGRAPHY_SPAIN], 1.0);
    }

    #[test]
    fn test_accessors() {
        let features = validate_record(&sample()).unwrap();

        assert_eq!(features.credit_score(), 700);
        assert_eq!(features.age(), 35);
        assert_eq!(features.tenure(), 5);
        assert_eq!(features.balance(), 50000.0);
        assert_eq!(features.num_of_products(), 2);
        assert!(features.has_cr_card());
        assert!(features.is_active_member());
        assert_eq!(features.estimated_salary(), 70000.0);
        assert!(!features.geography_germany());
        assert!(features.geography_spain());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let features: CustomerFeatures = serde_json::from_value(sample()).unwrap();
        assert_eq!(features.credit_score(), 700);

        let mut invalid = sample();
        invalid["CreditScore"] = json!(150);
        let result: Result<CustomerFeatures, _> = serde_json::from_value(invalid);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("CreditScore"));
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let features = validate_record(&sample()).unwrap();
        let json = serde_json::to_value(&features).unwrap();

        assert_eq!(json["CreditScore"], 700);
        assert_eq!(json["Geography_Spain"], 1);
        assert_eq!(json["Balance"], 50000.0);
    }
}
