//! Random forest classifier over axis-aligned decision trees

use serde::{Deserialize, Serialize};

use crate::domain::{ChurnClassifier, DomainError, FeatureVector, FEATURE_COUNT};

/// Tree node: a split sends `x[feature] <= threshold` left, otherwise right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Churn probability at this leaf
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point strictly forward so every walk reaches a leaf.
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!("node {} splits on unknown feature {}", index, feature));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", index));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!(
                                "node {} has invalid child index {}",
                                index, child
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !(0.0..=1.0).contains(value) {
                        return Err(format!("leaf {} value {} outside [0, 1]", index, value));
                    }
                }
            }
        }

        Ok(())
    }

    fn leaf_value(&self, features: &FeatureVector) -> f64 {
        let mut index = 0;

        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Mean of the leaf probabilities over all trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }

        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| format!("tree {}: {}", index, e))?;
        }

        Ok(())
    }
}

impl ChurnClassifier for RandomForest {
    fn predict_proba(&self, features: &FeatureVector) -> Result<f64, DomainError> {
        if self.trees.is_empty() {
            return Err(DomainError::inference("random forest has no trees"));
        }

        let total: f64 = self.trees.iter().map(|t| t.leaf_value(features)).sum();

        Ok(total / self.trees.len() as f64)
    }
}
