//! Decision tree and random forest estimators
//!
//! Trees are stored as a flat node array with the root at index 0. Child
//! indices always point forward, which [`DecisionTree::validate`] checks at
//! load time so traversal terminates and never indexes out of range.

use loanwise_core::{Error, FeatureRow, Result};
use serde::{Deserialize, Serialize};

/// A tree node: either an internal split or a leaf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Go left when `row[feature] <= threshold`, right otherwise
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

/// Single binary decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Check node references and leaf classes
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.nodes.is_empty() {
            return Err("decision tree has no nodes".to_string());
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {} splits on feature {} but the model has {} features",
                            idx, feature, n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {} has a non-finite threshold", idx));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(format!(
                                "node {} points to invalid child {}",
                                idx, child
                            ));
                        }
                    }
                }
                Node::Leaf { class } => {
                    if !matches!(class, 0 | 1) {
                        return Err(format!("leaf {} has class {}, expected 0 or 1", idx, class));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn predict(&self, row: &FeatureRow) -> Result<i64> {
        let mut idx = 0;
        loop {
            let node = self
                .nodes
                .get(idx)
                .ok_or_else(|| Error::prediction(format!("tree node {} does not exist", idx)))?;

            match node {
                Node::Leaf { class } => return Ok(*class),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature)?;
                    let next = if value <= *threshold { *left } else { *right };
                    if next <= idx {
                        return Err(Error::prediction(format!(
                            "tree node {} points backwards to {}",
                            idx, next
                        )));
                    }
                    idx = next;
                }
            }
        }
    }
}

/// Majority vote over decision trees; ties go to class 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn validate(&self, n_features: usize) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(n_features)
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    pub fn predict(&self, row: &FeatureRow) -> Result<i64> {
        let mut positive = 0usize;
        for tree in &self.trees {
            if tree.predict(row)? == 1 {
                positive += 1;
            }
        }
        Ok(if positive * 2 > self.trees.len() { 1 } else { 0 })
    }
}
