//! Verdict tree: rule → entity → check → network → audit
//!
//! Every level is assembled bottom-up and is not mutated once built. Summary
//! flags are derived at construction time and live next to, never inside,
//! the per-entity maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ChannelWidth;

// ============================================================================
// Rule
// ============================================================================

/// Value observed while applying a rule, kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservedValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for ObservedValue {
    fn from(v: i64) -> Self {
        ObservedValue::Integer(v)
    }
}

impl From<f64> for ObservedValue {
    fn from(v: f64) -> Self {
        ObservedValue::Float(v)
    }
}

impl From<ChannelWidth> for ObservedValue {
    fn from(width: ChannelWidth) -> Self {
        match width {
            ChannelWidth::Auto => ObservedValue::Text("auto".to_string()),
            ChannelWidth::Fixed(mhz) => ObservedValue::Integer(i64::from(mhz)),
        }
    }
}

impl fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedValue::Integer(v) => write!(f, "{v}"),
            ObservedValue::Float(v) => write!(f, "{v:.2}"),
            ObservedValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Outcome of one rule applied to one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleVerdict {
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<ObservedValue>,
}

impl RuleVerdict {
    pub fn pass(observed: Option<ObservedValue>) -> Self {
        Self {
            passed: true,
            observed,
        }
    }

    pub fn fail(observed: Option<ObservedValue>) -> Self {
        Self {
            passed: false,
            observed,
        }
    }

    /// Pass unless `failed` is set.
    pub fn unless(failed: bool, observed: Option<ObservedValue>) -> Self {
        if failed {
            Self::fail(observed)
        } else {
            Self::pass(observed)
        }
    }
}

// ============================================================================
// Entity
// ============================================================================

/// All rule outcomes for one AP or RF profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityVerdict {
    passed: bool,
    rules: BTreeMap<String, RuleVerdict>,
}

impl EntityVerdict {
    /// Build from named rule outcomes; `passed` is the AND of all of them.
    pub fn from_rules<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, RuleVerdict)>,
        K: Into<String>,
    {
        let rules: BTreeMap<String, RuleVerdict> =
            rules.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let passed = rules.values().all(|r| r.passed);
        Self { passed, rules }
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn rule(&self, name: &str) -> Option<&RuleVerdict> {
        self.rules.get(name)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &RuleVerdict)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ============================================================================
// Check
// ============================================================================

/// Names of the checks a network can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    #[serde(rename = "channel_utilization_check")]
    ChannelUtilization,
    #[serde(rename = "rf_profiles_check")]
    RfProfiles,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::ChannelUtilization => "channel_utilization_check",
            CheckKind::RfProfiles => "rf_profiles_check",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one check over every entity of a network.
///
/// `passed` is the AND across entities, so an empty report passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    passed: bool,
    entities: BTreeMap<String, EntityVerdict>,
}

impl Default for CheckReport {
    fn default() -> Self {
        Self {
            passed: true,
            entities: BTreeMap::new(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, EntityVerdict)> for CheckReport {
    fn from_iter<I: IntoIterator<Item = (K, EntityVerdict)>>(iter: I) -> Self {
        let entities: BTreeMap<String, EntityVerdict> =
            iter.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let passed = entities.values().all(EntityVerdict::passed);
        Self { passed, entities }
    }
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn entity(&self, name: &str) -> Option<&EntityVerdict> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = (&str, &EntityVerdict)> {
        self.entities.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.entities.values().filter(|e| !e.passed()).count()
    }
}

// ============================================================================
// Network & Audit
// ============================================================================

/// Check reports attached to one network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkReport {
    checks: BTreeMap<CheckKind, CheckReport>,
}

impl NetworkReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: CheckKind, report: CheckReport) {
        self.checks.insert(kind, report);
    }

    pub fn check(&self, kind: CheckKind) -> Option<&CheckReport> {
        self.checks.get(&kind)
    }

    pub fn checks(&self) -> impl Iterator<Item = (CheckKind, &CheckReport)> {
        self.checks.iter().map(|(k, v)| (*k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    pub fn passed(&self) -> bool {
        self.checks.values().all(CheckReport::passed)
    }
}

/// Final audit keyed by network name.
///
/// Networks whose report set is empty are dropped on construction, so an
/// `AuditResult` never carries an empty [`NetworkReport`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditResult {
    networks: BTreeMap<String, NetworkReport>,
}

impl<K: Into<String>> FromIterator<(K, NetworkReport)> for AuditResult {
    fn from_iter<I: IntoIterator<Item = (K, NetworkReport)>>(iter: I) -> Self {
        let networks = iter
            .into_iter()
            .filter(|(_, report)| !report.is_empty())
            .map(|(k, v)| (k.into(), v))
            .collect();
        Self { networks }
    }
}

impl AuditResult {
    pub fn network(&self, name: &str) -> Option<&NetworkReport> {
        self.networks.get(name)
    }

    pub fn networks(&self) -> impl Iterator<Item = (&str, &NetworkReport)> {
        self.networks.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    pub fn passed(&self) -> bool {
        self.networks.values().all(NetworkReport::passed)
    }

    pub fn summary(&self) -> AuditSummary {
        let mut summary = AuditSummary {
            networks: self.networks.len(),
            ..AuditSummary::default()
        };
        for report in self.networks.values() {
            if !report.passed() {
                summary.networks_failed += 1;
            }
            for (_, check) in report.checks() {
                summary.entities += check.len();
                summary.entities_failed += check.failed_count();
            }
        }
        summary
    }
}

/// Headline counts for the end-of-run summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub networks: usize,
    pub networks_failed: usize,
    pub entities: usize,
    pub entities_failed: usize,
}
