//! Visibility filter
//!
//! Selects which candidates are drawn this scan. Runs over the full live
//! population on every update frame, so per candidate it does no heap
//! allocation; checks run cheapest first:
//!
//! 1. range: squared distance against `(sight_radius + radius)²`
//! 2. exclusion rules, in order, stopping at the first match
//!
//! Survivors keep their source order. Accumulation stops at the limit.

use super::contact::{Contact, Relationship, RelationshipMask};
use super::frame::RadarFrame;
use super::transform::is_on_radar;
use crate::config::RadarSettings;
use std::collections::HashSet;

/// A reason to leave a contact off the radar
pub trait ExclusionRule<C> {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Whether `contact` must be excluded this scan
    fn excludes(&self, contact: &C, frame: &RadarFrame) -> bool;
}

/// Exclusion rule backed by a closure
pub struct FnRule<F> {
    name: String,
    predicate: F,
}

impl<F> FnRule<F> {
    /// Wrap `predicate`; it returns `true` to exclude
    pub fn new(name: impl Into<String>, predicate: F) -> Self {
        Self {
            name: name.into(),
            predicate,
        }
    }
}

impl<C, F> ExclusionRule<C> for FnRule<F>
where
    F: Fn(&C, &RadarFrame) -> bool,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn excludes(&self, contact: &C, frame: &RadarFrame) -> bool {
        (self.predicate)(contact, frame)
    }
}

/// Hides contacts the viewer cannot see
#[derive(Debug, Clone, Copy)]
pub struct FogOfWarRule {
    enabled: bool,
}

impl FogOfWarRule {
    /// Create the rule; a disabled rule excludes nothing
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl<C: Contact> ExclusionRule<C> for FogOfWarRule {
    fn name(&self) -> &str {
        "fog_of_war"
    }

    fn excludes(&self, contact: &C, _frame: &RadarFrame) -> bool {
        self.enabled && !contact.is_visible()
    }
}

/// Hides contacts by entity kind id or id prefix
#[derive(Debug, Clone, Default)]
pub struct ExcludedTypesRule {
    ids: HashSet<String>,
    prefixes: Vec<String>,
}

impl ExcludedTypesRule {
    /// Create the rule from exact ids and prefixes
    pub fn new<I, P>(ids: I, prefixes: P) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Create the rule from the settings exclusion lists
    pub fn from_settings(settings: &RadarSettings) -> Self {
        Self::new(settings.excluded_types.iter().cloned(), settings.excluded_prefixes.iter().cloned())
    }

    /// Whether the rule can never match
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.prefixes.is_empty()
    }

    /// Whether `kind_id` is excluded
    pub fn matches(&self, kind_id: &str) -> bool {
        self.ids.contains(kind_id) || self.prefixes.iter().any(|prefix| kind_id.starts_with(prefix.as_str()))
    }
}

impl<C: Contact> ExclusionRule<C> for ExcludedTypesRule {
    fn name(&self) -> &str {
        "excluded_types"
    }

    fn excludes(&self, contact: &C, _frame: &RadarFrame) -> bool {
        self.matches(contact.kind_id())
    }
}

/// Shows only the relationships in a mask
#[derive(Debug, Clone, Copy)]
pub struct RelationshipRule {
    shown: RelationshipMask,
}

impl RelationshipRule {
    /// Create a rule showing only `shown`
    pub fn new(shown: RelationshipMask) -> Self {
        Self { shown }
    }

    /// Create a rule hiding a single relationship
    pub fn hiding(relationship: Relationship) -> Self {
        Self::new(RelationshipMask::all() - relationship.mask())
    }
}

impl<C: Contact> ExclusionRule<C> for RelationshipRule {
    fn name(&self) -> &str {
        "relationship"
    }

    fn excludes(&self, contact: &C, _frame: &RadarFrame) -> bool {
        !self.shown.includes(contact.relationship())
    }
}

/// Rules derived from settings, cheapest first
///
/// Rules that cannot match with the given settings are left out.
pub fn settings_rules<C: Contact>(settings: &RadarSettings) -> Vec<Box<dyn ExclusionRule<C>>> {
    let mut rules: Vec<Box<dyn ExclusionRule<C>>> = Vec::new();
    if settings.fog_of_war {
        rules.push(Box::new(FogOfWarRule::new(true)));
    }
    let excluded = ExcludedTypesRule::from_settings(settings);
    if !excluded.is_empty() {
        rules.push(Box::new(excluded));
    }
    rules
}

/// Map the "negative means unbounded" count convention to a limit
pub fn limit_from_signed(max_count: i64) -> Option<usize> {
    usize::try_from(max_count).ok()
}

/// Counters from one filter pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    /// Candidates examined
    pub scanned: usize,
    /// Candidates rejected by the range check
    pub out_of_range: usize,
    /// Candidates rejected by an exclusion rule
    pub excluded: usize,
    /// Candidates accepted
    pub accepted: usize,
    /// Whether the limit stopped the scan before every candidate was examined
    pub truncated: bool,
}

fn scan<'a, C, F>(
    candidates: &'a [C],
    limit: Option<usize>,
    frame: &RadarFrame,
    rules: &[Box<dyn ExclusionRule<C>>],
    mut accept: F,
) -> FilterStats
where
    C: Contact,
    F: FnMut(usize, &'a C),
{
    let mut stats = FilterStats::default();

    for (index, contact) in candidates.iter().enumerate() {
        if limit.is_some_and(|max| stats.accepted >= max) {
            stats.truncated = true;
            break;
        }
        stats.scanned += 1;

        if !is_on_radar(&contact.position(), contact.radius().max(0.0), frame) {
            stats.out_of_range += 1;
            continue;
        }
        if rules.iter().any(|rule| rule.excludes(contact, frame)) {
            stats.excluded += 1;
            continue;
        }

        accept(index, contact);
        stats.accepted += 1;
    }

    stats
}

/// Filter `candidates` into `out`, keeping their relative order
///
/// `out` is cleared first. `limit` of `None` means unbounded.
pub fn filter<'a, C: Contact>(
    candidates: &'a [C],
    limit: Option<usize>,
    frame: &RadarFrame,
    rules: &[Box<dyn ExclusionRule<C>>],
    out: &mut Vec<&'a C>,
) -> FilterStats {
    out.clear();
    scan(candidates, limit, frame, rules, |_, contact| out.push(contact))
}

/// Same as [`filter`], recording indices into `candidates` instead of references
///
/// Lets long-lived owners keep a reusable buffer across ticks whose
/// candidate slices have different lifetimes.
pub fn filter_indices<C: Contact>(
    candidates: &[C],
    limit: Option<usize>,
    frame: &RadarFrame,
    rules: &[Box<dyn ExclusionRule<C>>],
    out: &mut Vec<usize>,
) -> FilterStats {
    out.clear();
    scan(candidates, limit, frame, rules, |index, _| out.push(index))
}
