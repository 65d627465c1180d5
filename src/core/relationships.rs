//! Derived relationships between consecutive events.
//!
//! [`RelationshipEngine`] reads an event slice and computes per-event
//! features on demand: time gaps to the neighbours, neighbouring authors and
//! turn ids. Each feature is computed at most once per engine and kept in a
//! side table keyed by [`Feature`]; events are never modified.
//!
//! # Turns
//!
//! Event `i` joins the turn of event `i + 1` when both are authored messages,
//! they share an author, and the gap between them is at most the threshold
//! (one minute by default). Turn ids start at 0 and never decrease. A system
//! notice always has a turn of its own.
//!
//! ```rust
//! use chatturns::core::RelationshipEngine;
//! use chatturns::parser::TranscriptParser;
//!
//! let chat = "\
//! 15/01/2024, 10:30 - Alice: Hi
//! 15/01/2024, 10:31 - Alice: you there?
//! 15/01/2024, 10:35 - Bob: yes
//! ";
//! let events = TranscriptParser::new().parse_str(chat);
//! let mut engine = RelationshipEngine::new(&events);
//!
//! assert_eq!(engine.group_ids(), &[0, 0, 1]);
//! ```
//!
//! `TimeToNext` and `NextAuthor` (and therefore `GroupId`) look at the
//! following event. Models meant to run on a live chat must not train on them.

use std::collections::HashMap;
use std::fmt;

use chrono::Duration;

use crate::ChatEvent;
use crate::config::{DEFAULT_GROUP_THRESHOLD_SECS, TranscriptConfig};
use crate::core::models::{ChatGroup, EnrichedEvent};
use crate::core::processor::merge_groups;
use crate::error::{ChatturnsError, Result};

/// Named per-event features the engine can derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    /// `timestamp[i] - timestamp[i - 1]`; `None` for the first event
    TimeSincePrevious,
    /// `timestamp[i + 1] - timestamp[i]`; `None` for the last event
    TimeToNext,
    /// Author of event `i - 1`
    PreviousAuthor,
    /// Author of event `i + 1`
    NextAuthor,
    /// Turn id
    GroupId,
}

impl Feature {
    /// Returns all features in computation-friendly order.
    pub fn all() -> &'static [Feature] {
        &[
            Feature::TimeSincePrevious,
            Feature::TimeToNext,
            Feature::PreviousAuthor,
            Feature::NextAuthor,
            Feature::GroupId,
        ]
    }

    /// Column name used in exported tables.
    pub fn name(self) -> &'static str {
        match self {
            Feature::TimeSincePrevious => "time_since_previous",
            Feature::TimeToNext => "time_to_next",
            Feature::PreviousAuthor => "previous_author",
            Feature::NextAuthor => "next_author",
            Feature::GroupId => "group_id",
        }
    }

    /// Features that must be computed before this one.
    pub fn dependencies(self) -> &'static [Feature] {
        match self {
            Feature::GroupId => &[Feature::NextAuthor, Feature::TimeToNext],
            _ => &[],
        }
    }

    /// Returns `true` if the value depends on events after the current one.
    pub fn leaks_future(self) -> bool {
        matches!(
            self,
            Feature::TimeToNext | Feature::NextAuthor | Feature::GroupId
        )
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One computed feature, indexed by event ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureColumn {
    Gap(Vec<Option<Duration>>),
    Author(Vec<Option<String>>),
    Group(Vec<usize>),
}

impl FeatureColumn {
    pub fn len(&self) -> usize {
        match self {
            FeatureColumn::Gap(v) => v.len(),
            FeatureColumn::Author(v) => v.len(),
            FeatureColumn::Group(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// Pure feature computations
// ============================================================================

fn compute_time_since_previous(events: &[ChatEvent]) -> Vec<Option<Duration>> {
    let mut gaps = Vec::with_capacity(events.len());
    if !events.is_empty() {
        gaps.push(None);
    }
    gaps.extend(
        events
            .windows(2)
            .map(|pair| Some(pair[1].timestamp() - pair[0].timestamp())),
    );
    gaps
}

fn compute_time_to_next(events: &[ChatEvent]) -> Vec<Option<Duration>> {
    let mut gaps: Vec<_> = events
        .windows(2)
        .map(|pair| Some(pair[1].timestamp() - pair[0].timestamp()))
        .collect();
    if !events.is_empty() {
        gaps.push(None);
    }
    gaps
}

fn compute_previous_author(events: &[ChatEvent]) -> Vec<Option<String>> {
    (0..events.len())
        .map(|i| {
            i.checked_sub(1)
                .map(|prev| events[prev].author_str().to_string())
        })
        .collect()
}

fn compute_next_author(events: &[ChatEvent]) -> Vec<Option<String>> {
    (0..events.len())
        .map(|i| events.get(i + 1).map(|next| next.author_str().to_string()))
        .collect()
}

/// Whether event `i` continues into event `i + 1`. Always `false` for the
/// last event.
fn compute_joinable(
    events: &[ChatEvent],
    next_author: &[Option<String>],
    time_to_next: &[Option<Duration>],
    threshold: Duration,
) -> Vec<bool> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let (Some(next), Some(gap), Some(next_event)) =
                (&next_author[i], time_to_next[i], events.get(i + 1))
            else {
                return false;
            };
            !event.is_event()
                && !next_event.is_event()
                && event.author_str() == next.as_str()
                && gap <= threshold
        })
        .collect()
}

/// One forward pass: every event takes the current id, which advances
/// whenever the event does not continue into the next one.
fn compute_group_ids(joinable: &[bool]) -> Vec<usize> {
    let mut group_id = 0;
    let mut ids = Vec::with_capacity(joinable.len());

    for &joins_next in joinable {
        ids.push(group_id);
        if !joins_next {
            group_id += 1;
        }
    }

    ids
}

// ============================================================================
// Engine
// ============================================================================

/// Lazily computed, memoized relationship features over an event slice.
///
/// One engine serves one transcript. It holds local mutable cache state and
/// is meant for single-owner use.
#[derive(Debug, Clone)]
pub struct RelationshipEngine<'a> {
    events: &'a [ChatEvent],
    threshold: Duration,
    cache: HashMap<Feature, FeatureColumn>,
}

impl<'a> RelationshipEngine<'a> {
    /// Creates an engine with the default one-minute grouping threshold.
    pub fn new(events: &'a [ChatEvent]) -> Self {
        Self {
            events,
            threshold: Duration::seconds(DEFAULT_GROUP_THRESHOLD_SECS),
            cache: HashMap::new(),
        }
    }

    /// Creates an engine with a custom grouping threshold.
    pub fn with_threshold(events: &'a [ChatEvent], threshold: Duration) -> Result<Self> {
        if threshold < Duration::zero() {
            return Err(ChatturnsError::invalid_threshold(threshold.num_seconds()));
        }
        Ok(Self {
            threshold,
            ..Self::new(events)
        })
    }

    /// Creates an engine using the threshold from a transcript configuration.
    pub fn from_config(events: &'a [ChatEvent], config: &TranscriptConfig) -> Result<Self> {
        Self::with_threshold(events, config.group_threshold()?)
    }

    pub fn events(&self) -> &'a [ChatEvent] {
        self.events
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Returns `true` if the feature has already been computed.
    pub fn is_cached(&self, feature: Feature) -> bool {
        self.cache.contains_key(&feature)
    }

    /// Returns a feature column, computing it and its dependencies if needed.
    pub fn feature(&mut self, feature: Feature) -> &FeatureColumn {
        if !self.cache.contains_key(&feature) {
            for &dependency in feature.dependencies() {
                self.feature(dependency);
            }
            tracing::trace!(feature = %feature, events = self.events.len(), "computing feature");
            let column = self.compute(feature);
            self.cache.insert(feature, column);
        }
        &self.cache[&feature]
    }

    fn compute(&self, feature: Feature) -> FeatureColumn {
        match feature {
            Feature::TimeSincePrevious => {
                FeatureColumn::Gap(compute_time_since_previous(self.events))
            }
            Feature::TimeToNext => FeatureColumn::Gap(compute_time_to_next(self.events)),
            Feature::PreviousAuthor => FeatureColumn::Author(compute_previous_author(self.events)),
            Feature::NextAuthor => FeatureColumn::Author(compute_next_author(self.events)),
            Feature::GroupId => {
                let joinable = compute_joinable(
                    self.events,
                    self.cached_authors(Feature::NextAuthor),
                    self.cached_gaps(Feature::TimeToNext),
                    self.threshold,
                );
                FeatureColumn::Group(compute_group_ids(&joinable))
            }
        }
    }

    fn cached_gaps(&self, feature: Feature) -> &[Option<Duration>] {
        match self.cache.get(&feature) {
            Some(FeatureColumn::Gap(gaps)) => gaps,
            other => unreachable!("{feature} is not a computed gap column: {other:?}"),
        }
    }

    fn cached_authors(&self, feature: Feature) -> &[Option<String>] {
        match self.cache.get(&feature) {
            Some(FeatureColumn::Author(authors)) => authors,
            other => unreachable!("{feature} is not a computed author column: {other:?}"),
        }
    }

    fn gaps(&mut self, feature: Feature) -> &[Option<Duration>] {
        self.feature(feature);
        self.cached_gaps(feature)
    }

    fn authors(&mut self, feature: Feature) -> &[Option<String>] {
        self.feature(feature);
        self.cached_authors(feature)
    }

    pub fn time_since_previous(&mut self) -> &[Option<Duration>] {
        self.gaps(Feature::TimeSincePrevious)
    }

    /// Gap to the next event. Looks ahead.
    pub fn time_to_next(&mut self) -> &[Option<Duration>] {
        self.gaps(Feature::TimeToNext)
    }

    pub fn previous_author(&mut self) -> &[Option<String>] {
        self.authors(Feature::PreviousAuthor)
    }

    /// Author of the next event. Looks ahead.
    pub fn next_author(&mut self) -> &[Option<String>] {
        self.authors(Feature::NextAuthor)
    }

    /// Turn id per event, non-decreasing in source order.
    pub fn group_ids(&mut self) -> &[usize] {
        match self.feature(Feature::GroupId) {
            FeatureColumn::Group(ids) => ids,
            other => unreachable!("group_id is not a group column: {other:?}"),
        }
    }

    /// Collapses every turn into one [`ChatGroup`].
    pub fn merged_groups(&mut self) -> Vec<ChatGroup> {
        let events = self.events;
        merge_groups(events, self.group_ids())
    }

    /// Materializes every feature and returns one row per event.
    pub fn enriched(&mut self) -> Vec<EnrichedEvent> {
        for &feature in Feature::all() {
            self.feature(feature);
        }

        let since = self.cached_gaps(Feature::TimeSincePrevious);
        let to_next = self.cached_gaps(Feature::TimeToNext);
        let previous = self.cached_authors(Feature::PreviousAuthor);
        let next = self.cached_authors(Feature::NextAuthor);
        let groups = match self.cache.get(&Feature::GroupId) {
            Some(FeatureColumn::Group(ids)) => ids.as_slice(),
            other => unreachable!("group_id is not a group column: {other:?}"),
        };

        self.events
            .iter()
            .enumerate()
            .map(|(i, event)| EnrichedEvent {
                ordinal: event.ordinal(),
                timestamp: event.timestamp(),
                author: event.author_str().to_string(),
                is_event: event.is_event(),
                content: event.content().to_string(),
                time_since_previous_secs: since[i].map(|gap| gap.num_seconds()),
                time_to_next_secs: to_next[i].map(|gap| gap.num_seconds()),
                previous_author: previous[i].clone(),
                next_author: next[i].clone(),
                group_id: groups[i],
            })
            .collect()
    }
}
