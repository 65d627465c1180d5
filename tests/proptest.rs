//! Property-based tests for chatturns.
//!
//! These tests generate random transcripts to find edge cases.

use proptest::prelude::*;

use chatturns::ChatEvent;
use chatturns::core::{RelationshipEngine, TranscriptStats, merge_groups};
use chatturns::parser::TranscriptParser;
use chatturns::parsing::{segment_transcript, strip_fixed_prefix};
use chrono::Duration;

/// One export line: either an authored message or a system notice.
#[derive(Debug, Clone)]
enum Line {
    Message {
        minute: u32,
        author: &'static str,
        text: &'static str,
    },
    Notice {
        minute: u32,
        text: &'static str,
    },
}

impl Line {
    fn render(&self) -> String {
        match self {
            Line::Message {
                minute,
                author,
                text,
            } => format!("15/01/2024, 10:{minute:02} - {author}: {text}\n"),
            Line::Notice { minute, text } => format!("15/01/2024, 10:{minute:02} - {text}\n"),
        }
    }

    fn is_notice(&self) -> bool {
        matches!(self, Line::Notice { .. })
    }
}

/// Generate a random line using fast strategies (no regex!)
fn arb_line() -> impl Strategy<Value = Line> {
    let message = (
        0u32..60,
        prop::sample::select(vec!["Alice", "Bob", "Иван", "User 123", "+44 7700 900123"]),
        prop::sample::select(vec![
            "Hello",
            "How are you?",
            "",
            "time is 10:30: late",
            "she said \"ok: fine\"",
            "<Media omitted>",
            "line one\nline two",
            "Привет мир",
            "🎉🔥 party",
            "@1234 look",
        ]),
    )
        .prop_map(|(minute, author, text)| Line::Message {
            minute,
            author,
            text,
        });

    let notice = (
        0u32..60,
        prop::sample::select(vec![
            "Messages and calls are end-to-end encrypted",
            "Alice added Bob",
            "Bob left",
            "Tom changed the subject from \"x\" to \"x: y\"",
        ]),
    )
        .prop_map(|(minute, text)| Line::Notice { minute, text });

    prop_oneof![4 => message, 1 => notice]
}

/// Generate a transcript as its rendered text plus the lines it came from.
fn arb_transcript(max_len: usize) -> impl Strategy<Value = (String, Vec<Line>)> {
    prop::collection::vec(arb_line(), 0..max_len)
        .prop_map(|lines| (lines.iter().map(Line::render).collect::<String>(), lines))
}

fn parse(text: &str) -> Vec<ChatEvent> {
    TranscriptParser::new().parse_str(text)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARSER PROPERTIES
    // ============================================

    /// One event per timestamp segment
    #[test]
    fn event_count_matches_segments((text, lines) in arb_transcript(30)) {
        let events = parse(&text);
        prop_assert_eq!(events.len(), segment_transcript(&text).len());
        prop_assert_eq!(events.len(), lines.len());
    }

    /// Ordinals are dense and start at zero
    #[test]
    fn ordinals_are_dense((text, _) in arb_transcript(30)) {
        let events = parse(&text);
        for (i, event) in events.iter().enumerate() {
            prop_assert_eq!(event.ordinal(), i);
        }
    }

    /// Notices never carry an author
    #[test]
    fn notices_have_empty_author((text, _) in arb_transcript(30)) {
        for event in parse(&text) {
            if event.is_event() {
                prop_assert_eq!(event.author_str(), "");
                prop_assert!(event.author().is_none());
            }
        }
    }

    /// Classification follows the line kind
    #[test]
    fn classification_matches_source((text, lines) in arb_transcript(30)) {
        let events = parse(&text);
        for (event, line) in events.iter().zip(&lines) {
            prop_assert_eq!(event.is_event(), line.is_notice());
        }
    }

    /// Normalized fields never keep a raw line break
    #[test]
    fn fields_have_no_newlines((text, _) in arb_transcript(30)) {
        for event in parse(&text) {
            prop_assert!(!event.content().contains('\n'));
            prop_assert!(!event.author_str().contains('\n'));
        }
    }

    /// Parsing is deterministic
    #[test]
    fn parse_is_deterministic((text, _) in arb_transcript(20)) {
        prop_assert_eq!(parse(&text), parse(&text));
    }

    // ============================================
    // NORMALIZER PROPERTIES
    // ============================================

    /// Prefix strip removes exactly `count` characters
    #[test]
    fn strip_removes_exact_char_count(s in "\\PC{0,20}", count in 0usize..5) {
        let stripped = strip_fixed_prefix(&s, count);
        let expected = s.chars().count().saturating_sub(count);
        prop_assert_eq!(stripped.chars().count(), expected);
        prop_assert!(s.ends_with(stripped));
    }

    // ============================================
    // GROUPING PROPERTIES
    // ============================================

    /// One group id per event, starting at zero, never decreasing
    #[test]
    fn group_ids_non_decreasing((text, _) in arb_transcript(30)) {
        let events = parse(&text);
        let mut engine = RelationshipEngine::new(&events);
        let ids = engine.group_ids();

        prop_assert_eq!(ids.len(), events.len());
        if let Some(&first) = ids.first() {
            prop_assert_eq!(first, 0);
        }
        for pair in ids.windows(2) {
            prop_assert!(pair[1] == pair[0] || pair[1] == pair[0] + 1);
        }
    }

    /// A notice is always alone in its group
    #[test]
    fn notices_are_isolated((text, _) in arb_transcript(30)) {
        let events = parse(&text);
        let mut engine = RelationshipEngine::new(&events);
        let ids = engine.group_ids().to_vec();

        for (i, event) in events.iter().enumerate() {
            if event.is_event() {
                if i > 0 {
                    prop_assert_ne!(ids[i - 1], ids[i]);
                }
                if i + 1 < ids.len() {
                    prop_assert_ne!(ids[i + 1], ids[i]);
                }
            }
        }
    }

    /// Events sharing a group share an author
    #[test]
    fn groups_have_single_author((text, _) in arb_transcript(30)) {
        let events = parse(&text);
        let mut engine = RelationshipEngine::new(&events);
        let ids = engine.group_ids().to_vec();

        for i in 1..events.len() {
            if ids[i] == ids[i - 1] {
                prop_assert_eq!(events[i].author_str(), events[i - 1].author_str());
            }
        }
    }

    /// A larger threshold never produces more groups
    #[test]
    fn threshold_monotonic((text, _) in arb_transcript(30), secs in 0i64..600) {
        let events = parse(&text);
        let small = RelationshipEngine::with_threshold(&events, Duration::seconds(secs))
            .unwrap()
            .merged_groups()
            .len();
        let large = RelationshipEngine::with_threshold(&events, Duration::seconds(secs + 600))
            .unwrap()
            .merged_groups()
            .len();
        prop_assert!(large <= small);
    }

    /// Merging preserves every event and all content
    #[test]
    fn merge_preserves_content((text, _) in arb_transcript(30)) {
        let events = parse(&text);
        let mut engine = RelationshipEngine::new(&events);
        let ids = engine.group_ids().to_vec();
        let merged = merge_groups(&events, &ids);

        let total: usize = merged.iter().map(|g| g.event_count).sum();
        prop_assert_eq!(total, events.len());

        let before: String = events.iter().map(ChatEvent::content).collect();
        let after: String = merged.iter().map(|g| g.content.as_str()).collect();
        prop_assert_eq!(before, after);

        let stats = TranscriptStats::new(&events, &ids);
        prop_assert_eq!(stats.group_count, merged.len());
        prop_assert_eq!(stats.total(), events.len());
    }

    /// Enriched rows mirror the individual feature columns
    #[test]
    fn enriched_rows_match_features((text, _) in arb_transcript(20)) {
        let events = parse(&text);
        let mut engine = RelationshipEngine::new(&events);
        let rows = engine.enriched();
        let ids = engine.group_ids().to_vec();

        prop_assert_eq!(rows.len(), events.len());
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.ordinal, i);
            prop_assert_eq!(row.group_id, ids[i]);
            prop_assert_eq!(row.time_since_previous_secs.is_none(), i == 0);
            prop_assert_eq!(row.next_author.is_none(), i + 1 == rows.len());
        }
    }
}
