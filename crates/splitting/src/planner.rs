use schemars::JsonSchema;
use serde::Serialize;

use crate::naming::NameTemplate;
use crate::timecode::Timecode;
use crate::timeline::TimestampEntry;

/// One computed output segment: where it starts and ends in the source, and
/// what file it becomes. Produced by [`plan_clips`], consumed by the runner.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ClipPlan {
    /// 1-based ordinal, used for human-friendly file naming
    pub index: usize,
    pub start: Timecode,
    pub end: Timecode,
    pub label: String,
    pub output_name: String,
}

/// Pair each entry's start with the next entry's start; the last clip runs to
/// the end of the source. Entries are taken in list order, which is assumed
/// (not verified) to be chronological. An empty entry list plans nothing.
pub fn plan_clips(
    entries: &[TimestampEntry],
    duration: Timecode,
    template: &NameTemplate,
) -> Vec<ClipPlan> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let index = i + 1;
            let end = match entries.get(i + 1) {
                Some(next) => next.start,
                None => duration,
            };
            ClipPlan {
                index,
                start: entry.start,
                end,
                label: entry.label.clone(),
                output_name: template.render(index, &entry.label),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: &str, label: &str) -> TimestampEntry {
        TimestampEntry {
            start: start.parse().unwrap(),
            label: label.to_string(),
        }
    }

    fn template() -> NameTemplate {
        NameTemplate::default()
    }

    #[test]
    fn plans_one_clip_per_entry() {
        let entries = vec![
            entry("00:00:00", "Intro"),
            entry("00:05:00", "Main"),
            entry("00:10:00", "Outro"),
        ];
        let plans = plan_clips(&entries, Timecode::from_secs_f64(900.0), &template());
        assert_eq!(plans.len(), entries.len());
    }

    #[test]
    fn each_clip_ends_where_the_next_starts() {
        let entries = vec![
            entry("00:00:00", "Intro"),
            entry("00:05:00", "Main"),
            entry("00:10:00", "Outro"),
        ];
        let plans = plan_clips(&entries, Timecode::from_secs_f64(900.0), &template());

        for window in plans.windows(2) {
            assert_eq!(window[0].end, window[1].start);
        }
        assert_eq!(plans[0].end, entries[1].start);
        assert_eq!(plans[1].end, entries[2].start);
    }

    #[test]
    fn last_clip_ends_at_the_source_duration() {
        let entries = vec![entry("00:00:00", "Intro"), entry("00:05:00", "Main")];
        let duration = Timecode::from_secs_f64(900.0);
        let plans = plan_clips(&entries, duration, &template());
        assert_eq!(plans.last().unwrap().end, duration);
    }

    #[test]
    fn indices_are_one_based_and_consecutive() {
        let entries = vec![
            entry("00:00:00", "a"),
            entry("00:01:00", "b"),
            entry("00:02:00", "c"),
            entry("00:03:00", "d"),
        ];
        let plans = plan_clips(&entries, Timecode::from_secs_f64(300.0), &template());
        for (i, plan) in plans.iter().enumerate() {
            assert_eq!(plan.index, i + 1);
        }
    }

    #[test]
    fn duplicate_labels_still_get_distinct_names() {
        let entries = vec![
            entry("00:00:00", "Song"),
            entry("00:03:00", "Song"),
            entry("00:06:00", "Song"),
        ];
        let plans = plan_clips(&entries, Timecode::from_secs_f64(600.0), &template());
        let mut names: Vec<&str> = plans.iter().map(|p| p.output_name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), plans.len());
    }

    #[test]
    fn worked_example_from_the_timestamp_contract() {
        let entries = vec![
            entry("00:00:00", "Intro"),
            entry("00:05:00", "Main"),
            entry("00:10:00", "Outro"),
        ];
        let plans = plan_clips(&entries, Timecode::from_secs_f64(900.0), &template());

        assert_eq!(plans[0].index, 1);
        assert_eq!(plans[0].start.as_secs_f64(), 0.0);
        assert_eq!(plans[0].end.as_secs_f64(), 300.0);
        assert_eq!(plans[0].label, "Intro");
        assert_eq!(plans[0].output_name, "01 - Intro.mp4");

        assert_eq!(plans[1].start.as_secs_f64(), 300.0);
        assert_eq!(plans[1].end.as_secs_f64(), 600.0);

        assert_eq!(plans[2].start.as_secs_f64(), 600.0);
        assert_eq!(plans[2].end.as_secs_f64(), 900.0);
        assert_eq!(plans[2].end.to_string(), "00:15:00.000");
    }

    #[test]
    fn single_entry_spans_the_whole_source() {
        let entries = vec![entry("00:00:00", "Full")];
        let plans = plan_clips(&entries, Timecode::from_secs_f64(120.0), &template());
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].start.as_secs_f64(), 0.0);
        assert_eq!(plans[0].end.as_secs_f64(), 120.0);
    }

    #[test]
    fn empty_entries_plan_nothing() {
        let plans = plan_clips(&[], Timecode::from_secs_f64(120.0), &template());
        assert!(plans.is_empty());
    }
}
