//! Read-side derivation: filter, sort and count the task list for display.
//!
//! Nothing here is cached; callers recompute on every read.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Filter, SortOrder, Task, TaskCounts};

/// Apply `filter` then a stable `sort` over `tasks`, preserving source order
/// between equal keys.
pub fn visible_tasks<'a>(tasks: &'a [Task], filter: Filter, sort: SortOrder) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|task| filter.matches(task)).collect();
    match sort {
        SortOrder::Newest => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => visible.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Alphabetical => visible.sort_by(|a, b| locale_cmp(&a.text, &b.text)),
        SortOrder::CompletedLast => visible.sort_by_key(|task| task.completed),
    }
    visible
}

pub fn counts(tasks: &[Task]) -> TaskCounts {
    TaskCounts::from_tasks(tasks)
}

/// Collation-style ordering for task text.
///
/// Levels, most significant first: base letters with diacritics stripped and
/// case folded (punctuation and symbols before digits before letters), then
/// accents (unaccented first), then case (lowercase first), then raw text.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_key(text: &str) -> Vec<(u8, char)> {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
        .collect()
}

fn accent_key(text: &str) -> String {
    text.nfd().flat_map(char::to_lowercase).collect()
}

fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn case_cmp(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.nfd().zip(b.nfd()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Heading and hint shown when the derived list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

pub fn empty_state(counts: &TaskCounts) -> EmptyState {
    if counts.total == 0 {
        EmptyState {
            title: "No tasks yet!",
            hint: "Add your first task to get started",
        }
    } else {
        EmptyState {
            title: "No tasks match your filter",
            hint: "Try adjusting your filter or sort options",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn task(id: &str, text: &str, minutes: i64, completed: bool) -> Task {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut task = Task::new(id.into(), text, base + Duration::minutes(minutes));
        task.completed = completed;
        task
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.to_string()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task("t2", "banana", 2, false),
            task("t1", "Apple", 1, true),
            task("t3", "cherry", 3, false),
        ]
    }

    #[test]
    fn oldest_and_newest_order_by_timestamp() {
        let tasks = sample();
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::Oldest)),
            vec!["t1", "t2", "t3"]
        );
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::Newest)),
            vec!["t3", "t2", "t1"]
        );
    }

    #[test]
    fn active_filter_excludes_completed_under_every_sort() {
        let tasks = sample();
        for sort in SortOrder::ALL {
            let visible = visible_tasks(&tasks, Filter::Active, sort);
            assert!(visible.iter().all(|t| !t.completed), "sort {sort}");
            assert_eq!(visible.len(), 2);
        }
    }

    #[test]
    fn completed_filter_keeps_only_completed() {
        let tasks = sample();
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::Completed, SortOrder::Newest)),
            vec!["t1"]
        );
    }

    #[test]
    fn alphabetical_ignores_case() {
        let tasks = sample();
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::Alphabetical)),
            vec!["t1", "t2", "t3"]
        );
    }

    #[test]
    fn completed_last_is_stable() {
        let tasks = vec![
            task("a", "a", 0, true),
            task("b", "b", 1, false),
            task("c", "c", 2, true),
            task("d", "d", 3, false),
        ];
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::CompletedLast)),
            vec!["b", "d", "a", "c"]
        );
    }

    #[test]
    fn equal_timestamps_keep_source_order() {
        let tasks = vec![task("x", "x", 5, false), task("y", "y", 5, false)];
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::Newest)),
            vec!["x", "y"]
        );
    }

    #[test]
    fn locale_cmp_orders_lowercase_first_on_case_ties() {
        assert_eq!(locale_cmp("apple", "Apple"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn alphabetical_folds_accents_into_base_letters() {
        let tasks = vec![
            task("z", "Zebra", 0, false),
            task("e", "éclair", 1, false),
            task("f", "fig", 2, false),
            task("E", "Eclair", 3, false),
        ];
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::Alphabetical)),
            vec!["E", "e", "f", "z"]
        );
    }

    #[test]
    fn alphabetical_puts_punctuation_then_digits_before_letters() {
        let tasks = vec![
            task("apple", "apple", 0, false),
            task("tilde", "~later", 1, false),
            task("two", "2 coffees", 2, false),
            task("hash", "#urgent", 3, false),
            task("ten", "10 push-ups", 4, false),
        ];
        assert_eq!(
            ids(&visible_tasks(&tasks, Filter::All, SortOrder::Alphabetical)),
            vec!["hash", "tilde", "ten", "two", "apple"]
        );
    }

    #[test]
    fn locale_cmp_breaks_accent_and_case_ties() {
        assert_eq!(locale_cmp("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_cmp("résumé", "Résumé"), Ordering::Less);
        assert_eq!(locale_cmp("Ångström", "angstrom"), Ordering::Greater);
        assert_eq!(locale_cmp("Ångström", "zebra"), Ordering::Less);
    }

    #[test]
    fn empty_state_depends_on_total() {
        assert_eq!(empty_state(&TaskCounts::default()).title, "No tasks yet!");
        let counts = TaskCounts {
            total: 2,
            active: 0,
            completed: 2,
        };
        assert_eq!(empty_state(&counts).title, "No tasks match your filter");
    }
}
