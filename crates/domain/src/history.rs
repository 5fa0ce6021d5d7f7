use std::{cmp::Reverse, collections::BTreeSet};

use chrono::NaiveDate;

use crate::{Exercise, Workout};

/// Finds the most recent occurrence of an exercise outside of `exclude_date`.
///
/// Only the latest matching workout is consulted. Its exercise is returned with all its sets,
/// even if older workouts contain more sets.
#[must_use]
pub fn find_last_exercise<'a>(
    workouts: &'a [Workout],
    name: &str,
    exclude_date: NaiveDate,
) -> Option<&'a Exercise> {
    let mut candidates = workouts
        .iter()
        .filter(|w| w.date != exclude_date)
        .collect::<Vec<_>>();
    candidates.sort_by_key(|w| Reverse(w.date));
    candidates.into_iter().find_map(|w| w.exercise(name))
}

/// Returns the names of all logged exercises in alphabetical order.
///
/// Names differing only in case are listed once, in the casing of their first occurrence.
#[must_use]
pub fn exercise_names(workouts: &[Workout]) -> Vec<String> {
    let mut names = Vec::<String>::new();
    let mut keys = BTreeSet::new();
    for exercise in workouts.iter().flat_map(|w| &w.exercises) {
        if keys.insert(exercise.name.key()) {
            names.push(exercise.name.to_string());
        }
    }
    names.sort_by_key(|n| n.to_lowercase());
    names
}
