use std::cmp::Ordering;

use strum::{AsRefStr, Display, EnumString};

use crate::{Exercise, Set};

/// Direction of a set relative to the set with the same number in the previous occurrence of
/// the exercise.
#[derive(AsRefStr, Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Comparison {
    Up,
    Down,
    Equal,
    New,
}

/// Weight decides first, reps only break a tie at equal weight. Weights are compared exactly.
#[must_use]
pub fn compare_set(current: &Set, previous: Option<&Set>) -> Comparison {
    let Some(previous) = previous else {
        return Comparison::New;
    };

    let ordering = match current.weight.partial_cmp(&previous.weight) {
        Some(Ordering::Equal) | None => current.reps.cmp(&previous.reps),
        Some(ordering) => ordering,
    };

    match ordering {
        Ordering::Greater => Comparison::Up,
        Ordering::Less => Comparison::Down,
        Ordering::Equal => Comparison::Equal,
    }
}

/// Annotates every set of `exercise` with its comparison to the set carrying the same set number
/// in `last_exercise`.
#[must_use]
pub fn add_comparisons(exercise: Exercise, last_exercise: Option<&Exercise>) -> Exercise {
    let Exercise { name, sets } = exercise;
    let sets = sets
        .into_iter()
        .map(|set| {
            let previous = last_exercise.and_then(|e| e.set(set.set_number));
            Set {
                comparison: Some(compare_set(&set, previous)),
                ..set
            }
        })
        .collect();
    Exercise { name, sets }
}
