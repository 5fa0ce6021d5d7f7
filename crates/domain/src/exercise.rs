use derive_more::{Display, Into};

use crate::{Comparison, Name};

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: Name,
    pub sets: Vec<Set>,
}

impl Exercise {
    /// Creates an exercise whose sets are numbered in the given order, starting at 1.
    #[must_use]
    pub fn new(name: Name, sets: impl IntoIterator<Item = (Weight, Reps)>) -> Self {
        let mut exercise = Self {
            name,
            sets: sets
                .into_iter()
                .map(|(weight, reps)| Set::new(0, weight, reps))
                .collect(),
        };
        exercise.renumber_sets();
        exercise
    }

    #[must_use]
    pub fn set(&self, set_number: u32) -> Option<&Set> {
        self.sets.iter().find(|s| s.set_number == set_number)
    }

    /// Appends a set labelled with the next set number.
    pub fn add_set(&mut self, weight: Weight, reps: Reps) -> &Set {
        let set_number = u32::try_from(self.sets.len()).unwrap_or(u32::MAX - 1) + 1;
        self.sets.push(Set::new(set_number, weight, reps));
        &self.sets[self.sets.len() - 1]
    }

    /// Removes the set at `index` and renumbers the remaining sets.
    ///
    /// Comparisons of the remaining sets are kept as they are.
    pub fn remove_set(&mut self, index: usize) -> Option<Set> {
        if index >= self.sets.len() {
            return None;
        }
        let removed = self.sets.remove(index);
        self.renumber_sets();
        Some(removed)
    }

    /// Overwrites weight and reps of the set at `index`.
    ///
    /// The stored comparison no longer describes the set and is cleared.
    pub fn update_set(&mut self, index: usize, weight: Weight, reps: Reps) -> Option<&Set> {
        let set = self.sets.get_mut(index)?;
        set.weight = weight;
        set.reps = reps;
        set.comparison = None;
        Some(set)
    }

    fn renumber_sets(&mut self) {
        for (set_number, set) in (1..).zip(self.sets.iter_mut()) {
            set.set_number = set_number;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub set_number: u32,
    pub weight: Weight,
    pub reps: Reps,
    pub comparison: Option<Comparison>,
}

impl Set {
    #[must_use]
    pub fn new(set_number: u32, weight: Weight, reps: Reps) -> Self {
        Self {
            set_number,
            weight,
            reps,
            comparison: None,
        }
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() || value < 0.0 {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must not be negative")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl From<u32> for Reps {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Ok(Reps(parsed_value)),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be a whole number")]
    ParseError,
}
