use chrono::NaiveDate;
use derive_more::Display;
use uuid::Uuid;

use crate::{
    DeleteError, Exercise, Export, ExportFormat, Name, ReadError, Reps, TimePeriod, UpdateError,
    ValidationError, Weight,
};

pub trait WorkoutService {
    /// A corrupt store is read as an empty one.
    fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    /// All workouts, the most recent first.
    fn get_history(&self) -> Result<Vec<Workout>, ReadError>;
    fn get_workout_on(&self, date: NaiveDate) -> Result<Option<Workout>, ReadError>;
    /// The workout of `date`, or a new unsaved workout if none exists.
    fn current_workout(&self, date: NaiveDate, name: Option<String>)
    -> Result<Workout, ReadError>;
    fn find_last_exercise(
        &self,
        name: &str,
        exclude_date: NaiveDate,
    ) -> Result<Option<Exercise>, ReadError>;
    /// Compares the exercise against its last occurrence and stores it in the workout of `date`.
    fn add_exercise(
        &self,
        date: NaiveDate,
        workout_name: Option<String>,
        exercise: Exercise,
    ) -> Result<Workout, UpdateError>;
    fn replace_exercise(
        &self,
        workout_id: &WorkoutID,
        index: usize,
        exercise: Exercise,
    ) -> Result<Workout, UpdateError>;
    fn add_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        weight: Weight,
        reps: Reps,
    ) -> Result<Workout, UpdateError>;
    fn update_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        index: usize,
        weight: Weight,
        reps: Reps,
    ) -> Result<Workout, UpdateError>;
    fn remove_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        index: usize,
    ) -> Result<Workout, UpdateError>;
    fn delete_exercise(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
    ) -> Result<Workout, DeleteError>;
    fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError>;
    fn clear_workouts(&self) -> Result<(), DeleteError>;
    fn exercise_names(&self) -> Result<Vec<String>, ReadError>;
    fn count_workouts(&self, period: TimePeriod, today: NaiveDate) -> Result<usize, ReadError>;
    fn export(
        &self,
        period: TimePeriod,
        format: ExportFormat,
        today: NaiveDate,
    ) -> Result<Export, ReadError>;

    fn validate_exercise_name(&self, name: &str) -> Result<Name, ValidationError> {
        Name::new(name).map_err(|_| ValidationError::Empty("Name".to_string()))
    }

    fn validate_weight(&self, weight: &str) -> Result<Weight, ValidationError> {
        match Weight::try_from(weight) {
            Ok(parsed_weight) => {
                if parsed_weight.is_positive() {
                    Ok(parsed_weight)
                } else {
                    Err(ValidationError::NotPositive("Weight".to_string()))
                }
            }
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_reps(&self, reps: &str) -> Result<Reps, ValidationError> {
        match Reps::try_from(reps) {
            Ok(parsed_reps) => {
                if parsed_reps.is_positive() {
                    Ok(parsed_reps)
                } else {
                    Err(ValidationError::NotPositive("Reps".to_string()))
                }
            }
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }

    fn validate_exercise(&self, exercise: &Exercise) -> Result<(), ValidationError> {
        if exercise.sets.is_empty() {
            return Err(ValidationError::Empty("Sets".to_string()));
        }
        for set in &exercise.sets {
            if !set.weight.is_positive() {
                return Err(ValidationError::NotPositive(format!(
                    "Weight of set {}",
                    set.set_number
                )));
            }
            if !set.reps.is_positive() {
                return Err(ValidationError::NotPositive(format!(
                    "Reps of set {}",
                    set.set_number
                )));
            }
        }
        Ok(())
    }
}

/// Persistent collection of all workouts, read and written as a whole.
pub trait WorkoutRepository {
    /// An absent collection is an empty one. An unreadable collection is reported as
    /// [`StorageError::Corrupt`](crate::StorageError::Corrupt).
    fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    /// Replaces the workout with the same ID or appends it.
    fn upsert_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError>;
    fn replace_workouts(&self, workouts: Vec<Workout>) -> Result<(), UpdateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: NaiveDate,
    pub name: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    /// Creates an empty workout with a fresh ID.
    #[must_use]
    pub fn new(date: NaiveDate, name: Option<String>) -> Self {
        Self {
            id: WorkoutID::generate(),
            date,
            name: name.filter(|n| !n.trim().is_empty()),
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn exercise(&self, name: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.name.matches(name))
    }

    pub fn exercise_mut(&mut self, name: &str) -> Option<&mut Exercise> {
        self.exercises.iter_mut().find(|e| e.name.matches(name))
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(String);

impl WorkoutID {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }
}

impl AsRef<str> for WorkoutID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Puts `exercise` into the workout, replacing an exercise of the same name at its position.
#[must_use]
pub fn add_exercise_to_workout(mut workout: Workout, exercise: Exercise) -> Workout {
    let key = exercise.name.key();
    match workout.exercises.iter().position(|e| e.name.key() == key) {
        Some(index) => workout.exercises[index] = exercise,
        None => workout.exercises.push(exercise),
    }
    workout
}

/// Replaces the exercise at `index`.
///
/// Another exercise with the new name is dropped, so that names stay unique within the workout.
pub fn replace_exercise_in_workout(
    mut workout: Workout,
    index: usize,
    exercise: Exercise,
) -> Option<Workout> {
    if index >= workout.exercises.len() {
        return None;
    }
    let key = exercise.name.key();
    workout.exercises[index] = exercise;
    let mut position = 0;
    workout.exercises.retain(|e| {
        let keep = position == index || e.name.key() != key;
        position += 1;
        keep
    });
    Some(workout)
}

pub fn remove_exercise_from_workout(mut workout: Workout, name: &str) -> Option<Workout> {
    let index = workout.exercises.iter().position(|e| e.name.matches(name))?;
    workout.exercises.remove(index);
    Some(workout)
}

/// Returns the stored workouts with `workout` put in place of the one with the same ID.
#[must_use]
pub fn upsert_workout(mut workouts: Vec<Workout>, workout: Workout) -> Vec<Workout> {
    match workouts.iter().position(|w| w.id == workout.id) {
        Some(index) => workouts[index] = workout,
        None => workouts.push(workout),
    }
    workouts
}
