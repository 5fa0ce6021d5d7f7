use chrono::NaiveDate;
use log::{debug, error, warn};

use crate::{
    DeleteError, Exercise, Export, ExportFormat, ReadError, Reps, Settings, SettingsRepository,
    SettingsService, StorageError, TimePeriod, UpdateError, Weight, Workout, WorkoutID,
    WorkoutRepository, WorkoutService, add_comparisons, add_exercise_to_workout, compare_set,
    exercise_names, export, filter_by_period, find_last_exercise,
    remove_exercise_from_workout, replace_exercise_in_workout,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Corrupt(_)) => {
                    warn!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> Service<R> {
    fn workout(&self, id: &WorkoutID) -> Result<(Vec<Workout>, Workout), UpdateError> {
        let workouts = self.get_workouts()?;
        let workout = workouts
            .iter()
            .find(|w| &w.id == id)
            .cloned()
            .ok_or(UpdateError::NotFound)?;
        Ok((workouts, workout))
    }

    /// Recomputes the comparison of a single set against the last occurrence of the exercise.
    fn modify_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        modify: impl FnOnce(&mut Exercise) -> Option<usize>,
    ) -> Result<Workout, UpdateError> {
        let (workouts, mut workout) = self.workout(workout_id)?;
        let last_exercise = find_last_exercise(&workouts, exercise_name, workout.date);
        let exercise = workout
            .exercise_mut(exercise_name)
            .ok_or(UpdateError::NotFound)?;
        let index = modify(exercise).ok_or(UpdateError::NotFound)?;
        let set = &mut exercise.sets[index];
        set.comparison = Some(compare_set(
            set,
            last_exercise.and_then(|e| e.set(set.set_number)),
        ));
        self.repository.upsert_workout(workout)
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        match self.repository.read_workouts() {
            Err(ReadError::Storage(StorageError::Corrupt(err))) => {
                warn!("failed to get workouts, starting with empty history: {err}");
                Ok(vec![])
            }
            result => log_on_error!(result, ReadError, "get", "workouts"),
        }
    }

    fn get_history(&self) -> Result<Vec<Workout>, ReadError> {
        Ok(filter_by_period(
            &self.get_workouts()?,
            TimePeriod::All,
            NaiveDate::MIN,
        ))
    }

    fn get_workout_on(&self, date: NaiveDate) -> Result<Option<Workout>, ReadError> {
        Ok(self
            .get_workouts()?
            .into_iter()
            .find(|w| w.date == date))
    }

    fn current_workout(
        &self,
        date: NaiveDate,
        name: Option<String>,
    ) -> Result<Workout, ReadError> {
        Ok(self
            .get_workout_on(date)?
            .unwrap_or_else(|| Workout::new(date, name)))
    }

    fn find_last_exercise(
        &self,
        name: &str,
        exclude_date: NaiveDate,
    ) -> Result<Option<Exercise>, ReadError> {
        Ok(find_last_exercise(&self.get_workouts()?, name, exclude_date).cloned())
    }

    fn add_exercise(
        &self,
        date: NaiveDate,
        workout_name: Option<String>,
        exercise: Exercise,
    ) -> Result<Workout, UpdateError> {
        self.validate_exercise(&exercise)?;
        let workouts = self.get_workouts()?;
        let workout = workouts
            .iter()
            .find(|w| w.date == date)
            .cloned()
            .unwrap_or_else(|| Workout::new(date, workout_name));
        let last_exercise = find_last_exercise(&workouts, exercise.name.as_str(), date);
        let exercise = add_comparisons(exercise, last_exercise);
        debug!(
            "adding exercise {} to workout {} on {date}",
            exercise.name, workout.id
        );
        log_on_error!(
            self.repository
                .upsert_workout(add_exercise_to_workout(workout, exercise)),
            UpdateError,
            "add",
            "exercise"
        )
    }

    fn replace_exercise(
        &self,
        workout_id: &WorkoutID,
        index: usize,
        exercise: Exercise,
    ) -> Result<Workout, UpdateError> {
        self.validate_exercise(&exercise)?;
        log_on_error!(
            self.workout(workout_id).and_then(|(workouts, workout)| {
                let last_exercise =
                    find_last_exercise(&workouts, exercise.name.as_str(), workout.date);
                let exercise = add_comparisons(exercise, last_exercise);
                let workout = replace_exercise_in_workout(workout, index, exercise)
                    .ok_or(UpdateError::NotFound)?;
                self.repository.upsert_workout(workout)
            }),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    fn add_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        weight: Weight,
        reps: Reps,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.modify_set(workout_id, exercise_name, |exercise| {
                exercise.add_set(weight, reps);
                exercise.sets.len().checked_sub(1)
            }),
            UpdateError,
            "add",
            "set"
        )
    }

    fn update_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        index: usize,
        weight: Weight,
        reps: Reps,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.modify_set(workout_id, exercise_name, |exercise| {
                exercise.update_set(index, weight, reps).map(|_| index)
            }),
            UpdateError,
            "update",
            "set"
        )
    }

    fn remove_set(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
        index: usize,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.workout(workout_id).and_then(|(_, mut workout)| {
                workout
                    .exercise_mut(exercise_name)
                    .and_then(|e| e.remove_set(index))
                    .ok_or(UpdateError::NotFound)?;
                self.repository.upsert_workout(workout)
            }),
            UpdateError,
            "remove",
            "set"
        )
    }

    fn delete_exercise(
        &self,
        workout_id: &WorkoutID,
        exercise_name: &str,
    ) -> Result<Workout, DeleteError> {
        log_on_error!(
            self.workout(workout_id)
                .map_err(DeleteError::from)
                .and_then(|(_, workout)| {
                    let workout = remove_exercise_from_workout(workout, exercise_name)
                        .ok_or(DeleteError::NotFound)?;
                    Ok(self.repository.upsert_workout(workout)?)
                }),
            DeleteError,
            "delete",
            "exercise"
        )
    }

    fn delete_workout(&self, id: &WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }

    fn clear_workouts(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository
                .replace_workouts(vec![])
                .map_err(DeleteError::from),
            DeleteError,
            "clear",
            "workouts"
        )
    }

    fn exercise_names(&self) -> Result<Vec<String>, ReadError> {
        Ok(exercise_names(&self.get_workouts()?))
    }

    fn count_workouts(&self, period: TimePeriod, today: NaiveDate) -> Result<usize, ReadError> {
        Ok(filter_by_period(&self.get_workouts()?, period, today).len())
    }

    fn export(
        &self,
        period: TimePeriod,
        format: ExportFormat,
        today: NaiveDate,
    ) -> Result<Export, ReadError> {
        let workouts = filter_by_period(&self.get_workouts()?, period, today);
        let content = export::render(&workouts, format).map_err(|err| {
            error!("failed to export workouts: {err}");
            ReadError::Other(err.into())
        })?;
        debug!("exported {} workouts as {format}", workouts.len());
        Ok(Export {
            file_name: format.file_name(today),
            content,
        })
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Result<Settings, ReadError> {
        match self.repository.read_settings() {
            Err(ReadError::Storage(StorageError::Corrupt(err))) => {
                warn!("failed to get settings, using defaults: {err}");
                Ok(Settings::default())
            }
            result => log_on_error!(result, ReadError, "get", "settings"),
        }
    }

    fn set_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.write_settings(settings),
            UpdateError,
            "set",
            "settings"
        )
    }
}
