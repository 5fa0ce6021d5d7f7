use chrono::NaiveDate;
use gymlog_domain::{self as domain, StorageError};
use log::{debug, warn};
use serde::{Serialize, de::DeserializeOwned};

use crate::{Backend, Key};

/// Workouts and settings persisted as JSON values of a [`Backend`].
pub struct Records<B> {
    backend: B,
    workouts_key: String,
}

impl<B: Backend> Records<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, Key::Workouts.as_ref())
    }

    pub fn with_key(backend: B, workouts_key: &str) -> Self {
        Self {
            backend,
            workouts_key: workouts_key.to_string(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get(key)? {
            Some(value) => serde_json::from_str(&value)
                .map(Some)
                .map_err(|err| StorageError::Corrupt(err.to_string())),
            None => Ok(None),
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_string(value).map_err(|err| StorageError::Other(err.into()))?;
        self.backend.set(key, &value)
    }

    /// Workouts holding invalid values are skipped, the others are kept.
    fn load_workouts(&self) -> Result<Vec<domain::Workout>, StorageError> {
        Ok(self
            .read::<Vec<Workout>>(&self.workouts_key)?
            .unwrap_or_default()
            .into_iter()
            .filter_map(|w| {
                let id = w.id.clone();
                domain::Workout::try_from(w)
                    .inspect_err(|err| warn!("skipping invalid workout {id}: {err}"))
                    .ok()
            })
            .collect())
    }

    /// Loads the workouts that a mutation starts from.
    fn load_workouts_for_update(&self) -> Result<Vec<domain::Workout>, StorageError> {
        match self.load_workouts() {
            Err(StorageError::Corrupt(err)) => {
                warn!("discarding corrupt workouts: {err}");
                Ok(vec![])
            }
            result => result,
        }
    }

    fn store_workouts(&self, workouts: &[domain::Workout]) -> Result<(), StorageError> {
        debug!("storing {} workouts", workouts.len());
        self.write(
            &self.workouts_key,
            &workouts.iter().map(Workout::from).collect::<Vec<_>>(),
        )
    }
}

impl<B: Backend> domain::WorkoutRepository for Records<B> {
    fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self.load_workouts()?)
    }

    fn upsert_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let workouts = domain::upsert_workout(self.load_workouts_for_update()?, workout.clone());
        self.store_workouts(&workouts)?;
        Ok(workout)
    }

    fn delete_workout(
        &self,
        id: &domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let mut workouts = self.load_workouts_for_update()?;
        let Some(index) = workouts.iter().position(|w| &w.id == id) else {
            return Err(domain::DeleteError::NotFound);
        };
        workouts.remove(index);
        self.store_workouts(&workouts)?;
        Ok(id.clone())
    }

    fn replace_workouts(&self, workouts: Vec<domain::Workout>) -> Result<(), domain::UpdateError> {
        Ok(self.store_workouts(&workouts)?)
    }
}

impl<B: Backend> domain::SettingsRepository for Records<B> {
    fn read_settings(&self) -> Result<domain::Settings, domain::ReadError> {
        match self.read::<Settings>(Key::Settings.as_ref())? {
            Some(settings) => Ok(domain::Settings::try_from(settings)
                .map_err(|err| StorageError::Corrupt(err.to_string()))?),
            None => Ok(domain::Settings::default()),
        }
    }

    fn write_settings(&self, settings: domain::Settings) -> Result<(), domain::UpdateError> {
        Ok(self.write(Key::Settings.as_ref(), &Settings::from(settings))?)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: value.id.to_string(),
            date: value.date,
            name: value.name.clone(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = WorkoutError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            name: value.name,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub sets: Vec<Set>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = WorkoutError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub set_number: u32,
    pub weight: f32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            set_number: value.set_number,
            weight: value.weight.into(),
            reps: value.reps.into(),
            comparison: value.comparison.map(Comparison::from),
        }
    }
}

impl TryFrom<Set> for domain::Set {
    type Error = WorkoutError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            set_number: value.set_number,
            weight: domain::Weight::new(value.weight)?,
            reps: domain::Reps::new(value.reps),
            comparison: value.comparison.map(domain::Comparison::from),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Up,
    Down,
    Equal,
    New,
}

impl From<domain::Comparison> for Comparison {
    fn from(value: domain::Comparison) -> Self {
        match value {
            domain::Comparison::Up => Comparison::Up,
            domain::Comparison::Down => Comparison::Down,
            domain::Comparison::Equal => Comparison::Equal,
            domain::Comparison::New => Comparison::New,
        }
    }
}

impl From<Comparison> for domain::Comparison {
    fn from(value: Comparison) -> Self {
        match value {
            Comparison::Up => domain::Comparison::Up,
            Comparison::Down => domain::Comparison::Down,
            Comparison::Equal => domain::Comparison::Equal,
            Comparison::New => domain::Comparison::New,
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WorkoutError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub export_period: String,
    pub export_format: String,
}

impl From<domain::Settings> for Settings {
    fn from(value: domain::Settings) -> Self {
        Self {
            export_period: value.export_period.to_string(),
            export_format: value.export_format.to_string(),
        }
    }
}

impl TryFrom<Settings> for domain::Settings {
    type Error = strum::ParseError;

    fn try_from(value: Settings) -> Result<Self, Self::Error> {
        Ok(Self {
            export_period: value.export_period.parse()?,
            export_format: value.export_format.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use gymlog_domain::{SettingsRepository, WorkoutRepository};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use crate::{
        files::Files,
        memory::Memory,
        tests::data::{WORKOUT, WORKOUT_2, WORKOUTS},
    };

    use super::*;

    fn records_with(value: &str) -> Records<Memory> {
        let memory = Memory::default();
        memory.set(Key::Workouts.as_ref(), value).unwrap();
        Records::new(memory)
    }

    fn stored(records: &Records<Memory>) -> serde_json::Value {
        serde_json::from_str(
            &records
                .backend()
                .get(Key::Workouts.as_ref())
                .unwrap()
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_workout_try_from() {
        assert_eq!(
            domain::Workout::try_from(Workout::from(&*WORKOUT)).unwrap(),
            WORKOUT.clone()
        );
    }

    #[test]
    fn test_workout_serde() {
        assert_eq!(
            json!(Workout::from(&*WORKOUT_2)),
            json!({
                "id": "2",
                "date": "2024-01-08",
                "name": "Pernas",
                "exercises": [
                    {
                        "name": "squat",
                        "sets": [
                            { "setNumber": 1, "weight": 105.0, "reps": 5, "comparison": "up" },
                            { "setNumber": 2, "weight": 100.0, "reps": 4, "comparison": "down" },
                            { "setNumber": 3, "weight": 80.0, "reps": 8, "comparison": "new" },
                        ]
                    },
                ]
            })
        );
    }

    #[test]
    fn test_workout_deserialize_optional_fields() {
        let workout: Workout = serde_json::from_value(json!({
            "id": "1700000000000",
            "date": "2024-01-01",
            "exercises": [{ "name": "Bench", "sets": [{ "setNumber": 1, "weight": 80, "reps": 8 }] }]
        }))
        .unwrap();
        assert_eq!(workout.name, None);
        assert_eq!(workout.exercises[0].sets[0].comparison, None);
        assert_eq!(
            json!(workout),
            json!({
                "id": "1700000000000",
                "date": "2024-01-01",
                "exercises": [{ "name": "Bench", "sets": [{ "setNumber": 1, "weight": 80.0, "reps": 8 }] }]
            })
        );
    }

    #[rstest]
    #[case::empty_name(json!({ "name": " ", "sets": [] }))]
    #[case::negative_weight(
        json!({ "name": "Squat", "sets": [{ "setNumber": 1, "weight": -1, "reps": 5 }] })
    )]
    fn test_exercise_try_from_invalid(#[case] value: serde_json::Value) {
        let exercise: Exercise = serde_json::from_value(value).unwrap();
        assert!(domain::Exercise::try_from(exercise).is_err());
    }

    #[test]
    fn test_read_workouts_absent() {
        let records = Records::new(Memory::default());
        assert_eq!(records.read_workouts().unwrap(), vec![]);
    }

    #[rstest]
    #[case::not_json("{")]
    #[case::wrong_shape("{\"id\": 1}")]
    #[case::wrong_date(r#"[{"id": "1", "date": "01/01/2024", "exercises": []}]"#)]
    fn test_read_workouts_corrupt(#[case] value: &str) {
        assert!(matches!(
            records_with(value).read_workouts(),
            Err(domain::ReadError::Storage(StorageError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_upsert_workout() {
        let records = Records::new(Memory::default());
        assert_eq!(records.upsert_workout(WORKOUT.clone()).unwrap(), *WORKOUT);
        assert_eq!(records.upsert_workout(WORKOUT_2.clone()).unwrap(), *WORKOUT_2);
        assert_eq!(records.read_workouts().unwrap(), *WORKOUTS);

        let mut workout = WORKOUT.clone();
        workout.name = Some("A".to_string());
        records.upsert_workout(workout.clone()).unwrap();
        assert_eq!(
            records.read_workouts().unwrap(),
            vec![workout, WORKOUT_2.clone()]
        );
    }

    #[test]
    fn test_upsert_workout_corrupt() {
        let records = records_with("not json");
        records.upsert_workout(WORKOUT.clone()).unwrap();
        assert_eq!(records.read_workouts().unwrap(), vec![WORKOUT.clone()]);
    }

    const MIXED_WORKOUTS: &str = r#"[
        {"id": "a", "date": "2024-01-01", "exercises": [
            {"name": "Squat", "sets": [{"setNumber": 1, "weight": 100, "reps": 5}]}
        ]},
        {"id": "b", "date": "2024-01-02", "exercises": [
            {"name": "Curl", "sets": [{"setNumber": 1, "weight": -5, "reps": 10}]}
        ]},
        {"id": "c", "date": "2024-01-03", "exercises": [{"name": " ", "sets": []}]}
    ]"#;

    #[test]
    fn test_read_workouts_skips_invalid_workouts() {
        let workouts = records_with(MIXED_WORKOUTS).read_workouts().unwrap();
        assert_eq!(
            workouts.iter().map(|w| w.id.to_string()).collect::<Vec<_>>(),
            vec!["a"]
        );
    }

    #[test]
    fn test_upsert_workout_keeps_valid_workouts() {
        let records = records_with(MIXED_WORKOUTS);
        records.upsert_workout(WORKOUT_2.clone()).unwrap();
        assert_eq!(
            records
                .read_workouts()
                .unwrap()
                .iter()
                .map(|w| w.id.to_string())
                .collect::<Vec<_>>(),
            vec!["a", "2"]
        );
    }

    #[test]
    fn test_service_compares_against_valid_workouts() {
        use gymlog_domain::{Service, WorkoutService};

        let service = Service::new(records_with(MIXED_WORKOUTS));
        let workout = service
            .add_exercise(
                NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                None,
                domain::Exercise::new(
                    domain::Name::new("Squat").unwrap(),
                    [(domain::Weight::new(105.0).unwrap(), domain::Reps::new(5))],
                ),
            )
            .unwrap();
        assert_eq!(
            workout.exercises[0].sets[0].comparison,
            Some(domain::Comparison::Up)
        );
        assert_eq!(service.get_workouts().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_workout() {
        let records = Records::new(Memory::default());
        records.replace_workouts(WORKOUTS.clone()).unwrap();
        assert_eq!(records.delete_workout(&WORKOUT.id).unwrap(), WORKOUT.id);
        assert_eq!(records.read_workouts().unwrap(), vec![WORKOUT_2.clone()]);
    }

    #[test]
    fn test_delete_workout_not_found() {
        let records = Records::new(Memory::default());
        records.replace_workouts(WORKOUTS.clone()).unwrap();
        let before = stored(&records);
        assert!(matches!(
            records.delete_workout(&"3".into()),
            Err(domain::DeleteError::NotFound)
        ));
        assert_eq!(stored(&records), before);
    }

    #[test]
    fn test_replace_workouts() {
        let records = records_with("{");
        records.replace_workouts(WORKOUTS.clone()).unwrap();
        assert_eq!(records.read_workouts().unwrap(), *WORKOUTS);
        records.replace_workouts(vec![]).unwrap();
        assert_eq!(stored(&records), json!([]));
    }

    #[test]
    fn test_with_key() {
        let records = Records::with_key(Memory::default(), "other");
        records.upsert_workout(WORKOUT.clone()).unwrap();
        assert_eq!(records.backend().get(Key::Workouts.as_ref()).unwrap(), None);
        assert!(records.backend().get("other").unwrap().is_some());
    }

    #[test]
    fn test_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        Records::new(Files::new(dir.path()))
            .replace_workouts(WORKOUTS.clone())
            .unwrap();
        let records = Records::new(Files::new(dir.path()));
        assert_eq!(records.read_workouts().unwrap(), *WORKOUTS);
        assert!(dir.path().join("gymlog_workouts.json").exists());
    }

    #[test]
    fn test_settings() {
        let records = Records::new(Memory::default());
        assert_eq!(records.read_settings().unwrap(), domain::Settings::default());
        let settings = domain::Settings {
            export_period: domain::TimePeriod::Week,
            export_format: domain::ExportFormat::Csv,
        };
        records.write_settings(settings).unwrap();
        assert_eq!(records.read_settings().unwrap(), settings);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(
                &records.backend().get("settings").unwrap().unwrap()
            )
            .unwrap(),
            json!({ "exportPeriod": "week", "exportFormat": "csv" })
        );
    }

    #[test]
    fn test_settings_corrupt() {
        let memory = Memory::default();
        memory
            .set(
                Key::Settings.as_ref(),
                r#"{"exportPeriod": "year", "exportFormat": "csv"}"#,
            )
            .unwrap();
        assert!(matches!(
            Records::new(memory).read_settings(),
            Err(domain::ReadError::Storage(StorageError::Corrupt(_)))
        ));
    }

    #[test]
    fn test_service_recovers_from_corrupt_store() {
        use gymlog_domain::{Service, SettingsService, WorkoutService};

        let records = records_with("[");
        records
            .backend()
            .set(Key::Settings.as_ref(), "[")
            .unwrap();
        let service = Service::new(records);
        assert_eq!(service.get_workouts().unwrap(), vec![]);
        assert_eq!(service.get_settings().unwrap(), domain::Settings::default());
    }
}
