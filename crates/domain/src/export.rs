use chrono::NaiveDate;
use strum::{AsRefStr, Display, EnumString};

use crate::{Exercise, Workout, date};

const TITLE: &str = "TREINOS EXPORTADOS";
const NO_WORKOUTS: &str = "Nenhum treino registrado no período selecionado.";
const NO_EXERCISES: &str = "Nenhum exercício registrado.";
const CSV_HEADER: [&str; 7] = [
    "dia", "exercicio", "serie_1", "serie_2", "serie_3", "serie_4", "serie_5",
];
const CSV_SETS: usize = 5;

#[derive(AsRefStr, Display, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
        }
    }

    #[must_use]
    pub fn file_name(self, today: NaiveDate) -> String {
        format!("treinos_{}.{}", today.format("%Y-%m-%d"), self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub content: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Renders the workouts in the given order.
pub fn render(workouts: &[Workout], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(to_text(workouts)),
        ExportFormat::Csv => to_csv(workouts),
    }
}

#[must_use]
pub fn to_text(workouts: &[Workout]) -> String {
    if workouts.is_empty() {
        return NO_WORKOUTS.to_string();
    }

    let mut text = format!("{TITLE}\n{}\n\n", "=".repeat(50));

    for workout in workouts {
        text += &format!(
            "{} ({})\n{}\n\n",
            date::day_of_week(workout.date),
            date::format_day_month(workout.date),
            "-".repeat(40)
        );

        if workout.exercises.is_empty() {
            text += &format!("{NO_EXERCISES}\n\n");
            continue;
        }

        for exercise in &workout.exercises {
            write_exercise(&mut text, exercise);
        }

        text.push('\n');
    }

    text
}

fn write_exercise(text: &mut String, exercise: &Exercise) {
    *text += &format!("{}\n", exercise.name);
    for set in &exercise.sets {
        *text += &format!(
            "  Série {}: {}kg — {} reps\n",
            set.set_number, set.weight, set.reps
        );
    }
    text.push('\n');
}

/// One row per exercise with at most five set cells. Further sets are omitted.
pub fn to_csv(workouts: &[Workout]) -> Result<String, ExportError> {
    if workouts.is_empty() {
        return Ok(CSV_HEADER.join(","));
    }

    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;

    for workout in workouts {
        let day = date::format_day_month(workout.date);
        for exercise in &workout.exercises {
            let mut record = vec![day.clone(), exercise.name.to_string()];
            record.extend((0..CSV_SETS).map(|i| {
                exercise
                    .sets
                    .get(i)
                    .map(|set| format!("{}kg {}reps", set.weight, set.reps))
                    .unwrap_or_default()
            }));
            wtr.write_record(&record)?;
        }
    }

    let bytes = wtr.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
