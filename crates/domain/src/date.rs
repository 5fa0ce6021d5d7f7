use chrono::{Datelike, Local, NaiveDate, Weekday};

#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `DD/MM`
#[must_use]
pub fn format_day_month(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

#[must_use]
pub fn day_of_week(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Domingo",
        Weekday::Mon => "Segunda",
        Weekday::Tue => "Terça",
        Weekday::Wed => "Quarta",
        Weekday::Thu => "Quinta",
        Weekday::Fri => "Sexta",
        Weekday::Sat => "Sábado",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case((2024, 1, 8), "08/01")]
    #[case((2024, 12, 31), "31/12")]
    #[case((2023, 2, 28), "28/02")]
    fn test_format_day_month(#[case] date: (i32, u32, u32), #[case] expected: &str) {
        assert_eq!(
            format_day_month(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap()),
            expected
        );
    }

    #[rstest]
    #[case((2024, 1, 7), "Domingo")]
    #[case((2024, 1, 8), "Segunda")]
    #[case((2024, 1, 9), "Terça")]
    #[case((2024, 1, 10), "Quarta")]
    #[case((2024, 1, 11), "Quinta")]
    #[case((2024, 1, 12), "Sexta")]
    #[case((2024, 1, 13), "Sábado")]
    fn test_day_of_week(#[case] date: (i32, u32, u32), #[case] expected: &str) {
        assert_eq!(
            day_of_week(NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap()),
            expected
        );
    }
}
