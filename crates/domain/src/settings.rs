use crate::{ExportFormat, ReadError, TimePeriod, UpdateError};

pub trait SettingsService {
    fn get_settings(&self) -> Result<Settings, ReadError>;
    fn set_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

pub trait SettingsRepository {
    /// Absent settings are read as [`Settings::default`].
    fn read_settings(&self) -> Result<Settings, ReadError>;
    fn write_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

/// Initial selection of the export dialog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub export_period: TimePeriod,
    pub export_format: ExportFormat,
}
