pub mod analytics;
pub mod i18n;
pub mod indicators;
pub mod number_format;
