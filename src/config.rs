use std::path::PathBuf;

use crate::data::model::Column;

/// Source table read at startup, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "WDRR_seq_CSV.csv";

/// Selectors shown for each scenario, top to bottom.
pub const SCENARIO_FILTER_COLUMNS: [Column; 6] = [
    Column::Confirmation,
    Column::ConfTrueFalse,
    Column::Model,
    Column::StartDay,
    Column::StartHighLow,
    Column::StartSession,
];

/// Startup settings for the dashboard window.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            title: "WDRR Sequence Calculator for CL".to_string(),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}
