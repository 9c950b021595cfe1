//! Data preparation and analysis configuration

/// Bounds for the Support/Resistance list literal parser
pub struct LevelListLimits {
    // Most numbers a single cell may hold
    pub max_levels_per_cell: usize,
    // Longest cell (in bytes, after trimming) we are willing to look at
    pub max_cell_len: usize,
}

/// Settings for the summary report tab
pub struct ReportSettings {
    // Canned prompts offered alongside the report
    pub template_questions: &'static [&'static str],
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    // Trailing window (in rows) of the close-price moving average
    pub moving_average_window: usize,

    // Sub-groups
    pub levels: LevelListLimits,
    pub report: ReportSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    moving_average_window: 20,

    levels: LevelListLimits {
        max_levels_per_cell: 64,
        max_cell_len: 1024,
    },

    report: ReportSettings {
        template_questions: &[
            "How many bullish days were there in 2023?",
            "What was the highest daily return and on which date?",
            "Show me the top 5 largest support bands.",
            "List dates where resistance band was below the close price.",
        ],
    },
};

pub const MOVING_AVERAGE_WINDOW: usize = ANALYSIS.moving_average_window;
