use crate::app::OptionsConfig;
use crate::constants::{ALL_PLACES_LABEL, OPTION_DECORATIONS};

/// One discrete state in the guided dialogue.
///
/// Each non-terminal step collects exactly one profile field; transitions are
/// strictly forward except the explicit reset edge back to `Welcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Welcome,
    CollegeType,
    ExamType,
    Category,
    Place,
    Rank,
    Complete,
}

impl Step {
    /// The step that follows this one in the dialogue
    pub fn next(self) -> Step {
        match self {
            Step::Welcome => Step::CollegeType,
            Step::CollegeType => Step::ExamType,
            Step::ExamType => Step::Category,
            Step::Category => Step::Place,
            Step::Place => Step::Rank,
            Step::Rank => Step::Complete,
            Step::Complete => Step::Complete,
        }
    }

    /// Bot prompt shown when this step is entered. `selection` is the value
    /// the user just picked at the previous step (some prompts echo it).
    pub fn prompt(self, selection: &str) -> String {
        match self {
            Step::Welcome => {
                "🤖 Welcome to College Predictor! I can help you find suitable colleges \
                 based on your PGCET rank and preferences."
                    .to_string()
            }
            Step::CollegeType => {
                "Great! Let's find your perfect college. Which program are you interested in?"
                    .to_string()
            }
            Step::ExamType => {
                format!("Excellent choice! {selection} is a great program. Which exam type?")
            }
            Step::Category => "What is your category?".to_string(),
            Step::Place => {
                "Preferred location? Choose \"All Locations\" to see colleges across Karnataka."
                    .to_string()
            }
            Step::Rank => "Almost there! Please enter your PGCET rank:".to_string(),
            Step::Complete => String::new(),
        }
    }

    /// Decorated option labels presented at this step
    pub fn options(self, config: &OptionsConfig) -> Vec<String> {
        match self {
            Step::Welcome => vec!["🎓 Start Prediction".to_string()],
            Step::CollegeType => config
                .college_types
                .iter()
                .map(|t| format!("📚 {t}"))
                .collect(),
            Step::ExamType => config.exam_types.iter().map(|e| format!("📝 {e}")).collect(),
            Step::Category => config.categories.iter().map(|c| format!("👤 {c}")).collect(),
            Step::Place => {
                let mut options = vec![format!("🌍 {ALL_PLACES_LABEL}")];
                options.extend(config.filtered_places().map(|p| format!("📍 {p}")));
                options
            }
            Step::Rank => vec!["🔢 Enter Rank".to_string()],
            Step::Complete => vec!["🔄 New Prediction".to_string(), "❌ Close".to_string()],
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Step::Complete
    }
}

/// Strip the decorative annotation from an option label, leaving the
/// canonical value that gets stored and sent to the service.
pub fn canonical_option(raw: &str) -> String {
    raw.replace(OPTION_DECORATIONS, "").trim().to_string()
}
