use crate::constants::{EXACT_MATCH_LIMIT, NEAR_MATCH_LIMIT, WEAK_MATCH_LIMIT};
use crate::predictor::PredictionResult;

pub const NO_RESULTS_MESSAGE: &str =
    "❌ No colleges found matching your criteria. Try adjusting your rank or preferences.";

const DISCLAIMER: &str = "💡 Based on historical cutoff data. Actual admission may vary.";

/// Format bucketed prediction results as a chat reply.
///
/// Sections appear in fixed confidence order and are truncated to the first
/// 5/3/2 entries; an empty bucket renders no section at all, and a fully
/// empty result renders only the no-results message.
pub fn format_results(results: &PredictionResult) -> String {
    if results.is_empty() {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut message = String::from("## 🎓 College Prediction Results\n\n");

    if !results.exact_matches.is_empty() {
        message.push_str("### 🎯 Exact Matches (High Chance)\n");
        for (index, college) in results.exact_matches.iter().take(EXACT_MATCH_LIMIT).enumerate() {
            message.push_str(&format!(
                "{}. **{}** - {}\n   📊 Cutoff: {} - {}\n   👥 Seats: {}\n\n",
                index + 1,
                college.college_name,
                college.place,
                college.opening_cutoff_rank,
                college.closing_cutoff_rank,
                college.seats,
            ));
        }
    }

    if !results.near_matches.is_empty() {
        message.push_str("### 📈 Near Matches (Good Chance)\n");
        for (index, college) in results.near_matches.iter().take(NEAR_MATCH_LIMIT).enumerate() {
            message.push_str(&format!(
                "{}. **{}** - {}\n   📊 Cutoff: {} - {}\n\n",
                index + 1,
                college.college_name,
                college.place,
                college.opening_cutoff_rank,
                college.closing_cutoff_rank,
            ));
        }
    }

    if !results.weak_matches.is_empty() {
        message.push_str("### 📊 Weak Matches (Possible)\n");
        for (index, college) in results.weak_matches.iter().take(WEAK_MATCH_LIMIT).enumerate() {
            message.push_str(&format!(
                "{}. **{}** - {}\n\n",
                index + 1,
                college.college_name,
                college.place,
            ));
        }
    }

    message.push_str(DISCLAIMER);
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::College;

    fn college(name: &str) -> College {
        College {
            college_name: name.to_string(),
            college_id: "C001".to_string(),
            place: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            opening_cutoff_rank: 1000,
            closing_cutoff_rank: 2000,
            seats: 60,
            year: 2023,
            website: "https://example.edu".to_string(),
        }
    }

    #[test]
    fn test_empty_results_render_single_message() {
        let rendered = format_results(&PredictionResult::default());
        assert_eq!(rendered, NO_RESULTS_MESSAGE);
        assert!(!rendered.contains("Exact Matches"));
    }

    #[test]
    fn test_single_exact_match_renders_one_section() {
        let results = PredictionResult {
            exact_matches: vec![college("ABC Institute")],
            ..Default::default()
        };
        let rendered = format_results(&results);

        assert!(rendered.contains("Exact Matches"));
        assert!(rendered.contains("**ABC Institute** - Bengaluru"));
        assert!(rendered.contains("Seats: 60"));
        assert!(!rendered.contains("Near Matches"));
        assert!(!rendered.contains("Weak Matches"));
        assert!(rendered.contains(DISCLAIMER));
    }

    #[test]
    fn test_buckets_truncate_to_display_limits() {
        let results = PredictionResult {
            exact_matches: (0..8).map(|i| college(&format!("E{i}"))).collect(),
            near_matches: (0..5).map(|i| college(&format!("N{i}"))).collect(),
            weak_matches: (0..4).map(|i| college(&format!("W{i}"))).collect(),
        };
        let rendered = format_results(&results);

        assert!(rendered.contains("E4"));
        assert!(!rendered.contains("E5"));
        assert!(rendered.contains("N2"));
        assert!(!rendered.contains("N3"));
        assert!(rendered.contains("W1"));
        assert!(!rendered.contains("W2"));
    }

    #[test]
    fn test_seats_only_shown_for_exact_matches() {
        let results = PredictionResult {
            near_matches: vec![college("Near Only")],
            ..Default::default()
        };
        let rendered = format_results(&results);
        assert!(rendered.contains("Cutoff: 1000 - 2000"));
        assert!(!rendered.contains("Seats"));
    }
}
