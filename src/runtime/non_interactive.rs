use anyhow::Result;
use serde_json::json;

use crate::{
    app::Config,
    cache::PredictionCache,
    chat::format_results,
    cli::{Cli, OutputFormat},
    constants::ALL_PLACES,
    predictor::{PredictionInput, Predictor},
    utils::CounselorError,
};

/// Build a prediction input from CLI flags, applying the same defaults the
/// service applies to partial requests
pub fn input_from_cli(cli: &Cli, config: &Config) -> Result<PredictionInput, CounselorError> {
    let rank = cli
        .rank
        .filter(|r| *r > 0)
        .ok_or_else(|| CounselorError::Validation("Please provide a positive rank.".to_string()))?;

    Ok(PredictionInput {
        exam_type: cli.exam_type.clone().unwrap_or_else(|| "PGCET".to_string()),
        state: config.options.state.clone(),
        place: normalize_place(cli.place.as_deref().unwrap_or(ALL_PLACES)),
        rank,
        category: cli.category.clone().unwrap_or_else(|| "GM".to_string()),
        college_type: cli
            .college_type
            .clone()
            .unwrap_or_else(|| "MCA".to_string()),
    })
}

/// Map free-text place names onto their canonical database spellings.
/// Unknown names pass through unchanged; empty means no filter.
pub fn normalize_place(raw: &str) -> String {
    let canonical = match raw.trim().to_lowercase().as_str() {
        "" | "all" => "All",
        "bangalore" | "bengaluru" => "Bengaluru",
        "mysore" | "mysuru" => "Mysore",
        "mandya" => "Mandya",
        "belagavi" | "belgaum" => "Belagavi",
        "dharwad" => "Dharwad",
        "hubballi" | "hubli" => "Hubballi",
        "davanagere" => "Davanagere",
        "mangaluru" | "mangalore" => "Mangaluru",
        "hassan" => "Hassan",
        _ => return raw.trim().to_string(),
    };
    canonical.to_string()
}

/// Resolve one prediction outside the chat flow: cache first, then the
/// service, storing successful results exactly like the dialogue path
pub async fn run_one_shot(
    predictor: &dyn Predictor,
    cache: &mut PredictionCache,
    input: PredictionInput,
    format: OutputFormat,
) -> Result<String> {
    if let Some(results) = cache.lookup(&input) {
        let results = results.clone();
        return Ok(format_output(&input, &results, format));
    }

    let results = predictor.predict(&input).await?;
    cache.store(input.clone(), results.clone());
    Ok(format_output(&input, &results, format))
}

fn format_output(
    input: &PredictionInput,
    results: &crate::predictor::PredictionResult,
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => format_results(results),
        OutputFormat::Json => {
            let payload = json!({
                "input": input,
                "results": results,
            });
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
        }
    }
}
