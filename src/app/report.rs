use crate::core::matcher::TimeWindow;
use crate::core::search::SearchOutcome;
use crate::core::{CombinationShape, MatchResult, Recipe, Result};
use crate::utils::error::MealError;
use serde::Serialize;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    shape: String,
    target_minutes: u32,
    window: TimeWindow,
    catalog_size: usize,
    warnings: &'a [String],
    results: Vec<RankedMatch<'a>>,
}

#[derive(Serialize)]
struct RankedMatch<'a> {
    rank: usize,
    deviation: u32,
    #[serde(flatten)]
    result: &'a MatchResult,
}

#[derive(Serialize)]
struct CsvMatchRow {
    rank: usize,
    shape: String,
    total_time: u32,
    deviation: u32,
    recipe_ids: String,
    recipe_names: String,
}

pub fn render(outcome: &SearchOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(outcome)),
        OutputFormat::Json => render_json(outcome),
        OutputFormat::Csv => render_csv(outcome),
    }
}

fn render_table(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    for warning in &outcome.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }

    let _ = writeln!(
        out,
        "{} · target {} min (window {}-{}) · {} recipe(s) searched",
        outcome.shape,
        outcome.target_minutes,
        outcome.window.min,
        outcome.window.max,
        outcome.catalog_size
    );

    if outcome.results.is_empty() {
        let _ = writeln!(
            out,
            "No combination of {} fits {}-{} minutes.",
            outcome.shape, outcome.window.min, outcome.window.max
        );
        return out;
    }

    for (index, result) in outcome.results.iter().enumerate() {
        let dishes = result
            .recipes
            .iter()
            .map(|r| format!("#{} {} [{}]", r.id, r.name, r.total_time()))
            .collect::<Vec<_>>()
            .join(" + ");
        let _ = writeln!(
            out,
            "{:>2}. {} min (±{})  {}",
            index + 1,
            result.total_time,
            result.deviation_from(outcome.target_minutes),
            dishes
        );
    }
    out
}

fn render_json(outcome: &SearchOutcome) -> Result<String> {
    let report = JsonReport {
        shape: outcome.shape.label(),
        target_minutes: outcome.target_minutes,
        window: outcome.window,
        catalog_size: outcome.catalog_size,
        warnings: &outcome.warnings,
        results: outcome
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| RankedMatch {
                rank: index + 1,
                deviation: result.deviation_from(outcome.target_minutes),
                result,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_csv(outcome: &SearchOutcome) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (index, result) in outcome.results.iter().enumerate() {
        writer.serialize(CsvMatchRow {
            rank: index + 1,
            shape: result.shape_label.clone(),
            total_time: result.total_time,
            deviation: result.deviation_from(outcome.target_minutes),
            recipe_ids: result
                .recipe_ids()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(";"),
            recipe_names: result
                .recipes
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(";"),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| MealError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| MealError::ValidationError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn render_recipes(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes.\n".to_string();
    }

    let mut out = String::new();
    for r in recipes {
        let _ = writeln!(
            out,
            "#{:<4} {:<28} {:<9} {:<6} {:>3} + {:>3} = {:>3} min",
            r.id,
            r.name,
            r.category,
            r.difficulty,
            r.prep_time,
            r.cook_time,
            r.total_time()
        );
    }
    out
}

pub fn render_shapes() -> String {
    let mut out = String::new();
    for shape in CombinationShape::presets() {
        let _ = writeln!(out, "{:<24} {} dish(es)", shape.label(), shape.arity());
    }
    out
}
