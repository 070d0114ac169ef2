//! Small text helpers used by recipe pages.

use regex::Regex;
use std::sync::OnceLock;

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+)\s*(hour|min|minute)s?").expect("duration pattern is valid")
    })
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(.*)").expect("amount pattern is valid"))
}

/// Converts a cook time such as `"45 mins"` or `"1 hour"` to minutes.
///
/// Only the first duration in the text counts. Text without a recognisable
/// duration is 0 minutes.
pub fn time_to_minutes(text: &str) -> u32 {
    let Some(caps) = duration_regex().captures(text) else {
        return 0;
    };
    let value: u32 = caps[1].parse().unwrap_or(0);
    if caps[2].to_lowercase().starts_with("hour") {
        value.saturating_mul(60)
    } else {
        value
    }
}

/// Scales the leading amount of every ingredient line by
/// `servings / original_servings`.
///
/// Scaled amounts are written with one decimal (`"2 cups"` at 1.5x becomes
/// `"3.0 cups"`, `0.25` becomes `0.3`); text before the amount is kept. Lines without a number,
/// and every line when `original_servings` is not positive, come back
/// unchanged.
pub fn scale_ingredients<S: AsRef<str>>(
    servings: f64,
    original_servings: f64,
    ingredients: &[S],
) -> Vec<String> {
    if original_servings <= 0.0 || !original_servings.is_finite() || !servings.is_finite() {
        return ingredients.iter().map(|i| i.as_ref().to_string()).collect();
    }
    let factor = servings / original_servings;

    ingredients
        .iter()
        .map(|ingredient| scale_line(ingredient.as_ref(), factor))
        .collect()
}

fn scale_line(line: &str, factor: f64) -> String {
    let Some(caps) = amount_regex().captures(line) else {
        return line.to_string();
    };
    let (Some(whole), Ok(amount)) = (caps.get(0), caps[1].parse::<f64>()) else {
        return line.to_string();
    };
    let prefix = &line[..whole.start()];
    // Halves round away from zero, as the site's toFixed(1) does
    let scaled = (amount * factor * 10.0).round() / 10.0;
    format!("{}{:.1} {}", prefix, scaled, &caps[2])
}

/// Numbers lines from 1, one per line: `"1. a\n2. b"`.
pub fn numbered_list<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| format!("{}. {}", index + 1, line.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
