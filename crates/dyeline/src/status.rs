//! One-line status messages for an applied instruction.

use dyeline_parse::ParseResult;

/// Separator between the headline and each warning.
pub const STATUS_SEPARATOR: &str = " • ";

/// Summarizes a parse result the way the customizer reports it.
///
/// ```text
/// Applied: laces, mesh • Unknown colors: galaxy purple
/// No recognized parts found. • Ignored parts: tongue
/// No assignments applied. • Unknown colors: galaxy purple
/// ```
pub fn status_message(result: &ParseResult) -> String {
    let headline = if !result.assignments.is_empty() {
        let applied: Vec<&str> = result.assignments.keys().map(|k| k.as_str()).collect();
        format!("Applied: {}", applied.join(", "))
    } else if result.unknown_parts.is_empty() && !result.unknown_colors.is_empty() {
        "No assignments applied.".to_string()
    } else {
        "No recognized parts found.".to_string()
    };

    let mut message = headline;
    for warning in warnings(result) {
        message.push_str(STATUS_SEPARATOR);
        message.push_str(&warning);
    }
    message
}

fn warnings(result: &ParseResult) -> Vec<String> {
    let mut warnings = Vec::new();
    if !result.unknown_parts.is_empty() {
        warnings.push(format!(
            "Ignored parts: {}",
            result.unknown_parts.as_slice().join(", ")
        ));
    }
    if !result.unknown_colors.is_empty() {
        warnings.push(format!(
            "Unknown colors: {}",
            result.unknown_colors.as_slice().join(", ")
        ));
    }
    warnings
}
