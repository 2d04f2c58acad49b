//! End-to-end parsing scenarios against the built-in models.

use dyeline_parse::{parse_style_text, Catalog, ColorCatalog, Model, ParseResult, StyleParser};

// ============================================================================
// Test helpers
// ============================================================================

fn parse(model: Model, text: &str) -> ParseResult {
    parse_style_text(text, &model.catalog(), &ColorCatalog::builtin())
}

fn assigned(result: &ParseResult) -> Vec<(String, String)> {
    result
        .assignments
        .iter()
        .map(|(part, hex)| (part.to_string(), hex.to_string()))
        .collect()
}

fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(p, h)| (p.to_string(), h.to_string()))
        .collect()
}

// ============================================================================
// Assignments
// ============================================================================

#[test]
fn named_and_hex_colors_across_clauses() {
    let result = parse(Model::Shoe, "laces black, mesh white, stripes #ff0000");
    assert_eq!(
        assigned(&result),
        pairs(&[
            ("laces", "#000000"),
            ("mesh", "#FFFFFF"),
            ("stripes", "#FF0000")
        ])
    );
    assert!(result.unknown_parts.is_empty());
    assert!(result.unknown_colors.is_empty());
}

#[test]
fn aliases_resolve_to_canonical_parts() {
    let result = parse(Model::Shoe, "make bottom grey and inside light blue");
    assert_eq!(
        assigned(&result),
        pairs(&[("sole", "#808080"), ("inner", "#60A5FA")])
    );
}

#[test]
fn single_color_is_broadcast() {
    let result = parse(Model::Shoe, "laces and mesh black");
    assert_eq!(
        assigned(&result),
        pairs(&[("laces", "#000000"), ("mesh", "#000000")])
    );
}

#[test]
fn color_before_part() {
    let result = parse(Model::Shoe, "black laces");
    assert_eq!(assigned(&result), pairs(&[("laces", "#000000")]));
}

#[test]
fn rgb_notation() {
    let result = parse(Model::Rocket, "hull rgb(255, 128, 0); fins rgba(0, 0, 0, 0.5)");
    assert_eq!(
        assigned(&result),
        pairs(&[("hull", "#FF8000"), ("wings", "#000000")])
    );
}

#[test]
fn parentheses_outside_rgb_split_clauses() {
    let result = parse(Model::Shoe, "laces (black, white)");
    assert_eq!(assigned(&result), pairs(&[("laces", "#000000")]));
    assert!(result.unknown_parts.is_empty());
}

#[test]
fn then_and_also_split_clauses() {
    let result = parse(Model::Teapot, "lid gold then pot navy also lid silver");
    assert_eq!(
        assigned(&result),
        pairs(&[("lid", "#C0C0C0"), ("base", "#0B1F3B")])
    );
    let order: Vec<&str> = result
        .matched_parts_in_order
        .iter()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(order, vec!["lid", "base", "lid"]);
}

#[test]
fn models_have_their_own_parts() {
    let result = parse(Model::Axe, "handle brown, head silver");
    assert_eq!(
        assigned(&result),
        pairs(&[("body", "#7C4A2D"), ("design", "#C0C0C0")])
    );

    let result = parse(Model::Insect, "carapace emerald");
    assert_eq!(assigned(&result), pairs(&[("shell", "#10B981")]));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn unknown_part_is_reported() {
    let result = parse(Model::Shoe, "tongue purple");
    assert!(result.assignments.is_empty());
    assert_eq!(result.unknown_parts.as_slice(), ["tongue"]);
}

#[test]
fn unknown_color_is_reported() {
    let result = parse(Model::Shoe, "laces galaxy purple");
    assert!(result.assignments.is_empty());
    assert!(result.unknown_colors.contains("galaxy purple"));
}

#[test]
fn known_clauses_survive_next_to_unknown_ones() {
    let result = parse(Model::Shoe, "tongue purple, laces cosmic blue, sole red");
    assert_eq!(assigned(&result), pairs(&[("sole", "#FF0000")]));
    assert_eq!(result.unknown_parts.as_slice(), ["tongue"]);
    assert_eq!(result.unknown_colors.as_slice(), ["cosmic blue"]);
}

#[test]
fn noise_is_harmless() {
    let result = parse(Model::Shoe, "!!! ??? 🤝");
    assert!(result.assignments.is_empty());
    assert!(result.matched_parts_in_order.is_empty());
}

#[test]
fn whitespace_only_is_empty() {
    assert!(parse(Model::Shoe, " \n ").is_empty());
}

// ============================================================================
// Custom catalogs
// ============================================================================

#[test]
fn custom_colors_and_model() {
    let catalog = Catalog::from_yaml(
        r##"
colors:
  ocean: "#0077be"
  black: "#111111"
models:
  Chair:
    parts: [seat, legs]
    aliases:
      cushion: seat
"##,
    )
    .unwrap();
    let chair = catalog.models.get("chair").unwrap();
    let parser = StyleParser::new(&chair.parts, &catalog.colors);

    let result = parser.parse("cushion ocean, legs black");
    assert_eq!(
        assigned(&result),
        pairs(&[("seat", "#0077BE"), ("legs", "#111111")])
    );

    // Built-in names are gone once the color table is replaced.
    let result = parser.parse("legs white");
    assert!(result.assignments.is_empty());
    assert_eq!(result.unknown_colors.as_slice(), ["legs white"]);
}

#[test]
fn parser_is_shareable_across_threads() {
    let parts = Model::Shoe.catalog();
    let colors = ColorCatalog::builtin();
    let parser = StyleParser::new(&parts, &colors);

    std::thread::scope(|scope| {
        let handles: Vec<_> = ["laces red", "mesh blue", "sole gold"]
            .into_iter()
            .map(|text| {
                let parser = &parser;
                scope.spawn(move || parser.parse(text).assignments.len())
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    });
}
