//! End-to-end tests for the `dyeline` command surface.

use std::io::Write;

use clap::Parser;
use insta::assert_snapshot;

use dyeline::cli::{run, Cli};

// ============================================================================
// Test helpers
// ============================================================================

fn try_dyeline(args: &[&str], stdin: &str) -> anyhow::Result<String> {
    let argv = ["dyeline", "--color", "never"].iter().chain(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut input = stdin.as_bytes();
    let mut out = Vec::new();
    run(&cli, &mut input, &mut out)?;
    Ok(String::from_utf8(out).unwrap().trim_end().to_string())
}

fn dyeline(args: &[&str], stdin: &str) -> String {
    try_dyeline(args, stdin).unwrap()
}

fn catalog_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const LAMP: &str = r##"
colors:
  ocean: "#0077be"
  sand: "#e2ca76"
models:
  Lamp:
    parts: [shade, stand]
    aliases:
      base: stand
"##;

// ============================================================================
// parse
// ============================================================================

#[test]
fn parse_prints_assignments() {
    let output = dyeline(&["parse", "laces black, mesh white, stripes #ff0000"], "");
    assert_snapshot!(output, @r"
    laces   #000000
    mesh    #FFFFFF
    stripes #FF0000
    ");
}

#[test]
fn parse_reads_stdin() {
    let output = dyeline(&["parse", "-m", "rocket"], "fins silver\nhull rgb(255, 0, 0)\n");
    assert_snapshot!(output, @r"
    wings #C0C0C0
    hull  #FF0000
    ");
}

#[test]
fn parse_reports_diagnostics() {
    let output = dyeline(&["parse", "tongue purple, laces galaxy purple"], "");
    assert_snapshot!(output, @r"
    No assignments.
    Ignored parts: tongue
    Unknown colors: galaxy purple
    ");
}

#[test]
fn parse_as_json() {
    let output = dyeline(&["parse", "-f", "json", "tongue purple"], "");
    assert_snapshot!(output, @r##"
    {
      "assignments": {},
      "unknown_parts": [
        "tongue"
      ],
      "unknown_colors": [],
      "matched_parts_in_order": []
    }
    "##);
}

// ============================================================================
// apply
// ============================================================================

#[test]
fn apply_prints_status_and_table() {
    let output = dyeline(&["apply", "-m", "teapot", "pot navy, lid gold"], "");
    assert_snapshot!(output, @r"
    Applied: base, lid
    Teapot
    > lid  #D4AF37
      base #0B1F3B
    ");
}

#[test]
fn apply_without_matches_keeps_defaults() {
    let output = dyeline(&["apply", "-m", "insect", "wings gold"], "");
    assert_snapshot!(output, @r"
    No recognized parts found. • Ignored parts: wings
    Insect
      shell #D3D3D3
      body  #A8A8A8
    ");
}

#[test]
fn apply_as_json() {
    let output = dyeline(&["apply", "-m", "insect", "-f", "json", "shell red"], "");
    assert_snapshot!(output, @r##"
    {
      "status": "Applied: shell",
      "model": "Insect",
      "applied": {
        "parts": [
          "shell"
        ],
        "selected": "shell"
      },
      "selected_part": "shell",
      "colors": {
        "shell": "#FF0000",
        "body": "#A8A8A8"
      }
    }
    "##);
}

// ============================================================================
// shell
// ============================================================================

#[test]
fn shell_session() {
    let session = "\
laces black
:show
:model rocket
hull galaxy blue
:model chair
:reset
:bogus
:quit
laces red
";
    let output = dyeline(&["shell"], session);
    assert_snapshot!(output, @r"
    Applied: laces
    Shoe
    > laces   #000000
      mesh    #FFFFFF
      caps    #FFFFFF
      inner   #FFFFFF
      sole    #FFFFFF
      stripes #FFFFFF
      band    #FFFFFF
      patch   #FFFFFF
    Model: Rocket
    No assignments applied. • Unknown colors: galaxy blue
    unknown model 'chair' (available: Shoe, Rocket, Axe, Insect, Teapot)
    Reset Rocket
    unknown command ':bogus' (try :model, :reset, :show, :quit)
    ");
}

#[test]
fn shell_keeps_tables_per_model() {
    let session = "sole red\n:model axe\nhandle brown\n:model shoe\n:show\n";
    let output = dyeline(&["shell"], session);
    assert!(output.contains("  sole    #FF0000"));
    assert!(!output.contains("> sole"));
}

// ============================================================================
// catalogs
// ============================================================================

#[test]
fn catalog_file_adds_models_and_colors() {
    let file = catalog_file(".yaml", LAMP);
    let path = file.path().to_str().unwrap();

    let output = dyeline(&["--catalog", path, "apply", "-m", "lamp", "base sand, shade ocean"], "");
    assert_snapshot!(output, @r"
    Applied: stand, shade
    Lamp
    > shade #0077BE
      stand #E2CA76
    ");

    let output = dyeline(&["--catalog", path, "colors", "-f", "json"], "");
    assert_snapshot!(output, @r##"
    {
      "ocean": "#0077BE",
      "sand": "#E2CA76"
    }
    "##);
}

#[test]
fn models_lists_builtins_and_catalog_models() {
    let output = dyeline(&["models"], "");
    assert!(output.starts_with("Shoe\n  parts:   laces, mesh, caps"));
    assert!(output.contains("Teapot\n  parts:   lid, base\n  aliases: pot → base"));

    let file = catalog_file(".json", r#"{"models": {"Mug": {"parts": ["cup"]}}}"#);
    let output = dyeline(&["--catalog", file.path().to_str().unwrap(), "models"], "");
    assert!(output.ends_with("Mug\n  parts:   cup"));
}

#[test]
fn colors_lists_builtin_table() {
    let output = dyeline(&["colors"], "");
    assert_eq!(output.lines().count(), 28);
    assert!(output.contains("light blue #60A5FA"));
}

// ============================================================================
// errors
// ============================================================================

#[test]
fn unknown_model_fails() {
    let err = try_dyeline(&["apply", "-m", "chair", "seat red"], "").unwrap_err();
    assert_snapshot!(format!("{:#}", err), @"unknown model 'chair' (available: Shoe, Rocket, Axe, Insect, Teapot)");
}

#[test]
fn broken_catalog_fails_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let err = try_dyeline(&["--catalog", missing.to_str().unwrap(), "colors"], "").unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.starts_with("failed to load catalog"));
    assert!(message.contains("missing.yaml"));

    let file = catalog_file(".yaml", "models:\n  X:\n    parts: [a]\n    aliases: {b: c}\n");
    let err = try_dyeline(&["--catalog", file.path().to_str().unwrap(), "models"], "").unwrap_err();
    assert!(format!("{:#}", err).contains("alias 'b' targets unknown part 'c'"));
}
