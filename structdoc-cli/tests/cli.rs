//! Integration tests driving the `structdoc` binary over real Go sources.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const TOOL_SOURCE: &str = r#"package testdata

// Tool describes a software tool definition
type Tool struct {
	// Name Human readable title representing the tool name
	Name string `yaml:"name"`
	// Ref A human readable but, machine safe identifier for the tool
	Ref ToolRef `yaml:"ref"`
	// Dependencies A slice of tool references
	Dependencies []ToolRef `yaml:"dependencies"`
	// Tags A slice of custom taxonomy
	Tags []string `yaml:"tags"`
	// Installs collection of install records
	Installs []*ToolInstall `yaml:"installs"`
}

// ToolRef represents a unique reference identifier for tools
type ToolRef string

// ToolInstall represents a single installation record
type ToolInstall struct {
	// ToolRef A human readable but machine safe identifier for the tool
	ToolRef string `yaml:"tool_ref"`
	// Version Semantic version string
	Version string `yaml:"version"`
	Platform string `json:"platform"`
}
"#;

fn run_structdoc(cwd: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_structdoc");
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run structdoc binary")
}

fn module_with(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("go.mod"),
        "module example.com/testdata\n\ngo 1.21\n",
    )
    .unwrap();
    for (name, content) in files {
        let path = tmp.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    tmp
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn renders_nested_outline_for_selected_struct() {
    let tmp = module_with(&[("tool.go", TOOL_SOURCE)]);
    let output = run_structdoc(tmp.path(), &["--dir", ".", "--struct", "Tool"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.starts_with("### tool.go#Tool\n\nTool describes a software tool definition\n\n"), "{out}");
    assert!(out.contains("# Name Human readable title representing the tool name\nname: <string>\n"));
    assert!(out.contains("dependencies: <[]ToolRef>\n# Tags"), "{out}");
    assert!(out.contains("installs: <[]*ToolInstall>\n-\n  # ToolRef A human readable"));
    assert!(out.contains("  tool_ref: <string>\n"));
    assert!(out.contains("  platform: <string>\n"), "non-yaml tag should fall back to the field name");
    assert!(!out.contains("### tool.go#ToolInstall"));
}

#[test]
fn renders_every_struct_in_name_order() {
    let tmp = module_with(&[("tool.go", TOOL_SOURCE)]);
    let output = run_structdoc(tmp.path(), &["--dir", "."]);
    assert!(output.status.success());

    let headers: Vec<String> = stdout(&output)
        .lines()
        .filter(|l| l.starts_with("### "))
        .map(str::to_string)
        .collect();
    assert_eq!(
        headers,
        vec!["### tool.go#Tool", "### tool.go#ToolInstall", "### tool.go#ToolRef"]
    );
}

#[test]
fn repeated_type_name_is_stripped_from_description() {
    let source = "package testdata\n\n// CoreArchiveExtractConfig Decompress a wide variety of archives\ntype CoreArchiveExtractConfig struct {\n\tRef string `yaml:\"ref\"`\n}\n";
    let tmp = module_with(&[("archive.go", source)]);
    let output = run_structdoc(tmp.path(), &["--dir", "."]);

    let out = stdout(&output);
    assert!(!out.contains("CoreArchiveExtractConfig Decompress"), "{out}");
    assert!(out.contains("\nDecompress a wide variety of archives\n"));
}

#[test]
fn embedded_and_recursive_structs() {
    let source = r#"package testdata

type Meta struct {
	// Common field
	ID string `yaml:"id"`
}

type FullItem struct {
	// Embedded metadata
	Meta
	// CustomName Another field
	CustomName string `yaml:"custom_name"`
	Children []FullItem `yaml:"children"`
}
"#;
    let tmp = module_with(&[("embedded.go", source)]);
    let output = run_structdoc(tmp.path(), &["--dir", ".", "--struct", "Full*"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("# Embedded metadata\nmeta: <Meta>\n  # Common field\n  id: <string>\n"), "{out}");
    assert!(out.contains("children: <[]FullItem>\n  # (recursive reference to FullItem)\n"));
}

#[test]
fn missing_go_mod_fails_unless_creation_allowed() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tool.go"), TOOL_SOURCE).unwrap();

    // A go.mod above the temp dir would change the outcome.
    if tmp.path().ancestors().skip(1).any(|d| d.join("go.mod").is_file()) {
        return;
    }

    let output = run_structdoc(tmp.path(), &["--dir", "."]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("no go.mod found"));
    assert!(!tmp.path().join("go.mod").exists());

    let output = run_structdoc(tmp.path(), &["--dir", ".", "--allow-create-go-mod"]);
    assert!(output.status.success());
    assert!(tmp.path().join("go.mod").is_file());
    assert!(stdout(&output).contains("### tool.go#Tool"));
}

#[test]
fn unmatched_pattern_reports_and_renders_nothing() {
    let tmp = module_with(&[("tool.go", TOOL_SOURCE)]);
    let output = run_structdoc(tmp.path(), &["--dir", ".", "--struct", "Widget*"]);
    assert!(!output.status.success());

    let out = stdout(&output);
    assert!(out.contains("No structs matched pattern 'Widget*'."));
    assert!(!out.contains("###"));
}

#[test]
fn missing_dir_flag_is_reported() {
    let tmp = TempDir::new().unwrap();
    let output = run_structdoc(tmp.path(), &[]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("--dir"));
}

#[test]
fn dir_filter_restricts_source_directories() {
    let tmp = module_with(&[
        ("api/request.go", "package api\n\ntype Request struct {\n\tID string\n}\n"),
        ("store/row.go", "package store\n\ntype Row struct {\n\tKey string\n}\n"),
    ]);
    let output = run_structdoc(tmp.path(), &["--dir", ".", "--dir-filter", "*/api"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("#Request"));
    assert!(!out.contains("#Row"));
}

#[test]
fn json_output_lists_selected_records() {
    let tmp = module_with(&[("tool.go", TOOL_SOURCE)]);
    let output = run_structdoc(tmp.path(), &["--dir", ".", "--struct", "ToolInstall", "--json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = value["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "ToolInstall");
    assert_eq!(records[0]["package"], "testdata");
    assert_eq!(records[0]["fields"][2]["name"], "Platform");
}

#[test]
fn gitignored_sources_are_documented() {
    let tmp = module_with(&[
        (".gitignore", "gen.go\n"),
        ("gen.go", "package testdata\n\ntype Generated struct {\n\tID string\n}\n"),
        ("_skip.go", "package testdata\n\ntype Skipped struct {\n\tID string\n}\n"),
    ]);
    fs::create_dir(tmp.path().join(".git")).unwrap();

    let output = run_structdoc(tmp.path(), &["--dir", "."]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("### gen.go#Generated"), "{out}");
    assert!(!out.contains("#Skipped"));
}

#[test]
fn header_path_climbs_out_of_the_working_directory() {
    let tmp = module_with(&[("api/tool.go", TOOL_SOURCE)]);
    let elsewhere = tmp.path().join("docs");
    fs::create_dir(&elsewhere).unwrap();

    let output = run_structdoc(&elsewhere, &["--dir", "../api", "--struct", "ToolInstall"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("### ../api/tool.go#ToolInstall\n"));
}
