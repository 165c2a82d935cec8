//! Integration test: translate the txtar fixtures in `tests/testdata/`
//!
//! Each archive carries the Selenium table as `input.html` (plus any other
//! files it needs) and lists its expectations in the comment section, one
//! per line:
//!
//! ```text
//! # section comment
//! lint                   run in lint mode
//! templates DIR          use the extracted DIR instead of the built-in templates
//! assertions N           declared assertion total
//! warnings N
//! errors N
//! emitted | suppressed   whether the script was written
//! contains TEXT          the output contains TEXT
//! !contains TEXT         the output does not contain TEXT
//! ```
//!
//! Usage:
//!   cargo test --test integration
//!   FIXTURE_VERBOSE=1 cargo test --test integration   # print every output

use std::path::{Path, PathBuf};

use sel2casper::{run, RunConfig};

#[derive(Debug, Default)]
struct Fixture {
    lint: bool,
    templates: Option<String>,
    checks: Vec<Check>,
}

#[derive(Debug)]
enum Check {
    Assertions(usize),
    Warnings(usize),
    Errors(usize),
    Emitted(bool),
    Contains(String),
    NotContains(String),
}

fn parse_fixture(comment: &str) -> Result<Fixture, String> {
    let mut fixture = Fixture::default();
    for (i, line) in comment.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let count = || rest.trim().parse::<usize>().map_err(|e| format!("line {}: {}: {}", i + 1, line, e));
        match word {
            "lint" => fixture.lint = true,
            "templates" => fixture.templates = Some(rest.trim().to_string()),
            "assertions" => fixture.checks.push(Check::Assertions(count()?)),
            "warnings" => fixture.checks.push(Check::Warnings(count()?)),
            "errors" => fixture.checks.push(Check::Errors(count()?)),
            "emitted" => fixture.checks.push(Check::Emitted(true)),
            "suppressed" => fixture.checks.push(Check::Emitted(false)),
            "contains" => fixture.checks.push(Check::Contains(rest.to_string())),
            "!contains" => fixture.checks.push(Check::NotContains(rest.to_string())),
            _ => return Err(format!("line {}: unknown directive {:?}", i + 1, word)),
        }
    }
    Ok(fixture)
}

fn run_fixture(file: &Path) -> Result<String, String> {
    let data = std::fs::read_to_string(file).map_err(|e| format!("failed to read file: {}", e))?;
    let archive = emx_txtar::Decoder::new()
        .decode(&data)
        .map_err(|e| format!("failed to parse txtar: {}", e))?;
    let fixture = parse_fixture(&archive.comment)?;

    let workdir = tempfile::Builder::new()
        .prefix("sel2casper-")
        .tempdir()
        .map_err(|e| format!("failed to create workdir: {}", e))?;
    for f in &archive.files {
        let path = workdir.path().join(&f.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        std::fs::write(&path, &f.data).map_err(|e| format!("{}: {}", f.name, e))?;
    }

    let mut config = RunConfig::new(workdir.path().join("input.html")).lint(fixture.lint);
    if let Some(ref dir) = fixture.templates {
        config = config.templates(workdir.path().join(dir));
    }
    let translation = run(&config).map_err(|e| e.to_string())?;
    let output = &translation.output;

    let mut failures = Vec::new();
    for check in &fixture.checks {
        let failure = match check {
            Check::Assertions(n) if translation.result.assertions != *n => {
                Some(format!("assertions: got {}, want {}", translation.result.assertions, n))
            }
            Check::Warnings(n) if translation.warning_count() != *n => {
                Some(format!("warnings: got {:?}, want {}", translation.result.warnings, n))
            }
            Check::Errors(n) if translation.error_count() != *n => {
                Some(format!("errors: got {:?}, want {}", translation.result.errors, n))
            }
            Check::Emitted(want) if translation.emitted != *want => {
                Some(format!("emitted: got {}, want {}", translation.emitted, want))
            }
            Check::Contains(text) if !output.contains(text.as_str()) => {
                Some(format!("output does not contain {:?}", text))
            }
            Check::NotContains(text) if output.contains(text.as_str()) => {
                Some(format!("output contains {:?}", text))
            }
            _ => None,
        };
        failures.extend(failure);
    }

    if failures.is_empty() {
        Ok(translation.output)
    } else {
        Err(format!("{}\n--- output ---\n{}", failures.join("\n"), output))
    }
}

fn fixtures() -> Vec<PathBuf> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/testdata");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("{}: {}", dir.display(), e))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(false, |ext| ext == "txtar"))
        .collect();
    files.sort();
    files
}

#[test]
fn testdata_all() {
    let verbose = std::env::var("FIXTURE_VERBOSE").is_ok();
    let files = fixtures();
    assert!(!files.is_empty(), "no fixtures found");

    let mut failed = 0;
    for file in &files {
        let name = file.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown");
        match run_fixture(file) {
            Ok(output) => {
                eprintln!("PASS  {}", name);
                if verbose {
                    for line in output.lines() {
                        eprintln!("      {}", line);
                    }
                }
            }
            Err(err) => {
                failed += 1;
                eprintln!("FAIL  {}", name);
                for line in err.lines() {
                    eprintln!("      {}", line);
                }
            }
        }
    }

    eprintln!("\n{} passed, {} failed", files.len() - failed, failed);
    if failed > 0 {
        panic!("{} fixture(s) failed", failed);
    }
}

#[test]
fn test_missing_template_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.html");
    std::fs::write(&input, "<tr><td>open</td><td>/</td><td></td></tr>").unwrap();

    let config = RunConfig::new(&input).templates(dir.path().join("no-such-dir"));
    let err = run(&config).unwrap_err();
    assert_eq!(err.kind, sel2casper::ErrorKind::Io);
}

#[test]
fn test_template_dir_without_header_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let templates = dir.path().join("templates");
    std::fs::create_dir(&templates).unwrap();
    std::fs::write(templates.join("commandlist.txt"), "open\n").unwrap();
    std::fs::write(templates.join("commandDocs.js"), "").unwrap();
    std::fs::write(templates.join("open_cmd_impl.js"), "casper.thenOpen({{ quoted_target }});\n").unwrap();
    let input = dir.path().join("input.html");
    std::fs::write(&input, "<tr><td>open</td><td>/</td><td></td></tr>").unwrap();

    let err = run(&RunConfig::new(&input).templates(&templates)).unwrap_err();
    assert!(err.is_missing_template(), "{}", err);
    assert_eq!(err.template.as_deref(), Some("common_start.js"));
}
