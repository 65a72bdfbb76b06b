//! Golden-file runner: every `fixtures/*.json` schema is generated and compared
//! against the `.h` next to it. Pass `--bless` to rewrite the expected headers.
use std::path::{Path, PathBuf};

use modulegen_objc::{generate, path_de, GenerateOptions};
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());

fn normalize(text: &str) -> String {
    TRAILING_WHITESPACE.replace_all(text, "").into_owned()
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn run_fixture(schema_path: &Path, bless: bool) -> Result<bool, String> {
    let stem = schema_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| format!("no file stem: {}", schema_path.display()))?;
    let bytes = std::fs::read(schema_path).map_err(|error| error.to_string())?;
    let schema = path_de::schema_from_slice(&bytes).map_err(|error| error.to_string())?;
    let options = GenerateOptions::new(stem.clone()).with_library_name("fixtures");
    let files = generate(&schema, &options).map_err(|error| error.to_string())?;

    let mut passed = true;
    for (file_name, actual) in &files {
        let expected_path = schema_path.with_file_name(file_name);
        if bless {
            std::fs::write(&expected_path, actual).map_err(|error| error.to_string())?;
            eprintln!("📝 wrote {}", expected_path.display());
            continue;
        }
        if !expected_path.exists() {
            eprintln!("❌ {} is missing (run with --bless to create it)", expected_path.display());
            passed = false;
            continue;
        }
        let expected = std::fs::read_to_string(&expected_path).map_err(|error| error.to_string())?;
        if normalize(&expected) != normalize(actual) {
            eprintln!("❌ {} differs from generated output", expected_path.display());
            passed = false;
        }
    }
    Ok(passed)
}

fn main() {
    let bless = std::env::args().any(|arg| arg == "--bless");

    let mut schemas = std::fs::read_dir(fixtures_dir())
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    schemas.sort();

    let mut failures = 0;
    for schema_path in &schemas {
        match run_fixture(schema_path, bless) {
            Ok(true) => eprintln!("✅ {}", schema_path.display()),
            Ok(false) => failures += 1,
            Err(error) => {
                eprintln!("❌ {}: {error}", schema_path.display());
                failures += 1;
            }
        }
    }

    eprintln!("{} fixture(s), {failures} failure(s)", schemas.len());
    if failures > 0 {
        std::process::exit(1);
    }
}
