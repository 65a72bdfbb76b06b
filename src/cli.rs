//! Minimal CLI: schema JSON → (check | Objective-C++ header)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::GenerateOptions;
use crate::generate::{generate, GeneratedFiles};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate native module schemas into Objective-C++ protocol headers
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct CommandLineInterface {
    /// log filter directive, e.g. `debug` or `modulegen_objc=trace` (RUST_LOG wins when set)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate one header per input schema
    Generate(GenerateOut),
    /// load, validate and translate without writing anything
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// header file stem (defaults to each input's file stem)
    #[arg(long)]
    module_spec_name: Option<String>,

    /// library named in the header comment
    #[arg(long, default_value = "app")]
    library_name: String,

    /// output directory (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn resolve(&self) -> Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")
    }
}

impl GenerateOut {
    fn options_for(&self, source_path: &Path) -> Result<GenerateOptions> {
        let module_spec_name = match &self.module_spec_name {
            Some(name) => name.clone(),
            None => source_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .with_context(|| format!("cannot derive a module spec name from {}", source_path.display()))?,
        };
        Ok(GenerateOptions::new(module_spec_name).with_library_name(&self.library_name))
    }

    fn write(&self, files: &GeneratedFiles) -> Result<()> {
        for (file_name, contents) in files {
            match self.out.as_ref() {
                Some(out) => {
                    std::fs::create_dir_all(out)
                        .with_context(|| format!("failed to create {}", out.display()))?;
                    let path = out.join(file_name);
                    std::fs::write(&path, contents)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote header");
                }
                None => println!("{contents}"),
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                let source_paths = target.input_settings.resolve()?;
                if target.module_spec_name.is_some() && source_paths.len() > 1 {
                    bail!("--module-spec-name names a single header but {} inputs were given", source_paths.len());
                }

                // independent schemas translate in parallel; results keep input order
                let results: Vec<(PathBuf, Result<GeneratedFiles>)> = source_paths
                    .into_par_iter()
                    .map(|source_path| {
                        let result = target
                            .options_for(&source_path)
                            .and_then(|options| generate_file(&source_path, &options));
                        (source_path, result)
                    })
                    .collect();

                let mut failed = 0;
                for (source_path, result) in &results {
                    match result {
                        Ok(files) => {
                            target.write(files)?;
                            report_ok(source_path);
                        }
                        Err(error) => {
                            failed += 1;
                            report_failure(source_path, error);
                        }
                    }
                }
                summarize(failed, results.len())
            }
            Command::Check(target) => {
                let source_paths = target.input_settings.resolve()?;
                let total = source_paths.len();
                let results: Vec<(PathBuf, Result<GeneratedFiles>)> = source_paths
                    .into_par_iter()
                    .map(|source_path| {
                        let result = generate_file(&source_path, &GenerateOptions::default());
                        (source_path, result)
                    })
                    .collect();

                let mut failed = 0;
                for (source_path, result) in &results {
                    match result {
                        Ok(_) => report_ok(source_path),
                        Err(error) => {
                            failed += 1;
                            report_failure(source_path, error);
                        }
                    }
                }
                summarize(failed, total)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn generate_file(source_path: &Path, options: &GenerateOptions) -> Result<GeneratedFiles> {
    let source_path_str = source_path.display();
    debug!(path = %source_path_str, "loading schema");
    let bytes = std::fs::read(source_path)
        .with_context(|| format!("failed to read schema file {source_path_str}"))?;
    let schema = crate::path_de::schema_from_slice(&bytes)
        .with_context(|| format!("failed to parse schema file {source_path_str}"))?;
    let files = generate(&schema, options)
        .with_context(|| format!("failed to generate from {source_path_str}"))?;
    Ok(files)
}

fn report_ok(source_path: &Path) {
    eprintln!("{} {}", "ok".green().bold(), source_path.display());
}

fn report_failure(source_path: &Path, error: &anyhow::Error) {
    eprintln!("{} {}: {error:#}", "failed".red().bold(), source_path.display());
}

fn summarize(failed: usize, total: usize) -> Result<()> {
    if failed > 0 {
        bail!("{failed} of {total} schema(s) failed");
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
