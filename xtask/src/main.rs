//! Developer tasks (schema generation, fixture conformance, rule catalog checks).
//!
//! Keeping this separate keeps the library crates free of tooling dependencies.

use anyhow::{Context, bail};
use infraguard_app::{ScanInput, load_state_file, run_scan, serialize_report};
use infraguard_domain::Registry;
use infraguard_settings::Overrides;
use infraguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(infraguard_types::ScanReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(infraguard_settings::InfraguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "infraguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "infraguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    for name in &missing {
        eprintln!("  missing: {name}");
    }
    for name in &mismatched {
        eprintln!("  out of date: {name}");
    }
    bail!("schemas are stale; run `cargo run -p xtask -- emit-schemas`")
}

/// Scan every fixture and check the reports.
///
/// For each `tests/fixtures/<name>/state.json`:
/// 1. the report validates against the generated report schema
/// 2. two scans produce the same report once timestamps and version are normalized
/// 3. every location is a clean relative path
///
/// Fixtures named `malformed_*` must fail to load instead.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("report schema")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {e}"))?;
    let registry = Registry::builtin().context("build builtin registry")?;

    let root = fixtures_dir()?;
    let mut checked = 0;
    let mut errors = Vec::new();

    for entry in WalkDir::new(&root).min_depth(2).max_depth(2).sort_by_file_name() {
        let entry = entry.context("walk fixtures")?;
        if entry.file_name() != "state.json" {
            continue;
        }
        let dir = entry.path().parent().unwrap_or(root.as_path());
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let state_path = camino::Utf8PathBuf::from_path_buf(entry.path().to_path_buf())
            .map_err(|p| anyhow::anyhow!("non-UTF-8 fixture path: {}", p.display()))?;

        let loaded = load_state_file(&state_path);
        if name.starts_with("malformed_") {
            if loaded.is_ok() {
                errors.push(format!("{name}: expected state to be rejected"));
            }
            checked += 1;
            continue;
        }
        let state = match loaded {
            Ok(state) => state,
            Err(e) => {
                errors.push(format!("{name}: {e:#}"));
                continue;
            }
        };

        let config_text = fs::read_to_string(dir.join("infraguard.toml")).unwrap_or_default();
        let scan = || -> anyhow::Result<serde_json::Value> {
            let output = run_scan(
                &registry,
                ScanInput {
                    state: &state,
                    config_text: &config_text,
                    overrides: Overrides::default(),
                    cancel: None,
                },
            )?;
            let bytes = serialize_report(&output.report)?;
            Ok(serde_json::from_slice(&bytes)?)
        };

        let first = scan().with_context(|| format!("scan fixture {name}"))?;
        let second = scan().with_context(|| format!("rescan fixture {name}"))?;

        for error in validator.iter_errors(&first) {
            errors.push(format!("{name}: schema violation: {error}"));
        }
        if normalize_nondeterministic(first.clone()) != normalize_nondeterministic(second) {
            errors.push(format!("{name}: report differs between runs"));
        }
        for file in location_files(&first) {
            if !is_clean_path(&file) {
                errors.push(format!("{name}: unclean location path '{file}'"));
            }
        }
        checked += 1;
    }

    if checked == 0 {
        bail!("no fixtures found under {}", root.display());
    }
    if errors.is_empty() {
        println!("✓ {checked} fixtures conform");
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("conformance failed with {} errors", errors.len())
}

fn location_files(report: &serde_json::Value) -> Vec<String> {
    report["results"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|r| r["location"]["filename"].as_str())
        .map(str::to_string)
        .collect()
}

fn is_clean_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && !path.split('/').any(|seg| seg == "..")
}

/// Check every builtin rule is well-formed and has a stable id constant.
fn rule_coverage() -> anyhow::Result<()> {
    use infraguard_types::ids;

    let known = [
        ids::RULE_AWS_S3_ENABLE_VERSIONING,
        ids::RULE_AWS_S3_IGNORE_PUBLIC_ACLS,
        ids::RULE_AWS_S3_BLOCK_PUBLIC_ACLS,
        ids::RULE_AWS_S3_BLOCK_PUBLIC_POLICY,
        ids::RULE_AWS_S3_NO_PUBLIC_BUCKETS,
        ids::RULE_AWS_S3_ENABLE_BUCKET_ENCRYPTION,
        ids::RULE_AWS_S3_ENABLE_BUCKET_LOGGING,
        ids::RULE_AWS_CLOUDTRAIL_ENABLE_ALL_REGIONS,
        ids::RULE_AWS_CLOUDTRAIL_ENABLE_LOG_VALIDATION,
    ];

    let registry = Registry::builtin().context("build builtin registry")?;
    let mut errors = Vec::new();

    for rule in registry.all() {
        let def = rule.definition();
        let id = def.long_id();
        if !known.contains(&id.as_str()) {
            errors.push(format!("Rule '{id}' has no id constant"));
        }
        if def.explanation.trim().is_empty() {
            errors.push(format!("Rule '{id}' has empty explanation"));
        }
        if def.links.is_empty() {
            errors.push(format!("Rule '{id}' has no reference links"));
        }
    }
    for id in known {
        if !registry.contains(id) {
            errors.push(format!("Id constant '{id}' has no registered rule"));
        }
    }

    if errors.is_empty() {
        println!("✓ {} rules registered and documented", registry.len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("rule coverage failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  emit-schemas      Generate JSON schemas into schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  conform           Scan every fixture and validate the reports");
    eprintln!("  rule-coverage     Check the builtin rule catalog is complete and documented");
    eprintln!("  print-schema-ids  List generated schema ids");
    eprintln!("  help              Show this message");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "rule-coverage" => rule_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo run -p xtask -- help` for usage."),
    }
    .context("xtask failed")
}
