use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use colored::Colorize;
use tracing::debug;
use vdiff_diff::{
    apply_mapping, apply_sequence, diff_mappings, diff_sequences, EqualityConfig, ValueEquality,
};
use vdiff_types::{DiffOp, Key, OpSummary, Value};
use vdiff_wire::WireCodec;

use crate::cli::*;

/// A script computed from two documents of the same collection kind.
#[derive(Debug, PartialEq)]
pub enum Script {
    Sequence(Vec<DiffOp<usize>>),
    Mapping(Vec<DiffOp<Key>>),
}

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let equality = load_equality(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, equality, cli.format),
        Command::Patch(args) => cmd_patch(args, cli.format),
        Command::Eq(args) => cmd_eq(args, equality),
    }
}

fn cmd_diff(
    args: DiffArgs,
    equality: ValueEquality,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let source = load_document(&args.source)?;
    let target = load_document(&args.target)?;
    let script = compute_script(&source, &target, &equality)?;
    println!("{}", render_script(&script, format)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_patch(args: PatchArgs, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let source = load_document(&args.source)?;
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let patched = apply_script(&source, &text)?;
    println!("{}", render_document(&patched, format)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_eq(args: EqArgs, equality: ValueEquality) -> anyhow::Result<ExitCode> {
    let left = load_document(&args.left)?;
    let right = load_document(&args.right)?;
    if equality.equals(&left, &right) {
        println!("{} documents are equal", "✓".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} documents differ", "✗".red().bold());
        Ok(ExitCode::from(1))
    }
}

/// Read the comparator tolerances, falling back to defaults without a file.
pub fn load_equality(path: Option<&Path>) -> anyhow::Result<ValueEquality> {
    let Some(path) = path else {
        return Ok(ValueEquality::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = EqualityConfig::from_toml_str(&text)
        .with_context(|| format!("loading config {}", path.display()))?;
    debug!(?config, "comparator configured");
    Ok(config.equality())
}

pub fn load_document(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {} as JSON", path.display()))?;
    Ok(Value::from_json(json))
}

/// Diff two arrays positionally or two objects by key.
pub fn compute_script(
    source: &Value,
    target: &Value,
    equality: &ValueEquality,
) -> anyhow::Result<Script> {
    match (source, target) {
        (Value::Seq(old), Value::Seq(new)) => {
            Ok(Script::Sequence(diff_sequences(old, new, equality)))
        }
        (Value::Map(old), Value::Map(new)) => {
            Ok(Script::Mapping(diff_mappings(old, new, equality)))
        }
        _ => bail!(
            "cannot diff a {} against a {}: both documents must be arrays or both objects",
            source.kind_name(),
            target.kind_name()
        ),
    }
}

/// Decode `script_text` for the source's collection kind and replay it.
pub fn apply_script(source: &Value, script_text: &str) -> anyhow::Result<Value> {
    match source {
        Value::Seq(items) => {
            let ops: Vec<DiffOp<usize>> = WireCodec::decode_script(script_text)?;
            Ok(Value::Seq(apply_sequence(items, &ops)?))
        }
        Value::Map(entries) => {
            let ops: Vec<DiffOp<Key>> = WireCodec::decode_script(script_text)?;
            Ok(Value::Map(apply_mapping(entries, &ops)?))
        }
        other => bail!("cannot patch a {}: source must be an array or object", other.kind_name()),
    }
}

pub fn render_script(script: &Script, format: OutputFormat) -> anyhow::Result<String> {
    match (script, format) {
        (Script::Sequence(ops), OutputFormat::Json) => Ok(WireCodec::encode_script(ops)?),
        (Script::Mapping(ops), OutputFormat::Json) => Ok(WireCodec::encode_script(ops)?),
        (Script::Sequence(ops), OutputFormat::Text) => Ok(render_text(ops)),
        (Script::Mapping(ops), OutputFormat::Text) => Ok(render_text(ops)),
    }
}

/// Render a patched document: indented for reading, compact for piping.
pub fn render_document(document: &Value, format: OutputFormat) -> anyhow::Result<String> {
    let json = document.to_json()?;
    Ok(match format {
        OutputFormat::Text => serde_json::to_string_pretty(&json)?,
        OutputFormat::Json => serde_json::to_string(&json)?,
    })
}

fn render_text<K: std::fmt::Display>(ops: &[DiffOp<K>]) -> String {
    let summary = OpSummary::of(ops);
    if summary.is_empty() {
        return "No changes.".to_string();
    }

    let mut lines: Vec<String> = ops
        .iter()
        .map(|op| {
            let marker = match op {
                DiffOp::Addition { .. } => "+".green(),
                DiffOp::Deletion { .. } => "-".red(),
                DiffOp::Update { .. } => "~".yellow(),
                DiffOp::Movement { .. } => ">".cyan(),
            };
            format!("  {marker} {op}")
        })
        .collect();
    lines.push(format!(
        "{} additions, {} deletions, {} updates, {} movements",
        summary.additions.to_string().bold(),
        summary.deletions.to_string().bold(),
        summary.updates.to_string().bold(),
        summary.movements.to_string().bold(),
    ));
    lines.join("\n")
}
