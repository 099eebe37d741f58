use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use colored::Colorize;
use forkprops_encode::{add_list, decode_indexed, set_classpath, Classpath};
use forkprops_env::{propagate, ProcessEnvironment};
use forkprops_loader::{load_properties, store_properties, write_properties_file};
use forkprops_merge::PropertyLayers;
use forkprops_store::{KeyValueSource, PropertyStore};
use tracing::{info, warn};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let format = cli.format;
    match cli.command {
        Command::Effective(args) => cmd_effective(args, format).map(|()| ExitCode::SUCCESS),
        Command::Show(args) => cmd_show(args, format).map(|()| ExitCode::SUCCESS),
        Command::Protected(args) => cmd_protected(args, format).map(|()| ExitCode::SUCCESS),
        Command::Run(args) => cmd_run(args),
    }
}

fn load_file(path: &Path) -> anyhow::Result<PropertyStore> {
    load_properties(Some(path))
        .with_context(|| format!("failed to load properties file {}", path.display()))
}

/// The current environment, sorted by name so the system layer is stable.
fn environment_snapshot() -> PropertyStore {
    let mut vars: Vec<(String, String)> = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect();
    vars.sort();
    PropertyStore::from_source(&vars)
}

/// Group `PREFIX=ITEM` pairs by prefix, keeping first-seen prefix order.
fn group_lists(pairs: &[(String, String)]) -> Vec<(&str, Vec<Option<&str>>)> {
    let mut groups: Vec<(&str, Vec<Option<&str>>)> = Vec::new();
    for (prefix, item) in pairs {
        match groups.iter_mut().find(|(p, _)| *p == prefix.as_str()) {
            Some((_, items)) => items.push(Some(item.as_str())),
            None => groups.push((prefix.as_str(), vec![Some(item.as_str())])),
        }
    }
    groups
}

pub(crate) fn effective_properties(args: &EffectiveArgs) -> anyhow::Result<PropertyStore> {
    let system = if args.inherit_env {
        Some(environment_snapshot())
    } else {
        args.system.as_deref().map(load_file).transpose()?
    };
    let explicit = args.explicit.as_deref().map(load_file).transpose()?;

    let layers = PropertyLayers {
        system: system.as_ref().map(|s| s as &dyn KeyValueSource),
        explicit: explicit.as_ref(),
        variables: Some(args.variables.as_slice()),
        user: Some(&args.user as &dyn KeyValueSource),
    };
    let store = layers.merge();

    for (prefix, items) in group_lists(&args.lists) {
        add_list(&store, items, prefix)?;
    }
    for (prefix, list) in &args.classpaths {
        set_classpath(&store, prefix, &Classpath::from_path_list(list));
    }
    Ok(store)
}

fn warn_protected(keys: &BTreeSet<String>) {
    if keys.is_empty() {
        return;
    }
    let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
    warn!(keys = %joined, "properties contain protected keys");
    eprintln!(
        "{} protected keys will not take effect as process globals: {}",
        "warning:".yellow().bold(),
        joined.yellow()
    );
}

fn print_store(store: &PropertyStore, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => store_properties(store, io::stdout().lock(), None)?,
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(store)?),
    }
    Ok(())
}

fn cmd_effective(args: EffectiveArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = effective_properties(&args)?;
    warn_protected(&store.protected_keys());

    match &args.out {
        Some(path) => {
            write_properties_file(&store, path, args.comment.as_deref())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Wrote {} properties to {}",
                "✓".green().bold(),
                store.len().to_string().bold(),
                path.display()
            );
        }
        None => print_store(&store, format)?,
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let store = load_file(&args.file)?;
    let Some(prefix) = &args.prefix else {
        return match format {
            OutputFormat::Json => print_store(&store, format),
            OutputFormat::Text => {
                if store.is_empty() {
                    println!("No properties.");
                }
                for (key, value) in store.entries() {
                    println!("{} = {}", key.bold(), value);
                }
                Ok(())
            }
        };
    };

    let values = decode_indexed(&store, prefix);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&values)?),
        OutputFormat::Text => {
            for (index, value) in values.iter().enumerate() {
                println!("{}{} = {}", prefix.cyan(), index.to_string().cyan(), value);
            }
        }
    }
    Ok(())
}

fn cmd_protected(args: ProtectedArgs, format: OutputFormat) -> anyhow::Result<()> {
    let keys = load_file(&args.file)?.protected_keys();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&keys)?),
        OutputFormat::Text if keys.is_empty() => println!("{} No protected keys.", "✓".green()),
        OutputFormat::Text => {
            for key in &keys {
                println!("  {} {}", "protected:".red(), key);
            }
        }
    }
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<ExitCode> {
    let store = load_file(&args.props)?;

    let protected = store.protected_keys();
    if !protected.is_empty() {
        if !args.allow_protected {
            let joined = protected.into_iter().collect::<Vec<_>>().join(", ");
            bail!(
                "refusing to propagate protected keys: {joined} \
                 (pass --allow-protected to override)"
            );
        }
        warn_protected(&protected);
    }

    let count = propagate(&store, &mut ProcessEnvironment::new())?;
    info!(count, file = %args.props.display(), "propagated properties");

    let (program, rest) = args
        .command
        .split_first()
        .context("no command given")?;
    io::stdout().flush()?;
    let status = std::process::Command::new(program)
        .args(rest)
        .status()
        .with_context(|| format!("failed to run {program}"))?;

    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from))
}
