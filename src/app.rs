//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! and dispatches the requested file-tree operation.
//!
//! Exit hooks:
//! - Releasing the log guard (flushing the file appender) is itself an exit
//!   hook, so it runs both on Ctrl-C and on normal completion.
//! - `delete` registers a warning hook for the duration of the walk, since an
//!   interrupted deletion leaves a partially removed tree behind.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::CommandFactory;
use std::io;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;
use tracing::{debug, error, info};

use fshelper::cli::{Args, Command};
use fshelper::config::load_config_from_xml;
use fshelper::output as out;
use fshelper::{
    create_default_file, create_directories, create_file, create_parent_directories,
    default_config_path, delete, get_last_modified, new_buffered_reader, run_exit_hooks,
    set_last_modified, write, DeferredWork, DefaultsDir, FsHelperError, HookError, NoDefaults,
    ShutdownHook,
};

use crate::logging::init_tracing;

/// Exit status for an error that escaped `run`.
pub fn exit_code_for(e: &anyhow::Error) -> u8 {
    if let Some(fe) = e.downcast_ref::<FsHelperError>() {
        return fe.code() as u8;
    }
    if let Some(he) = e.downcast_ref::<HookError>() {
        return he.code() as u8;
    }
    1
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("fshelper config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file exists at that location.");
                } else {
                    out::print_info("No config file exists there; built-in defaults are used.");
                }
            }
            None => out::print_error("Could not determine a default config path."),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = args.command.clone() else {
        Args::command().print_help()?;
        return Ok(ExitCode::from(2));
    };

    // Config file first, CLI flags win.
    let mut cfg = load_config_from_xml()?.unwrap_or_default();
    args.apply_overrides(&mut cfg);

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    let guard_slot = Arc::new(Mutex::new(guard));
    let flush_logs = {
        let guard_slot = Arc::clone(&guard_slot);
        ShutdownHook::new(DeferredWork::new("flush-logs", move || {
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // dropping the guard flushes tracing_appender
            }
        }))
    };
    flush_logs.register()?;

    ctrlc::set_handler(|| {
        out::print_warn("Received interrupt; running exit hooks...");
        run_exit_hooks();
        std::process::exit(130);
    })
    .context("install signal handler")?;

    debug!(?command, "Starting fshelper");
    let result = dispatch(&command, cfg.defaults_dir.as_deref());
    if let Err(e) = &result {
        match e.downcast_ref::<FsHelperError>() {
            Some(FsHelperError::Io { op, path, .. }) => {
                error!(code = 1, op = *op, path = %path.display(), "Operation failed: {e:#}")
            }
            Some(FsHelperError::NullArgument(name)) => {
                error!(code = 2, argument = *name, "Missing argument")
            }
            None => error!(error = ?e, "Operation failed"),
        }
    }

    // Normal termination: drain exit hooks so logs are flushed.
    run_exit_hooks();
    result.map(|()| ExitCode::SUCCESS)
}

fn dispatch(command: &Command, defaults_dir: Option<&std::path::Path>) -> Result<()> {
    match command {
        Command::Delete { path } => {
            let warn_path = path.clone();
            let interrupted = ShutdownHook::new(DeferredWork::new("partial-delete-warning", move || {
                out::print_warn(&format!(
                    "Interrupted while deleting '{}'; it may be partially removed.",
                    warn_path.display()
                ));
            }));
            interrupted.register()?;
            let res = delete(path);
            interrupted.unregister()?;
            res?;
        }
        Command::Touch { path } => create_file(path)?,
        Command::Mkdir { path } => create_directories(path)?,
        Command::Mkparents { path } => create_parent_directories(path)?,
        Command::Default { path } => match defaults_dir {
            Some(dir) => create_default_file(path, &DefaultsDir::new(dir))?,
            None => create_default_file(path, &NoDefaults)?,
        },
        Command::Write { path, text } => write(path, text)?,
        Command::Read { path } => {
            let mut reader = new_buffered_reader(path)?;
            let mut stdout = io::stdout().lock();
            io::copy(&mut reader, &mut stdout)
                .with_context(|| format!("copy '{}' to stdout", path.display()))?;
        }
        Command::Mtime { path, set: None } => {
            let modified: DateTime<Utc> = get_last_modified(path)?.into();
            out::print_user(&modified.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        Command::Mtime { path, set: Some(raw) } => {
            let when = DateTime::parse_from_rfc3339(raw)
                .with_context(|| format!("invalid RFC 3339 timestamp '{raw}'"))?;
            set_last_modified(path, SystemTime::from(when))?;
            info!(path = %path.display(), mtime = %when, "Set modification time");
            out::print_success(&format!("Set modification time of '{}'", path.display()));
        }
    }
    Ok(())
}
