use anyhow::{Context, Result, anyhow};
use pico_args::Arguments;
use std::{env, fs, path::PathBuf};

use swipeviews::PagerConfig;
use swipeviews::replay::{self, Trace};

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    // First free arg is the subcommand
    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("replay") => {
            let pretty = pargs.contains("--pretty");
            let config_path: Option<PathBuf> = pargs
                .opt_value_from_str("--config")
                .map_err(|e| anyhow!("bad --config: {e}"))?;
            let trace_path: PathBuf = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: swipeviews replay <trace.json> [--config <profile.toml>]"))?;

            let config = match config_path {
                Some(p) => PagerConfig::load(&p)?,
                None => PagerConfig::default(),
            };
            let text = fs::read_to_string(&trace_path)
                .with_context(|| format!("failed to read {}", trace_path.display()))?;
            let trace = Trace::from_json(&text)
                .with_context(|| format!("in {}", trace_path.display()))?;

            let report = replay::run(&trace, &config)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", serde_json::to_string(&report)?);
            }
            Ok(())
        }

        Some("check") => {
            let path: PathBuf = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: swipeviews check <profile.toml>"))?;
            let config = PagerConfig::load(&path)?;
            println!("ok: {}", path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }

        Some("profile") => {
            print!("{}", PagerConfig::default_profile_text());
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!(
        r#"swipeviews: replay recorded paging gestures

USAGE:
  swipeviews help [command]                       Show general or command-specific help
  swipeviews replay <trace.json> [--config <toml>] Replay a trace, print notifications as JSON
  swipeviews check <profile.toml>                 Validate a pager profile
  swipeviews profile                              Print the bundled default profile

TIPS:
  - RUST_LOG=debug shows classification and settle decisions
  - Traces: see traces/ for the JSON layout
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "replay" => println!(
            "usage: swipeviews replay <trace.json> [--config <profile.toml>] [--pretty]\nFeeds a recorded trace through the pager and prints the emitted notifications,\nheight updates and final index."
        ),
        "check" => println!(
            "usage: swipeviews check <profile.toml>\nParses and validates a profile; prints the effective values."
        ),
        "profile" => println!("usage: swipeviews profile\nPrints the bundled default profile."),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}
