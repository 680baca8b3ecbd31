//! Command-line front end: config management and headless simulation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use sitenav::exit_codes;
use sitenav::io::config::{DEFAULT_CONFIG_PATH, load_config, write_config};
use sitenav::io::scenario::load_scenario;
use sitenav::sim::{Report, simulate};
use sitenav::{SiteConfig, logging};

#[derive(Parser)]
#[command(
    name = "sitenav",
    version,
    about = "Navbar highlighter tooling: config checks and headless simulation"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default site config.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
    /// Check the site config for inconsistent settings.
    Validate {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Print tracked sections (`id -> key`) in tie-break order.
    Sections {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
    /// Run a scenario file through the highlighter and print the end state.
    Simulate {
        scenario: PathBuf,
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force, path } => cmd_init(&path, force),
        Command::Validate { config } => cmd_validate(&config),
        Command::Sections { config } => cmd_sections(&config),
        Command::Simulate {
            scenario,
            config,
            json,
        } => cmd_simulate(&scenario, &config, json),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &SiteConfig::default())?;
    info!(path = %path.display(), "wrote default config");
    println!("wrote {}", path.display());
    Ok(())
}

fn cmd_validate(config: &Path) -> Result<()> {
    let cfg = load_config(config)?;
    println!(
        "ok: {} sections, navbar_height={}",
        cfg.sections.len(),
        cfg.navbar_height
    );
    Ok(())
}

fn cmd_sections(config: &Path) -> Result<()> {
    let cfg = load_config(config)?;
    for section in &cfg.sections {
        println!("{} -> {}", section.id, section.key);
    }
    Ok(())
}

fn cmd_simulate(scenario_path: &Path, config: &Path, json: bool) -> Result<()> {
    let cfg = load_config(config)?;
    let scenario = load_scenario(scenario_path)?;
    let report = simulate(cfg, &scenario);
    if json {
        let payload = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{}", payload);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!("mode: {}", report.mode);
    println!("ended_at_ms: {}", report.ended_at_ms);
    println!("scroll_y: {}", report.scroll_y);
    println!("active: {}", report.active.as_deref().unwrap_or("-"));
    println!("active_links: {}", report.active_links.join(","));
    println!("fragment: {}", report.fragment.as_deref().unwrap_or("-"));
    println!("history: {}", report.history.join(" "));
    if let Some(display) = &report.menu_display {
        println!("menu_display: {}", display);
    }
    for href in &report.navigations {
        println!("navigate: {}", href);
    }
    for change in &report.timeline {
        println!("timeline: {} {}", change.at_ms, change.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init_defaults_to_site_toml() {
        let cli = Cli::parse_from(["sitenav", "init"]);
        match cli.command {
            Command::Init { force, path } => {
                assert!(!force);
                assert_eq!(path, PathBuf::from("site.toml"));
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn parse_simulate_json() {
        let cli = Cli::parse_from(["sitenav", "simulate", "s.json", "--json"]);
        assert!(matches!(
            cli.command,
            Command::Simulate { json: true, .. }
        ));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("site.toml");
        cmd_init(&path, false).expect("first init");
        assert!(cmd_init(&path, false).is_err());
        cmd_init(&path, true).expect("forced init");
    }
}
