// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod report;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use gwadmin_app::{AppState, ResourceKind};
use gwadmin_db::Store;
use report::{ListRequest, ReportFormat};
use runtime::DbRuntime;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `gwadmin --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    init_logging(&config)?;
    info!(db_path = %db_path.display(), demo = options.demo, "starting gwadmin");

    let store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or GWADMIN_DB_PATH",
            db_path.display()
        )
    })?;
    store.bootstrap()?;
    if options.demo {
        runtime::seed_demo_data(&store)?;
    }
    if options.check_only {
        return Ok(());
    }

    if let Some(kind) = options.list {
        let request = ListRequest {
            kind,
            status: options.status.unwrap_or_else(|| gwadmin_app::FILTER_ALL.to_owned()),
            search: options.search.unwrap_or_default(),
            page: options.page.unwrap_or(1),
        };
        let format = if options.json {
            ReportFormat::Json
        } else {
            ReportFormat::Text
        };
        print!("{}", report::list_report(&store, &request, format)?);
        return Ok(());
    }

    let mut state = AppState::new(config.start_tab());
    let mut runtime = DbRuntime::new(&store);
    gwadmin_tui::run_app(&mut state, &mut runtime)
}

fn init_logging(config: &Config) -> Result<()> {
    let log_path = config.log_path()?;
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| {
            format!(
                "open log file {} -- set [logging].file to a writable path",
                log_path.display()
            )
        })?;

    let directive = config.log_filter();
    let filter = EnvFilter::try_new(&directive).with_context(|| {
        format!("invalid log filter {directive:?}; check [logging].level or {}", config::LOG_ENV)
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|error| anyhow!("initialize logging: {error}"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    list: Option<ResourceKind>,
    status: Option<String>,
    search: Option<String>,
    page: Option<usize>,
    json: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
        list: None,
        status: None,
        search: None,
        page: None,
        json: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--list requires a resource: reservations, tickets, or logs")
                })?;
                let kind = ResourceKind::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown resource {:?} for --list; use reservations, tickets, or logs",
                        value.as_ref()
                    )
                })?;
                options.list = Some(kind);
            }
            "--status" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--status requires a filter key such as `all` or `pending`"))?;
                options.status = Some(value.as_ref().to_owned());
            }
            "--search" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--search requires a query"))?;
                options.search = Some(value.as_ref().to_owned());
            }
            "--page" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--page requires a page number"))?;
                let page = value.as_ref().parse::<usize>().with_context(|| {
                    format!("--page expects a whole number, got {:?}", value.as_ref())
                })?;
                options.page = Some(page);
            }
            "--json" => {
                options.json = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                bail!("unknown argument {unknown:?}; run with --help to see supported options");
            }
        }
    }

    let list_only = options.status.is_some()
        || options.search.is_some()
        || options.page.is_some()
        || options.json;
    if list_only && options.list.is_none() {
        bail!("--status, --search, --page, and --json need --list <resource>");
    }

    Ok(options)
}

fn print_help() {
    println!("gwadmin");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Launch with seeded demo data (in-memory)");
    println!("  --check                  Validate config + DB, then exit");
    println!("  --list <resource>        Print one page of reservations, tickets, or logs");
    println!("  --status <key>           Filter key for --list (default all)");
    println!("  --search <query>         Name search for --list");
    println!("  --page <n>               Page for --list (clamped to the last page)");
    println!("  --json                   Print the --list page as JSON");
    println!("  --help                   Show this help");
}
