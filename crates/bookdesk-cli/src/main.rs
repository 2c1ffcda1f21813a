// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use bookdesk_app::{AppState, ServiceKind, service_param, url_with_service};
use bookdesk_client::Client;
use config::Config;
use runtime::{DemoRuntime, WebhookRuntime};
use std::env;
use std::path::PathBuf;
use tracing::info;
use url::Url;

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
            "load config {}; run `bookdesk --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let initial = initial_url(
        &config.base_url()?,
        options.url.as_deref(),
        options.service,
        config.default_service(),
    )?;

    let endpoint = bookdesk_client::resolve_endpoint(config.webhook_url());
    let client = Client::new(&endpoint, config.webhook_timeout()?).with_context(|| {
        format!(
            "invalid [webhook] config in {}; fix url/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        println!("config ok: {}", options.config_path.display());
        println!("webhook: {}", client.endpoint());
        println!("start page: {initial}");
        return Ok(());
    }

    let log_path = config.log_path()?;
    logging::init_logging(&log_path, &logging::filter_directive(config.log_level()))?;
    info!(
        endpoint = %client.endpoint(),
        timeout_ms = client.timeout().as_millis() as u64,
        demo = options.demo,
        "starting booking desk"
    );

    let mut state = AppState::new(initial);
    if options.demo {
        let mut runtime = DemoRuntime::new();
        bookdesk_tui::run_app(&mut state, &mut runtime)
    } else {
        let mut runtime = WebhookRuntime::new(client);
        bookdesk_tui::run_app(&mut state, &mut runtime)
    }
}

/// Start page: `--url` resolved against the configured base, then `--service`
/// if given, else the configured default when the link names no service.
fn initial_url(
    base: &Url,
    url_arg: Option<&str>,
    service_arg: Option<ServiceKind>,
    default_service: ServiceKind,
) -> Result<Url> {
    let url = match url_arg {
        Some(raw) => base
            .join(raw)
            .with_context(|| format!("--url {raw:?} is not a valid link"))?,
        None => base.clone(),
    };
    Ok(match service_arg {
        Some(service) => url_with_service(&url, service),
        None if service_param(&url).is_none() => url_with_service(&url, default_service),
        None => url,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    service: Option<ServiceKind>,
    url: Option<String>,
    demo: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        service: None,
        url: None,
        demo: false,
        show_help: false,
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
            "--service" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--service requires pest, clean or cleaning"))?;
                let service = ServiceKind::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown service {:?}; use pest, clean or cleaning",
                        value.as_ref()
                    )
                })?;
                options.service = Some(service);
            }
            "--url" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--url requires a link such as ?service=clean"))?;
                options.url = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
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
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("bookdesk - pest control and cleaning booking desk");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --service <name>         Open on pest, clean or cleaning");
    println!("  --url <link>             Open a deep link, e.g. \"?service=clean\"");
    println!("  --demo                   Use an offline backend with generated results");
    println!("  --check                  Validate config and webhook settings, then exit");
    println!("  --help                   Show this help");
}
