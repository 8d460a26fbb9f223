//! Marksheet command-line entry point

use clap::{Arg, ArgMatches, Command};
use marksheet_core::services::{load_sheet, max_marks_row, parse_ids_filter};
use marksheet_core::{
    BatchContext, BatchRunner, LiveBatchSteps, MailDispatcher, MarksheetConfig, PdfRenderer,
    RunLog,
};
use marksheet_types::MailMode;
use std::path::Path;

#[tokio::main]
async fn main() {
    // Initialize logging with INFO as default if RUST_LOG not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("marksheet")
        .version("1.0.0")
        .about("Generates per-student feedback PDFs from a marks spreadsheet, optionally emailing them")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file path")
                .required(true),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .value_name("FILE")
                .help("Marks spreadsheet (comma-delimited)")
                .required(true),
        )
        .arg(
            Arg::new("ids")
                .long("ids")
                .value_name("LIST")
                .help("Comma-separated student numbers; only these rows are processed"),
        )
        .arg(
            Arg::new("mail")
                .long("mail")
                .value_name("MODE")
                .help("Mail mode: 0 = none, 1 = everything to the coordinator, 2 = students")
                .default_value("0"),
        )
        .get_matches();

    if let Err(e) = run(&matches).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let mode = MailMode::from_flag(matches.get_one::<String>("mail").unwrap())?;

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = MarksheetConfig::from_file(config_path, mode)?;
    log::info!("Loaded configuration from {}", config_path);

    let csv_path = matches.get_one::<String>("csv").unwrap();
    let sheet = load_sheet(csv_path)?;
    let (max_marks, first_data_row) = max_marks_row(&sheet, config.max_marks_row)?;
    let columns = config.columns.resolve()?;
    log::info!(
        "Loaded {} rows from {} ({} candidate student rows)",
        sheet.rows.len(),
        csv_path,
        sheet.rows.len() - first_data_row
    );

    let ids_filter = matches
        .get_one::<String>("ids")
        .map(|list| parse_ids_filter(list));

    let renderer = PdfRenderer::new(&config, ".");
    let mailer = match (mode.is_enabled(), config.mail.as_ref()) {
        (true, Some(mail)) => {
            let dispatcher = MailDispatcher::new(mail)?;
            if !dispatcher.test_connection().await {
                log::warn!(
                    "SMTP connection test to {} failed; sends may be rejected",
                    mail.smtp.host
                );
            }
            Some(dispatcher)
        }
        _ => None,
    };

    let mut runlog = if mode.is_enabled() {
        RunLog::with_sidecar(Path::new("."))?
    } else {
        RunLog::console_only()
    };

    let ctx = BatchContext {
        columns: &columns,
        max_marks,
        first_data_row,
        mode,
        ids_filter: ids_filter.as_ref(),
        coordinator_email: config.mail.as_ref().map(|m| m.coordinator_email.as_str()),
    };

    let runner = BatchRunner::new(LiveBatchSteps::new(renderer, mailer));
    runner.run(&sheet, &ctx, &mut runlog).await;

    Ok(())
}
