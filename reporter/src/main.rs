use std::process;

use env_logger::{Target, WriteStyle};
use log::error;
use tokio::task;

use pgtabsz::env::Env;
use pgtabsz::output::Printer;
use pgtabsz::program::program;
use pgtabsz::settings::Settings;
use pgtabsz::signal::signal_handler::notify_on_signals;
use pgtabsz_cli::cli_args::get_cli_args;
use pgtabsz_core::Context;
use pgtabsz_database::client::PgTabszClient;

#[tokio::main]
async fn main() {
    let cli_args = get_cli_args();

    env_logger::Builder::new()
        .parse_filters(&cli_args.log_level)
        .write_style(if cli_args.log_no_color { WriteStyle::Never } else { WriteStyle::Auto })
        .target(Target::Stderr)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let settings = Settings::from(&cli_args);
    let ctx = match settings.timeout {
        Some(timeout) => Context::background().with_timeout(timeout),
        None => Context::background(),
    };
    task::spawn(notify_on_signals(ctx.clone()));

    let program = program(Env::process().inputs(), PgTabszClient::connect(settings.connect), Printer::stdout(settings.format), settings.reports);
    if let Err(e) = program.run(&ctx).await {
        error!("{}", e);
        process::exit(1);
    }
}
