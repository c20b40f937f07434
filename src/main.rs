use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

fn main() -> Result<()> {
    let cli = tasklist::cli::Cli::parse();
    let config = tasklist::config::from_cli(&cli)?;
    let _log_guard = tasklist::logging::init(config.log_path(), cli.log_filter.as_deref())?;
    info!(
        data_dir = %config.data_dir().display(),
        source = %config.source(),
        "starting tasklist"
    );

    let (mut service, storage) = tasklist::open_service(&config);

    let result = match cli.command {
        Some(tasklist::cli::CliCommand::Tui) | None => tasklist::tui::run(service, &storage),
        Some(command) => {
            if !storage.is_durable() {
                eprintln!("warning: storage unavailable, changes will not be saved");
            }
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tasklist::commands::execute(&mut service, command, &mut handle)
        }
    };

    if let Err(err) = &result {
        error!("tasklist exited with error: {err:#}");
    }
    result
}
