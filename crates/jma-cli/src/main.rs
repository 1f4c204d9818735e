mod cli;
mod session;

use std::io::{self, Write};
use std::process::ExitCode;

use jma_core::{App, AppError};
use jma_ui::{AppServices, RegionModel};

use cli::Args;
use session::{response_wait, Session};

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    if let Err(e) = jma_core::init(&args.log_level) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let app = App::new(args.config.as_deref())?;
    let services = AppServices::init(app.config())?;

    // Without a region list there is nothing to select from.
    let regions = RegionModel::new(services.load_regions()?);
    tracing::info!("JMA forecast viewer started with {} regions", regions.len());

    let mut session = Session::new(
        &services,
        &regions,
        response_wait(app.config().jma.timeout_secs),
        args.json,
    );

    let mut out = io::stdout().lock();
    let ui = &app.config().ui;

    if args.list {
        write!(out, "{}", regions.menu(&ui.prompt))?;
    } else if !args.regions.is_empty() {
        let codes: Vec<&str> = args.regions.iter().map(String::as_str).collect();
        session.show(&codes, &mut out)?;
    } else {
        writeln!(out, "{}", ui.title)?;
        write!(out, "{}", regions.menu(&ui.prompt))?;
        session.interact(io::stdin().lock(), &mut out)?;
    }

    services.shutdown();
    app.shutdown();
    Ok(())
}
