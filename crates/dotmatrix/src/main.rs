use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use dotmatrix::Options;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let options = Options::parse();
    let outcome = dotmatrix::run(&options)?;

    if options.print_serial {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&outcome.serial)?;
        stdout.flush()?;
    }

    if options.until.is_some() && !outcome.matched {
        log::error!("serial output never contained the expected text");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
