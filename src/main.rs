//! sunbar entry point.
//!
//! Intended to be dropped into a SwiftBar/xbar plugin folder (for example as
//! `sunbar.1m`), which runs it on a fixed interval and shows whatever it prints.
//! There are no command-line flags. Every failure ends the run with an exit
//! code chosen by [`exit_code_for`] and a message on stderr; the next scheduled
//! run starts from scratch.

use sunbar::config::Config;
use sunbar::error::exit_code_for;
use sunbar::logger::Log;
use sunbar::{Sunbar, log_end, log_error_exit};

fn main() {
    let code = match run() {
        Ok(()) => 0,
        Err(e) => {
            // Reported once: in the log block when debugging, plain otherwise
            if Log::is_enabled() {
                log_error_exit!("{e:#}");
            } else {
                eprintln!("Error: {e:#}");
            }
            exit_code_for(&e)
        }
    };
    std::process::exit(code);
}

fn run() -> anyhow::Result<()> {
    // Honor SUNBAR_DEBUG while the configuration itself is loading
    Log::init(false);
    let config = Config::load()?;
    Log::init(config.debug());

    let mut stdout = std::io::stdout().lock();
    Sunbar::new(config).run(&mut stdout)?;

    log_end!();
    Ok(())
}
