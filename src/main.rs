use std::process;

use clap::Parser;

use hashpass::cli::{self, CliFlags, Outcome, print_error};

fn main() {
    #[cfg(target_os = "linux")]
    unsafe {
        libc::prctl(libc::PR_SET_DUMPABLE, 0);
    }

    let flags = CliFlags::parse();

    let level = if flags.verbose {
        "debug"
    } else if flags.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli::run(flags) {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Aborted) => process::exit(130),
        Err(e) => {
            print_error(&format!("Error: {}", e));
            for cause in e.chain().skip(1) {
                print_error(&format!("  Caused by: {}", cause));
            }
            process::exit(1);
        }
    }
}
