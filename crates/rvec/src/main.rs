use std::{
    io,
    path::Path,
    process::ExitCode,
};

use rvec::{
    demo::{self, DEMO_CAPACITIES},
    dump,
    Command, RunConfig, USAGE,
};

use rvec_alloc::ArenaAlloc;

use rvec_error::{chain, Tracked};

use rvec_log::{always, debug, error};

fn main() -> ExitCode {
    rvec_log::init();
    let config = match RunConfig::from_args(std::env::args_os().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            error!("{}", chain(&err));
            if let Some(loc) = err.location() {
                debug!("raised at {}", loc);
            }
            always!("{}", USAGE);
            return ExitCode::from(2)
        },
    };
    match config.command {
        Command::Demo => run_reservations(&DEMO_CAPACITIES, config.arena),
        Command::Reserve(capacities) => run_reservations(&capacities, config.arena),
        Command::Dump(path) => run_dump(&path),
    }
}

fn run_reservations(capacities: &[usize], arena: Option<usize>) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match arena {
        Some(size) => {
            let Some(arena) = ArenaAlloc::new(size) else {
                error!("Error allocating arena of {} bytes", size);
                return ExitCode::FAILURE
            };
            demo::run_in(&arena, capacities, &mut out).map(drop)
        },
        None => demo::run(capacities, &mut out).map(drop),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err.diagnostic());
            ExitCode::FAILURE
        },
    }
}

fn run_dump(path: &Path) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match dump::dump(path, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", chain(&err));
            ExitCode::FAILURE
        },
    }
}
