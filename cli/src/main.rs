use std::io::{self, BufRead, Write};

use clap::Parser;
use sapper_core::{Board, Coord2, Response, Session, SessionObserver, SessionState, SharedSession};
use tracing_subscriber::filter::LevelFilter;

mod args;
mod bridge;
mod input;
mod render;

use args::Args;
use input::Command;

struct TerminalObserver;

impl SessionObserver for TerminalObserver {
    fn cells_opened(&mut self, _board: &Board, cells: &[Coord2]) {
        log::debug!("{} cells opened", cells.len());
    }

    fn round_ended(&mut self, state: SessionState) {
        if let Some(message) = render::message(state) {
            println!("{message}");
        }
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn seed_from_time() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    now.as_nanos() as u64 ^ now.as_secs().rotate_left(32)
}

fn print_screen(shared: &SharedSession) {
    if let Some((board, controls)) =
        shared.read(|session| (render::board(session), render::controls(session)))
    {
        print!("{board}");
        println!("{controls}");
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.board_config()?;
    let seed = args.seed.unwrap_or_else(seed_from_time);
    log::debug!("seed: {}", seed);

    let host = bridge::LoggingBridge::default();
    bridge::announce(&host);

    let mut session = Session::new(config, seed)?;
    session.set_observer(TerminalObserver);
    let shared = SharedSession::new(session);

    println!("{}", input::HELP);
    print_screen(&shared);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", input::HELP),
            Command::Ad => {
                if !bridge::offer_ad(&host) {
                    println!("No ad right now");
                }
            }
            Command::Play(input) => match shared.dispatch(input) {
                Some(Ok(Response::Opened(result))) if result.triggered_mine => {
                    log::debug!("Mine hit at {:?}", result.opened.first());
                }
                Some(Ok(_)) => {}
                // mistakes on the board never end the program
                Some(Err(err)) => println!("{err}"),
                None => log::debug!("Input dropped"),
            },
        }

        print_screen(&shared);
        stdout.flush()?;
    }

    log::debug!("Bye");
    Ok(())
}
