//! Real-time console loop: wall-clock ticks interleaved with stdin commands.

use crate::config::AppConfig;
use crate::console::{Command, ConsoleObserver, HELP, format_clock};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};
use turnclock_session::{Session, SessionState};

/// Runs an interactive session until `quit` or end of input.
#[instrument(skip_all, fields(mode = %config.session().game_mode()))]
pub async fn run_console(config: AppConfig, json: bool) -> Result<()> {
    let seed = (*config.seed()).unwrap_or_else(rand::random);
    info!(seed, tick_ms = *config.tick_interval_ms(), "Starting console session");

    let observer = ConsoleObserver::new(config.session(), json);
    let mut session = Session::with_seed(config.session().clone(), observer, seed)?;
    session.startup();
    if !json {
        println!("{HELP}");
    }

    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = Instant::now();

    loop {
        tokio::select! {
            // Ticks first so a command sees every expiry that is already due.
            biased;

            now = interval.tick() => {
                session.tick(now.saturating_duration_since(last));
                last = now;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => handle(&mut session, command),
                    Err(e) => println!("{e}"),
                }
            }
        }
    }

    info!(state = %session.state(), "Console session closed");
    Ok(())
}

fn handle(session: &mut Session<ConsoleObserver>, command: Command) {
    let accepted = match command {
        Command::Start => session.request_start(),
        Command::Reset => session.request_reset(),
        Command::End => session.request_end(),
        Command::Click(index) => {
            // Rejections already reach the observer.
            let _ = session.request_cell_click(index);
            true
        }
        Command::Status => {
            print_status(session);
            true
        }
        Command::Help => {
            println!("{HELP}");
            true
        }
        Command::Quit => true,
    };
    if !accepted {
        warn!(?command, state = %session.state(), "Command ignored");
        println!("Nothing to do while {}", session.state());
    }
}

fn print_status(session: &Session<ConsoleObserver>) {
    println!("{}", session.board().display());
    match session.state() {
        SessionState::Active => {
            let player = session.current_turn();
            println!(
                "{} ({}) to move, Remaining Time: {}",
                session.config().player_name(player),
                player.mark(),
                format_clock(session.remaining_turn_time())
            );
        }
        state => println!("State: {state}"),
    }
}
