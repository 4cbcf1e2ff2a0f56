//! Terminal falling-block game (default binary).
//!
//! A blocking thread reads crossterm key events and forwards commands; the
//! engine task owns the game and redraws through the terminal renderer.
//!
//! Logging goes to stderr and is off unless `RUST_LOG` is set, e.g.
//! `RUST_LOG=debug stackfall 2>stackfall.log`.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event};
use log::{debug, info};

use stackfall::core::GameSession;
use stackfall::engine::{Engine, EngineConfig, EngineHandle};
use stackfall::input::{handle_key_event, should_quit};
use stackfall::term::TerminalRenderer;

const INPUT_POLL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let config = EngineConfig::from_env();
    info!(
        "[Main] seed {} queue capacity {}",
        config.seed, config.queue_capacity
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;

    let session = GameSession::new(config.seed);
    let (engine, handle) = Engine::new(session, renderer, config.queue_capacity);

    let input = thread::spawn(move || read_input(handle));
    let finished = runtime.block_on(engine.run());
    let input_result = input
        .join()
        .map_err(|_| anyhow!("input thread panicked"))?;

    let session = finished?;
    input_result?;
    println!(
        "Final score {}  lines {}  level {}",
        session.score(),
        session.lines(),
        session.level()
    );
    Ok(())
}

/// Forward key presses until the player quits or the engine stops.
fn read_input(handle: EngineHandle) -> Result<()> {
    while !handle.is_closed() {
        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if should_quit(key) {
            debug!("[Input] quit requested");
            handle.blocking_quit();
            break;
        }
        if let Some(command) = handle_key_event(key) {
            if !handle.blocking_send(command) {
                break;
            }
        }
    }
    Ok(())
}
