//! Engine tests: commands and gravity driven through the async loop

use std::time::Duration;

use stackfall::core::{Board, GameSession, GameSnapshot};
use stackfall::engine::Engine;
use stackfall::types::{Command, Phase, PieceKind};
use tokio::sync::mpsc;
use tokio::time::Instant;

async fn frame_where(
    frames: &mut mpsc::UnboundedReceiver<GameSnapshot>,
    accept: impl Fn(&GameSnapshot) -> bool,
) -> GameSnapshot {
    loop {
        let frame = frames.recv().await.unwrap();
        if accept(&frame) {
            return frame;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn tetris_through_handle_updates_frames() {
    let rows = ["#########."; 4];
    let session = GameSession::from_position(
        5,
        Board::from_rows(&rows, PieceKind::L),
        PieceKind::I,
        PieceKind::T,
    );
    let (frame_tx, mut frames) = mpsc::unbounded_channel();
    let (engine, handle) = Engine::new(session, frame_tx, 32);
    let task = tokio::spawn(engine.run());

    for command in [
        Command::Rotate,
        Command::MoveRight,
        Command::MoveRight,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
    ] {
        assert!(handle.send(command).await);
    }

    let frame = frame_where(&mut frames, |f| f.lines > 0).await;
    assert_eq!(frame.score, 800);
    assert_eq!(frame.lines, 4);
    assert_eq!(frame.current.kind, PieceKind::T);

    handle.quit().await;
    let session = task.await.unwrap().unwrap();
    assert_eq!(session.score(), 800);
    assert!(handle.is_closed());
}

#[tokio::test(start_paused = true)]
async fn new_game_from_game_over_restarts_gravity() {
    let mut session = GameSession::new(9);
    while !session.game_over() {
        session.apply(Command::HardDrop);
    }

    let (frame_tx, mut frames) = mpsc::unbounded_channel();
    let (engine, handle) = Engine::new(session, frame_tx, 8);
    let task = tokio::spawn(engine.run());

    let over = frames.recv().await.unwrap();
    assert_eq!(over.phase, Phase::GameOver);

    // No gravity while the game is over.
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(frames.try_recv().is_err());

    handle.send(Command::NewGame).await;
    let fresh = frames.recv().await.unwrap();
    assert_eq!(fresh.phase, Phase::Running);
    assert_eq!(fresh.game_id, 1);

    let start = Instant::now();
    let fell = frames.recv().await.unwrap();
    assert_eq!(fell.current.y, fresh.current.y + 1);
    assert_eq!(start.elapsed(), Duration::from_millis(1000));

    handle.quit().await;
    task.await.unwrap().unwrap();
}
