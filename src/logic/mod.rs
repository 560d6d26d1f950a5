//! Logic thread: owns the tracker state and applies user actions.
//!
//! Unlike a game loop there is nothing to tick, so the thread blocks until
//! an action or a system event arrives.

pub mod state;

use crate::logic::state::TrackerState;
use crate::system::bus::{SystemBus, SystemEvent};
use crossbeam_channel::select;
use std::thread;

/// Spawns the logic thread.
///
/// For every action: apply it, save, publish a fresh snapshot. Actions are
/// applied strictly in arrival order, so the last import to finish wins.
pub fn start_thread(bus: SystemBus, mut state: TrackerState) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("Logic Thread".to_string())
        .spawn(move || {
            log::info!("LOGIC: Thread started");

            if bus.render_tx.send(state.create_snapshot()).is_err() {
                log::error!("LOGIC: Render side gone before first snapshot");
                return;
            }

            loop {
                select! {
                    recv(bus.action_rx) -> action => {
                        match action {
                            Ok(action) => {
                                state.handle_action(action);
                                if bus.render_tx.send(state.create_snapshot()).is_err() {
                                    log::warn!("LOGIC: Render side gone, stopping");
                                    break;
                                }
                            }
                            Err(_) => break,
                        }
                    }
                    recv(bus.sys_rx) -> evt => {
                        match evt {
                            Ok(SystemEvent::Quit) | Err(_) => {
                                log::info!("LOGIC: Quit received...");
                                break;
                            }
                        }
                    }
                }
            }

            // Actions sent right before the window closed still count.
            let pending: Vec<_> = bus.action_rx.try_iter().collect();
            if !pending.is_empty() {
                log::info!("LOGIC: Applying {} queued actions before exit", pending.len());
            }
            for action in pending {
                state.handle_action(action);
            }

            state.shutdown();
            log::info!("LOGIC: Thread stopped");
        })
        .expect("Failed to spawn Logic thread")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::tests::three_dans;
    use crate::shared::messages::TrackerAction;
    use crate::storage::{FileStore, Persistence};

    #[test]
    fn test_actions_queued_before_quit_are_saved() {
        let dir = tempfile::tempdir().unwrap();
        let persistence = Persistence::new(FileStore::open(dir.path()).unwrap());
        let state = TrackerState::new(three_dans(), persistence);

        let bus = SystemBus::new();
        bus.action_tx
            .send(TrackerAction::ToggleCompletion("a1".into()))
            .unwrap();
        bus.action_tx
            .send(TrackerAction::SetNote {
                map_id: "a1".into(),
                text: "last minute".into(),
            })
            .unwrap();
        bus.sys_tx.send(SystemEvent::Quit).unwrap();

        start_thread(bus.clone(), state).join().unwrap();

        let saved = Persistence::new(FileStore::open(dir.path()).unwrap()).load();
        assert!(saved.is_completed("a1"));
        assert_eq!(saved.note("a1"), "last minute");
    }
}
