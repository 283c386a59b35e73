//! The session coordinator: one actor task owning all match state.
//!
//! Connection handlers never touch the board, the timer or the seats
//! directly; they send [`SessionCommand`]s through a [`SessionHandle`]
//! and the actor applies them one at a time. Interleaving a timer
//! expiry with a move, or two moves with each other, is therefore
//! impossible by construction.

use omok_game::{MatchState, MoveOutcome};
use omok_protocol::{ClientMessage, PlayerStats, ServerMessage, Slot};
use omok_timer::{TickUpdate, TimerConfig, TurnTimer};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::chat::ChatHistory;
use crate::error::SessionError;
use crate::ledger::MatchLedger;
use crate::rematch::{RematchRequest, RematchState};
use crate::slots::{OutboundSender, SlotTable};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Turn countdown settings.
    pub timer: TimerConfig,
    /// How many chat lines are kept for replay to late joiners.
    pub chat_history_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            chat_history_cap: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Commands and handle
// ---------------------------------------------------------------------------

/// A command for the coordinator task.
pub enum SessionCommand {
    /// An authenticated client wants a seat.
    Join {
        name: String,
        sender: OutboundSender,
        reply: oneshot::Sender<Result<Slot, SessionError>>,
    },
    /// A seated client sent a protocol message.
    Inbound { slot: Slot, message: ClientMessage },
    /// A seated client disconnected.
    Leave { slot: Slot },
    /// Stop the coordinator task.
    Shutdown,
}

/// Cloneable handle for talking to the coordinator.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionHandle {
    /// Requests a seat for an authenticated player. The returned slot
    /// stays bound to `sender` until [`leave`](Self::leave).
    pub async fn join(
        &self,
        name: String,
        sender: OutboundSender,
    ) -> Result<Slot, SessionError> {
        let (reply, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Join { name, sender, reply })
            .map_err(|_| SessionError::Unavailable)?;
        reply_rx.await.map_err(|_| SessionError::Unavailable)?
    }

    /// Forwards a parsed client message. Fire-and-forget; ordering per
    /// sender is preserved by the command channel.
    pub fn inbound(&self, slot: Slot, message: ClientMessage) {
        let _ = self.sender.send(SessionCommand::Inbound { slot, message });
    }

    /// Releases a seat. Safe to call more than once; callable from a
    /// `Drop` guard since it never blocks.
    pub fn leave(&self, slot: Slot) {
        let _ = self.sender.send(SessionCommand::Leave { slot });
    }

    /// Asks the coordinator task to exit.
    pub fn shutdown(&self) {
        let _ = self.sender.send(SessionCommand::Shutdown);
    }
}

/// Spawns the coordinator task and returns its handle.
pub fn spawn_session<L: MatchLedger>(config: SessionConfig, ledger: L) -> SessionHandle {
    let (sender, receiver) = mpsc::unbounded_channel();
    let actor = SessionActor::new(config, ledger, receiver);
    tokio::spawn(actor.run());
    SessionHandle { sender }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

struct SessionActor<L> {
    slots: SlotTable,
    match_state: MatchState,
    timer: TurnTimer,
    rematch: RematchState,
    chat: ChatHistory,
    ledger: L,
    receiver: mpsc::UnboundedReceiver<SessionCommand>,
}

impl<L: MatchLedger> SessionActor<L> {
    fn new(
        config: SessionConfig,
        ledger: L,
        receiver: mpsc::UnboundedReceiver<SessionCommand>,
    ) -> Self {
        Self {
            slots: SlotTable::new(),
            match_state: MatchState::new(),
            timer: TurnTimer::new(config.timer),
            rematch: RematchState::Idle,
            chat: ChatHistory::new(config.chat_history_cap),
            ledger,
            receiver,
        }
    }

    async fn run(mut self) {
        info!("session coordinator started");
        loop {
            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(SessionCommand::Join { name, sender, reply }) => {
                        self.handle_join(name, sender, reply);
                    }
                    Some(SessionCommand::Inbound { slot, message }) => {
                        self.handle_inbound(slot, message).await;
                    }
                    Some(SessionCommand::Leave { slot }) => self.handle_leave(slot),
                    Some(SessionCommand::Shutdown) | None => break,
                },
                update = self.timer.wait() => self.handle_tick(update).await,
            }
        }
        info!("session coordinator stopped");
    }

    // -- command handlers ---------------------------------------------------

    fn handle_join(
        &mut self,
        name: String,
        sender: OutboundSender,
        reply: oneshot::Sender<Result<Slot, SessionError>>,
    ) {
        let Some(slot) = self.slots.allocate(name.clone(), sender) else {
            debug!(name, "join refused, both seats taken");
            let _ = reply.send(Err(SessionError::ServerFull));
            return;
        };
        let _ = reply.send(Ok(slot));
        info!(%slot, name, players = self.slots.occupied(), "player joined");

        self.send_to(slot, ServerMessage::AuthOk { slot, user: name });
        for line in self.chat.iter() {
            self.send_to(slot, line.clone());
        }

        if self.slots.is_full() {
            self.start_match();
        } else {
            self.broadcast(ServerMessage::Waiting);
        }
    }

    async fn handle_inbound(&mut self, slot: Slot, message: ClientMessage) {
        match message {
            ClientMessage::Move { x, y } => self.handle_move(slot, x, y).await,
            ClientMessage::Reset => self.handle_rematch(slot),
            ClientMessage::Chat { text } => self.handle_chat(slot, text),
            ClientMessage::Auth { .. } => {
                debug!(%slot, "AUTH from an already-seated player ignored");
            }
        }
    }

    async fn handle_move(&mut self, slot: Slot, x: u8, y: u8) {
        match self.match_state.attempt_move(x, y, slot) {
            MoveOutcome::Rejected(reason) => {
                // Dropped without a reply; the client enforces legality
                // on its side and anything else is a race or a bad actor.
                debug!(%slot, x, y, %reason, "move rejected");
            }
            MoveOutcome::Placed => {
                self.broadcast(ServerMessage::Move { x, y, slot });
                self.timer.reset();
                self.broadcast(ServerMessage::Turn {
                    slot: self.match_state.turn(),
                });
                self.broadcast(ServerMessage::Time {
                    seconds: self.timer.turn_limit(),
                });
            }
            MoveOutcome::PlacedAndWon => {
                let winner = self.slots.name(slot).unwrap_or_default().to_owned();
                let loser = self.slots.name(slot.other()).map(str::to_owned);

                self.broadcast(ServerMessage::Move { x, y, slot });
                self.broadcast(ServerMessage::Win {
                    name: winner.clone(),
                });
                self.timer.stop();
                info!(%slot, winner, "match won");

                if let Some(loser) = loser {
                    if let Err(e) = self.ledger.append_result(&winner, &loser).await {
                        warn!(error = %e, "failed to record match result");
                    }
                }
            }
            MoveOutcome::PlacedAndDrew => {
                self.broadcast(ServerMessage::Move { x, y, slot });
                self.broadcast(ServerMessage::Draw);
                self.timer.stop();
                info!("match drawn on a full board");
            }
        }
    }

    fn handle_rematch(&mut self, slot: Slot) {
        if !self.slots.is_full() {
            self.send_to(
                slot,
                ServerMessage::RematchFail {
                    reason: "waiting for opponent".to_owned(),
                },
            );
            return;
        }

        match self.rematch.request(slot) {
            RematchRequest::Opened => {
                let requester = self.slots.name(slot).unwrap_or_default().to_owned();
                let opponent = self
                    .slots
                    .name(slot.other())
                    .unwrap_or_default()
                    .to_owned();
                info!(%slot, requester, "rematch requested");
                self.send_to(slot, ServerMessage::RematchWait { name: opponent });
                self.send_to(
                    slot.other(),
                    ServerMessage::RematchPrompt { name: requester },
                );
            }
            RematchRequest::AlreadyPending => {
                self.send_to(
                    slot,
                    ServerMessage::RematchAlready {
                        detail: "your request is already pending".to_owned(),
                    },
                );
            }
            RematchRequest::Accepted => {
                let accepter = self.slots.name(slot).unwrap_or_default().to_owned();
                info!(%slot, accepter, "rematch accepted");
                self.broadcast(ServerMessage::RematchAccept { name: accepter });
                self.broadcast(ServerMessage::Reset);
                self.start_match();
            }
        }
    }

    fn handle_chat(&mut self, slot: Slot, text: String) {
        let Some(name) = self.slots.name(slot) else {
            return;
        };
        let message = ServerMessage::Chat {
            slot,
            name: name.to_owned(),
            text,
        };
        self.chat.push(message.clone());
        self.broadcast(message);
    }

    fn handle_leave(&mut self, slot: Slot) {
        let Some(seat) = self.slots.release(slot) else {
            return; // already released, double leave
        };
        info!(%slot, name = %seat.name, players = self.slots.occupied(), "player left");

        if self.rematch.cancel().is_some() {
            self.send_to(slot.other(), ServerMessage::RematchCancel);
        }

        self.timer.stop();
        self.match_state.clear_to_waiting();
        self.broadcast(ServerMessage::Waiting);
    }

    async fn handle_tick(&mut self, update: TickUpdate) {
        self.broadcast(ServerMessage::Time {
            seconds: update.remaining,
        });

        if update.expired {
            self.match_state.force_turn_switch();
            info!(turn = %self.match_state.turn(), "turn timed out");
            self.broadcast(ServerMessage::Turn {
                slot: self.match_state.turn(),
            });
            self.broadcast(ServerMessage::Time {
                seconds: self.timer.turn_limit(),
            });
        }

        self.broadcast_player_info().await;
    }

    // -- helpers ------------------------------------------------------------

    fn start_match(&mut self) {
        self.match_state.reset();
        self.rematch = RematchState::Idle;
        self.timer.start();
        info!(turn = %self.match_state.turn(), "match started");
        self.broadcast(ServerMessage::Start {
            slot: self.match_state.turn(),
        });
    }

    /// Pushes live win/loss tallies for both seats. Skipped whenever a
    /// seat is empty or the ledger misbehaves; the next tick retries.
    async fn broadcast_player_info(&mut self) {
        let (Some(black), Some(white)) =
            (self.slots.name(Slot::ONE), self.slots.name(Slot::TWO))
        else {
            return;
        };
        let (black, white) = (black.to_owned(), white.to_owned());

        let stats = async {
            let black_wins = self.ledger.count_wins(&black).await?;
            let black_losses = self.ledger.count_losses(&black).await?;
            let white_wins = self.ledger.count_wins(&white).await?;
            let white_losses = self.ledger.count_losses(&white).await?;
            Ok::<_, crate::StoreError>((
                PlayerStats::from_tallies(&black, black_wins, black_losses),
                PlayerStats::from_tallies(&white, white_wins, white_losses),
            ))
        }
        .await;

        match stats {
            Ok((black, white)) => {
                self.broadcast(ServerMessage::PlayerInfo { black, white });
            }
            Err(e) => warn!(error = %e, "failed to read ledger tallies"),
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        for (slot, seat) in self.slots.iter() {
            if seat.sender.send(message.clone()).is_err() {
                // Writer gone; the Leave command is already in flight.
                debug!(%slot, "dropping message for disconnected player");
            }
        }
    }

    fn send_to(&self, slot: Slot, message: ServerMessage) {
        if let Some(seat) = self.slots.get(slot) {
            let _ = seat.sender.send(message);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ledger::MemoryLedger;
    use omok_game::Phase;

    type TestActor = SessionActor<Arc<MemoryLedger>>;

    fn new_actor() -> (TestActor, Arc<MemoryLedger>) {
        let ledger = Arc::new(MemoryLedger::new());
        let (_, receiver) = mpsc::unbounded_channel();
        let actor = SessionActor::new(SessionConfig::default(), ledger.clone(), receiver);
        (actor, ledger)
    }

    fn join(
        actor: &mut TestActor,
        name: &str,
    ) -> (Slot, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (reply_tx, mut reply_rx) = oneshot::channel();
        actor.handle_join(name.to_owned(), tx, reply_tx);
        let slot = reply_rx
            .try_recv()
            .expect("join should reply immediately")
            .expect("seat should be granted");
        (slot, rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(message) = rx.try_recv() {
            lines.push(message.to_string());
        }
        lines
    }

    /// Two seated players with their outbound queues drained.
    fn seated_pair(
        actor: &mut TestActor,
    ) -> (
        mpsc::UnboundedReceiver<ServerMessage>,
        mpsc::UnboundedReceiver<ServerMessage>,
    ) {
        let (slot1, mut rx1) = join(actor, "alice");
        let (slot2, mut rx2) = join(actor, "bob");
        assert_eq!(slot1, Slot::ONE);
        assert_eq!(slot2, Slot::TWO);
        drain(&mut rx1);
        drain(&mut rx2);
        (rx1, rx2)
    }

    // =====================================================================
    // Joining
    // =====================================================================

    #[tokio::test]
    async fn test_first_join_gets_auth_ok_then_waiting() {
        let (mut actor, _) = new_actor();
        let (slot, mut rx) = join(&mut actor, "alice");
        assert_eq!(slot, Slot::ONE);
        assert_eq!(drain(&mut rx), vec!["AUTH_OK 1 alice", "WAITING"]);
        assert_eq!(actor.match_state.phase(), Phase::Waiting);
        assert!(!actor.timer.is_running());
    }

    #[tokio::test]
    async fn test_second_join_starts_match() {
        let (mut actor, _) = new_actor();
        let (_, mut rx1) = join(&mut actor, "alice");
        drain(&mut rx1);

        let (slot, mut rx2) = join(&mut actor, "bob");
        assert_eq!(slot, Slot::TWO);
        assert_eq!(drain(&mut rx2), vec!["AUTH_OK 2 bob", "START 1"]);
        assert_eq!(drain(&mut rx1), vec!["START 1"]);
        assert_eq!(actor.match_state.phase(), Phase::Active);
        assert!(actor.timer.is_running());
    }

    #[tokio::test]
    async fn test_third_join_is_refused() {
        let (mut actor, _) = new_actor();
        let _seats = seated_pair(&mut actor);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let (reply_tx, mut reply_rx) = oneshot::channel();
        actor.handle_join("carol".to_owned(), tx, reply_tx);
        let result = reply_rx.try_recv().expect("reply");
        assert!(matches!(result, Err(SessionError::ServerFull)));
        assert!(drain(&mut rx).is_empty());
    }

    // =====================================================================
    // Moves
    // =====================================================================

    #[tokio::test]
    async fn test_accepted_move_broadcasts_and_restarts_countdown() {
        let (mut actor, _) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        actor
            .handle_inbound(Slot::ONE, ClientMessage::Move { x: 7, y: 7 })
            .await;

        let expected = vec!["MOVE 7 7 1", "TURN 2", "TIME 35"];
        assert_eq!(drain(&mut rx1), expected);
        assert_eq!(drain(&mut rx2), expected);
    }

    #[tokio::test]
    async fn test_rejected_move_is_silent() {
        let (mut actor, _) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        // Not slot 2's turn.
        actor
            .handle_inbound(Slot::TWO, ClientMessage::Move { x: 7, y: 7 })
            .await;

        assert!(drain(&mut rx1).is_empty());
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_winning_move_announces_records_and_stops_timer() {
        let (mut actor, ledger) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        for i in 0..4u8 {
            actor
                .handle_inbound(Slot::ONE, ClientMessage::Move { x: i, y: 0 })
                .await;
            actor
                .handle_inbound(Slot::TWO, ClientMessage::Move { x: i, y: 14 })
                .await;
        }
        drain(&mut rx1);
        drain(&mut rx2);

        actor
            .handle_inbound(Slot::ONE, ClientMessage::Move { x: 4, y: 0 })
            .await;

        let expected = vec!["MOVE 4 0 1", "WIN alice"];
        assert_eq!(drain(&mut rx1), expected);
        assert_eq!(drain(&mut rx2), expected);
        assert!(!actor.timer.is_running());

        let records = ledger.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].winner, "alice");
        assert_eq!(records[0].loser, "bob");

        // Further moves land on a finished match and stay silent.
        actor
            .handle_inbound(Slot::TWO, ClientMessage::Move { x: 10, y: 10 })
            .await;
        assert!(drain(&mut rx2).is_empty());
    }

    // =====================================================================
    // Timer ticks
    // =====================================================================

    #[tokio::test]
    async fn test_tick_broadcasts_time_and_player_info() {
        let (mut actor, ledger) = new_actor();
        ledger.append_result("alice", "bob").await.expect("append");
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        actor
            .handle_tick(TickUpdate {
                remaining: 34,
                expired: false,
            })
            .await;

        let expected = vec![
            "TIME 34",
            "PLAYER_INFO alice 1 0 100.00 bob 0 1 0.00",
        ];
        assert_eq!(drain(&mut rx1), expected);
        assert_eq!(drain(&mut rx2), expected);
    }

    #[tokio::test]
    async fn test_expired_tick_forfeits_the_turn() {
        let (mut actor, _) = new_actor();
        let (mut rx1, _rx2) = seated_pair(&mut actor);
        assert_eq!(actor.match_state.turn(), Slot::ONE);

        actor
            .handle_tick(TickUpdate {
                remaining: 0,
                expired: true,
            })
            .await;

        assert_eq!(actor.match_state.turn(), Slot::TWO);
        let lines = drain(&mut rx1);
        assert_eq!(&lines[..3], &["TIME 0", "TURN 2", "TIME 35"]);
    }

    #[tokio::test]
    async fn test_tick_with_one_seat_skips_player_info() {
        let (mut actor, _) = new_actor();
        let (_, mut rx) = join(&mut actor, "alice");
        drain(&mut rx);

        actor
            .handle_tick(TickUpdate {
                remaining: 12,
                expired: false,
            })
            .await;

        assert_eq!(drain(&mut rx), vec!["TIME 12"]);
    }

    // =====================================================================
    // Chat
    // =====================================================================

    #[tokio::test]
    async fn test_chat_broadcasts_to_both_seats() {
        let (mut actor, _) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        actor
            .handle_inbound(
                Slot::TWO,
                ClientMessage::Chat {
                    text: "good luck".to_owned(),
                },
            )
            .await;

        assert_eq!(drain(&mut rx1), vec!["CHAT 2 bob : good luck"]);
        assert_eq!(drain(&mut rx2), vec!["CHAT 2 bob : good luck"]);
    }

    #[tokio::test]
    async fn test_chat_history_replayed_to_late_joiner() {
        let (mut actor, _) = new_actor();
        let (_, mut rx1) = join(&mut actor, "alice");
        drain(&mut rx1);

        actor
            .handle_inbound(
                Slot::ONE,
                ClientMessage::Chat {
                    text: "anyone there?".to_owned(),
                },
            )
            .await;

        let (_, mut rx2) = join(&mut actor, "bob");
        assert_eq!(
            drain(&mut rx2),
            vec!["AUTH_OK 2 bob", "CHAT 1 alice : anyone there?", "START 1"]
        );
    }

    // =====================================================================
    // Rematch handshake
    // =====================================================================

    #[tokio::test]
    async fn test_rematch_full_handshake_restarts_match() {
        let (mut actor, _) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        actor.handle_inbound(Slot::ONE, ClientMessage::Reset).await;
        assert_eq!(drain(&mut rx1), vec!["REMATCH_WAIT bob"]);
        assert_eq!(drain(&mut rx2), vec!["REMATCH_PROMPT alice"]);

        actor.handle_inbound(Slot::TWO, ClientMessage::Reset).await;
        let expected = vec!["REMATCH_ACCEPT bob", "RESET", "START 1"];
        assert_eq!(drain(&mut rx1), expected);
        assert_eq!(drain(&mut rx2), expected);
        assert_eq!(actor.match_state.phase(), Phase::Active);
        assert_eq!(actor.match_state.turn(), Slot::ONE);
        assert!(actor.timer.is_running());
    }

    #[tokio::test]
    async fn test_rematch_repeat_request_reports_already_pending() {
        let (mut actor, _) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        actor.handle_inbound(Slot::ONE, ClientMessage::Reset).await;
        drain(&mut rx1);
        drain(&mut rx2);

        actor.handle_inbound(Slot::ONE, ClientMessage::Reset).await;
        assert_eq!(
            drain(&mut rx1),
            vec!["REMATCH_ALREADY your request is already pending"]
        );
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_rematch_without_opponent_fails() {
        let (mut actor, _) = new_actor();
        let (slot, mut rx) = join(&mut actor, "alice");
        drain(&mut rx);

        actor.handle_inbound(slot, ClientMessage::Reset).await;
        assert_eq!(drain(&mut rx), vec!["REMATCH_FAIL waiting for opponent"]);
    }

    // =====================================================================
    // Leaving
    // =====================================================================

    #[tokio::test]
    async fn test_leave_suspends_match_and_broadcasts_waiting() {
        let (mut actor, _) = new_actor();
        let (_rx1, mut rx2) = seated_pair(&mut actor);

        actor.handle_leave(Slot::ONE);

        assert_eq!(drain(&mut rx2), vec!["WAITING"]);
        assert_eq!(actor.match_state.phase(), Phase::Waiting);
        assert!(!actor.timer.is_running());
    }

    #[tokio::test]
    async fn test_leave_cancels_pending_rematch() {
        let (mut actor, _) = new_actor();
        let (mut rx1, mut rx2) = seated_pair(&mut actor);

        actor.handle_inbound(Slot::ONE, ClientMessage::Reset).await;
        drain(&mut rx1);
        drain(&mut rx2);

        actor.handle_leave(Slot::ONE);
        assert_eq!(drain(&mut rx2), vec!["REMATCH_CANCEL", "WAITING"]);
    }

    #[tokio::test]
    async fn test_double_leave_is_harmless() {
        let (mut actor, _) = new_actor();
        let (_rx1, mut rx2) = seated_pair(&mut actor);

        actor.handle_leave(Slot::ONE);
        drain(&mut rx2);
        actor.handle_leave(Slot::ONE);
        assert!(drain(&mut rx2).is_empty());
    }

    #[tokio::test]
    async fn test_rejoin_after_leave_restarts_fresh_match() {
        let (mut actor, _) = new_actor();
        let (_rx1, mut rx2) = seated_pair(&mut actor);
        actor
            .handle_inbound(Slot::ONE, ClientMessage::Move { x: 7, y: 7 })
            .await;
        actor.handle_leave(Slot::ONE);
        drain(&mut rx2);

        let (slot, mut rx3) = join(&mut actor, "carol");
        assert_eq!(slot, Slot::ONE);
        assert_eq!(drain(&mut rx3), vec!["AUTH_OK 1 carol", "START 1"]);
        // The earlier half-played board was cleared.
        assert!(actor.match_state.grid().is_empty_at(7, 7));
        assert_eq!(drain(&mut rx2), vec!["START 1"]);
    }

    // =====================================================================
    // Spawned task
    // =====================================================================

    #[tokio::test(start_paused = true)]
    async fn test_spawned_session_grants_seat_through_handle() {
        let handle = spawn_session(SessionConfig::default(), Arc::new(MemoryLedger::new()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let slot = handle
            .join("alice".to_owned(), tx)
            .await
            .expect("seat granted");
        assert_eq!(slot, Slot::ONE);

        let first = rx.recv().await.expect("message");
        assert_eq!(first.to_string(), "AUTH_OK 1 alice");
        let second = rx.recv().await.expect("message");
        assert_eq!(second.to_string(), "WAITING");

        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_session_frees_seat_after_leave() {
        let handle = spawn_session(SessionConfig::default(), Arc::new(MemoryLedger::new()));

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        let slot1 = handle.join("alice".to_owned(), tx1).await.expect("seat");
        handle.join("bob".to_owned(), tx2).await.expect("seat");

        handle.leave(slot1);
        // Commands are processed in order, so this join sees the free seat.
        let slot3 = handle.join("carol".to_owned(), tx3).await.expect("seat");
        assert_eq!(slot3, Slot::ONE);

        handle.shutdown();
    }
}
