//! Command processor: the single owner of the chat state.
//!
//! Sessions never touch rooms, nicknames or the client registry. They send a
//! [`Request`] over a bounded queue and the processor applies requests one at
//! a time in arrival order. Admission and nickname claims need an answer, so
//! they carry a oneshot reply channel; plain commands do not.

use std::sync::Arc;

use tcpchat_shared::time::Clock;
use tokio::sync::{mpsc, oneshot};

use crate::domain::{
    ClientId, Command, CommandKind, MessagePusher, Nickname, PusherChannel, Timestamp,
};

use super::{
    ChatState, ClaimNicknameUseCase, ConnectParticipantUseCase, DisconnectParticipantUseCase,
    JoinRoomUseCase, ListRoomsUseCase, RenameUseCase, SendMessageUseCase,
    error::{AdmissionError, NicknameError, ProcessorError},
};

/// A request for the command processor.
#[derive(Debug)]
pub enum Request {
    /// A freshly accepted connection asks for a slot.
    Admit {
        client_id: ClientId,
        sender: PusherChannel,
        reply: oneshot::Sender<Result<(), AdmissionError>>,
    },
    /// An onboarding session proposes a nickname.
    ClaimNickname {
        client_id: ClientId,
        candidate: String,
        reply: oneshot::Sender<Result<Nickname, NicknameError>>,
    },
    /// A translated client command.
    Command(Command),
}

/// Cloneable sending side of the processor queue, one per session.
#[derive(Debug, Clone)]
pub struct ProcessorHandle {
    sender: mpsc::Sender<Request>,
}

impl ProcessorHandle {
    pub fn new(sender: mpsc::Sender<Request>) -> Self {
        Self { sender }
    }

    /// Ask for admission, registering `sender` as the client's outbound queue.
    pub async fn admit(
        &self,
        client_id: ClientId,
        sender: PusherChannel,
    ) -> Result<(), ProcessorError> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Admit {
            client_id,
            sender,
            reply,
        })
        .await?;
        response.await.map_err(|_| ProcessorError::Closed)??;
        Ok(())
    }

    /// Try to claim `candidate` as the client's nickname.
    pub async fn claim_nickname(
        &self,
        client_id: ClientId,
        candidate: String,
    ) -> Result<Nickname, ProcessorError> {
        let (reply, response) = oneshot::channel();
        self.send(Request::ClaimNickname {
            client_id,
            candidate,
            reply,
        })
        .await?;
        Ok(response.await.map_err(|_| ProcessorError::Closed)??)
    }

    /// Queue a command. Waits while the queue is full.
    pub async fn submit(&self, command: Command) -> Result<(), ProcessorError> {
        self.send(Request::Command(command)).await
    }

    async fn send(&self, request: Request) -> Result<(), ProcessorError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| ProcessorError::Closed)
    }
}

/// Create a processor queue of the given capacity.
pub fn channel(capacity: usize) -> (ProcessorHandle, mpsc::Receiver<Request>) {
    let (sender, receiver) = mpsc::channel(capacity);
    (ProcessorHandle::new(sender), receiver)
}

/// Applies requests to the chat state.
pub struct CommandProcessor {
    state: ChatState,
    clock: Arc<dyn Clock>,
    connect_participant: ConnectParticipantUseCase,
    claim_nickname: ClaimNicknameUseCase,
    join_room: JoinRoomUseCase,
    list_rooms: ListRoomsUseCase,
    send_message: SendMessageUseCase,
    rename: RenameUseCase,
    disconnect_participant: DisconnectParticipantUseCase,
}

impl CommandProcessor {
    pub fn new(
        state: ChatState,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        max_clients: usize,
    ) -> Self {
        Self {
            state,
            clock,
            connect_participant: ConnectParticipantUseCase::new(
                message_pusher.clone(),
                max_clients,
            ),
            claim_nickname: ClaimNicknameUseCase::new(),
            join_room: JoinRoomUseCase::new(message_pusher.clone()),
            list_rooms: ListRoomsUseCase::new(message_pusher.clone()),
            send_message: SendMessageUseCase::new(message_pusher.clone()),
            rename: RenameUseCase::new(message_pusher.clone()),
            disconnect_participant: DisconnectParticipantUseCase::new(message_pusher),
        }
    }

    /// Drain the queue until every handle is dropped.
    pub async fn run(mut self, mut receiver: mpsc::Receiver<Request>) {
        tracing::debug!("Command processor started");
        while let Some(request) = receiver.recv().await {
            self.handle(request).await;
        }
        tracing::info!("Command processor stopped");
    }

    /// Apply one request.
    pub async fn handle(&mut self, request: Request) {
        match request {
            Request::Admit {
                client_id,
                sender,
                reply,
            } => {
                let connected_at = Timestamp::new(self.clock.now_millis());
                let result = self
                    .connect_participant
                    .execute(&mut self.state, client_id, sender, connected_at)
                    .await;
                if reply.send(result).is_err() {
                    // The acceptor gave up waiting; undo the admission.
                    self.disconnect_participant
                        .execute(&mut self.state, client_id, false)
                        .await;
                }
            }
            Request::ClaimNickname {
                client_id,
                candidate,
                reply,
            } => {
                let result = self
                    .claim_nickname
                    .execute(&mut self.state, client_id, candidate);
                if let Ok(nickname) = &result {
                    tracing::info!("Client '{}' is now known as '{}'", client_id, nickname);
                }
                let _ = reply.send(result);
            }
            Request::Command(command) => self.apply(command).await,
        }
    }

    async fn apply(&mut self, command: Command) {
        let Command {
            client_id,
            issued_at,
            kind,
        } = command;
        let onboarded = self
            .state
            .clients
            .get(&client_id)
            .is_some_and(|client| client.is_onboarded());
        let state = &mut self.state;

        match kind {
            CommandKind::Disconnected => {
                self.disconnect_participant
                    .execute(state, client_id, false)
                    .await;
            }
            kind if !onboarded => {
                tracing::warn!(
                    "Ignoring {:?} from client '{}' that has not chosen a nickname",
                    kind,
                    client_id
                );
            }
            CommandKind::Join(room_name) => {
                self.join_room
                    .execute(state, client_id, room_name, issued_at)
                    .await;
            }
            CommandKind::ListRooms => self.list_rooms.execute(state, client_id).await,
            CommandKind::SendMessage(text) => {
                self.send_message
                    .execute(state, client_id, &text, issued_at)
                    .await;
            }
            CommandKind::Rename(new_name) => {
                self.rename.execute(state, client_id, new_name).await;
            }
            CommandKind::Quit => {
                self.disconnect_participant
                    .execute(state, client_id, true)
                    .await;
            }
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClientIdFactory, RoomName, reply::FAREWELL},
        usecase::test_support::RecordingPusher,
    };
    use tcpchat_shared::time::FixedClock;

    fn create_processor(max_clients: usize) -> (CommandProcessor, Arc<RecordingPusher>) {
        let pusher = RecordingPusher::new();
        let processor = CommandProcessor::new(
            ChatState::in_memory(None),
            pusher.clone(),
            Arc::new(FixedClock::new(0)),
            max_clients,
        );
        (processor, pusher)
    }

    async fn admit(processor: &mut CommandProcessor) -> Result<ClientId, AdmissionError> {
        let client_id = ClientIdFactory::generate();
        let (sender, _receiver) = mpsc::channel(8);
        let (reply, response) = oneshot::channel();
        processor
            .handle(Request::Admit {
                client_id,
                sender,
                reply,
            })
            .await;
        response.await.unwrap().map(|_| client_id)
    }

    async fn claim(
        processor: &mut CommandProcessor,
        client_id: ClientId,
        name: &str,
    ) -> Result<Nickname, NicknameError> {
        let (reply, response) = oneshot::channel();
        processor
            .handle(Request::ClaimNickname {
                client_id,
                candidate: name.to_string(),
                reply,
            })
            .await;
        response.await.unwrap()
    }

    async fn onboard(processor: &mut CommandProcessor, name: &str) -> ClientId {
        let client_id = admit(processor).await.unwrap();
        claim(processor, client_id, name).await.unwrap();
        client_id
    }

    async fn send(processor: &mut CommandProcessor, client_id: ClientId, kind: CommandKind) {
        processor
            .handle(Request::Command(Command::new(
                client_id,
                Timestamp::new(0),
                kind,
            )))
            .await;
    }

    fn join(room: &str) -> CommandKind {
        CommandKind::Join(Some(room.to_string()))
    }

    fn message(text: &str) -> CommandKind {
        CommandKind::SendMessage(text.to_string())
    }

    fn room(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_scenario_a_join_and_chat() {
        // テスト項目: alice と bob が同じルームで会話する（エコーなし、履歴あり）
        // given (前提条件):
        let (mut processor, pusher) = create_processor(9);
        let alice = onboard(&mut processor, "alice").await;
        let bob = onboard(&mut processor, "bob").await;
        send(&mut processor, alice, join("lobby")).await;

        // when (操作):
        send(&mut processor, bob, join("lobby")).await;
        send(&mut processor, alice, message("hi")).await;

        // then (期待する結果):
        let alice_lines = pusher.lines_for(&alice);
        assert_eq!(alice_lines, vec!["bob joined the room"]);
        let bob_lines = pusher.lines_for(&bob);
        assert_eq!(bob_lines.len(), 2);
        assert_eq!(bob_lines[0], "alice joined the room");
        assert!(bob_lines[1].ends_with("][alice]: hi"));
        let lobby = processor.state().rooms.get(&room("lobby")).unwrap();
        assert_eq!(lobby.history_len(), 3);
    }

    #[tokio::test]
    async fn test_scenario_b_history_replay() {
        // テスト項目: 後から参加したクライアントに過去の N 行が順番どおり届く
        // given (前提条件):
        let (mut processor, pusher) = create_processor(9);
        let alice = onboard(&mut processor, "alice").await;
        send(&mut processor, alice, join("lobby")).await;
        send(&mut processor, alice, message("one")).await;
        send(&mut processor, alice, message("two")).await;
        let carol = onboard(&mut processor, "carol").await;

        // when (操作):
        send(&mut processor, carol, join("lobby")).await;
        send(&mut processor, alice, message("three")).await;

        // then (期待する結果):
        let carol_lines = pusher.lines_for(&carol);
        assert_eq!(carol_lines.len(), 2);
        let backlog: Vec<&str> = carol_lines[0].split('\n').collect();
        assert_eq!(backlog.len(), 3);
        assert_eq!(backlog[0], "alice joined the room");
        assert!(backlog[1].ends_with("][alice]: one"));
        assert!(backlog[2].ends_with("][alice]: two"));
        assert!(carol_lines[1].ends_with("][alice]: three"));
        assert_eq!(pusher.lines_for(&alice).last().unwrap(), "carol joined the room");
    }

    #[tokio::test]
    async fn test_scenario_c_nickname_collision() {
        // テスト項目: 使用中の名前は確保できず、解放後は確保できる
        // given (前提条件):
        let (mut processor, _pusher) = create_processor(9);
        let alice = onboard(&mut processor, "alice").await;
        let second = admit(&mut processor).await.unwrap();

        // when (操作):
        let taken = claim(&mut processor, second, "alice").await;
        let empty = claim(&mut processor, second, "   ").await;
        send(&mut processor, alice, CommandKind::Quit).await;
        let reused = claim(&mut processor, second, " alice ").await;

        // then (期待する結果):
        assert_eq!(taken, Err(NicknameError::Taken("alice".to_string())));
        assert_eq!(empty, Err(NicknameError::Empty));
        assert_eq!(reused.unwrap().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_scenario_d_room_switch() {
        // テスト項目: ルームを移動すると前のルームに退室通知が届き、所属は常に一つ
        // given (前提条件):
        let (mut processor, pusher) = create_processor(9);
        let alice = onboard(&mut processor, "alice").await;
        let bob = onboard(&mut processor, "bob").await;
        send(&mut processor, alice, join("lobby")).await;
        send(&mut processor, bob, join("lobby")).await;
        pusher.clear();

        // when (操作):
        send(&mut processor, alice, join("office")).await;
        send(&mut processor, alice, message("anyone?")).await;

        // then (期待する結果):
        assert_eq!(pusher.lines_for(&bob), vec!["alice has left the room"]);
        let state = processor.state();
        let memberships = [room("lobby"), room("office")]
            .iter()
            .filter(|name| state.rooms.get(name).unwrap().is_member(&alice))
            .count();
        assert_eq!(memberships, 1);
        assert!(state.rooms.get(&room("office")).unwrap().is_member(&alice));
    }

    #[tokio::test]
    async fn test_admission_cap() {
        // テスト項目: 上限を超える接続は拒否され、状態は作られない
        // given (前提条件):
        let (mut processor, _pusher) = create_processor(2);
        let first = admit(&mut processor).await.unwrap();
        admit(&mut processor).await.unwrap();

        // when (操作):
        let rejected = admit(&mut processor).await;
        send(&mut processor, first, CommandKind::Disconnected).await;
        let after_release = admit(&mut processor).await;

        // then (期待する結果):
        assert_eq!(rejected, Err(AdmissionError::ServerFull { max_clients: 2 }));
        assert!(after_release.is_ok());
        assert_eq!(processor.state().clients.count(), 2);
    }

    #[tokio::test]
    async fn test_commands_before_onboarding_are_ignored() {
        // テスト項目: ニックネーム確定前のコマンドは無視される
        // given (前提条件):
        let (mut processor, pusher) = create_processor(9);
        let client_id = admit(&mut processor).await.unwrap();

        // when (操作):
        send(&mut processor, client_id, join("lobby")).await;
        send(&mut processor, client_id, CommandKind::ListRooms).await;
        send(&mut processor, client_id, CommandKind::Quit).await;

        // then (期待する結果):
        assert!(pusher.lines_for(&client_id).is_empty());
        assert_eq!(processor.state().rooms.count(), 0);
        assert_eq!(processor.state().clients.count(), 1);
    }

    #[tokio::test]
    async fn test_quit_then_disconnected_is_harmless() {
        // テスト項目: `/quit` の後の切断通知は無視される
        // given (前提条件):
        let (mut processor, pusher) = create_processor(9);
        let alice = onboard(&mut processor, "alice").await;
        let bob = onboard(&mut processor, "bob").await;
        send(&mut processor, alice, join("lobby")).await;
        send(&mut processor, bob, join("lobby")).await;
        pusher.clear();

        // when (操作):
        send(&mut processor, alice, CommandKind::Quit).await;
        send(&mut processor, alice, CommandKind::Disconnected).await;

        // then (期待する結果):
        assert_eq!(pusher.lines_for(&alice), vec![FAREWELL]);
        assert_eq!(pusher.lines_for(&bob), vec!["alice has left the room"]);
        assert_eq!(processor.state().clients.count(), 1);
        assert_eq!(processor.state().nicknames.count(), 1);
    }

    #[test]
    fn test_processor_future_can_be_spawned() {
        // テスト項目: run() の Future が Send であり、tokio::spawn に渡せる
        // given (前提条件):
        fn assert_send<T: Send>(_: &T) {}
        let (processor, _pusher) = create_processor(1);
        let (_handle, receiver) = channel(1);

        // when (操作):
        let future = processor.run(receiver);

        // then (期待する結果): コンパイルが通ること
        assert_send(&future);
    }

    #[tokio::test]
    async fn test_handle_roundtrip_through_spawned_processor() {
        // テスト項目: ProcessorHandle 経由で受け入れとニックネーム確保ができる
        // given (前提条件):
        let (processor, _pusher) = create_processor(1);
        let (handle, receiver) = channel(16);
        let task = tokio::spawn(processor.run(receiver));
        let client_id = ClientIdFactory::generate();
        let (sender, _outbound) = mpsc::channel(8);

        // when (操作):
        handle.admit(client_id, sender).await.unwrap();
        let nickname = handle
            .claim_nickname(client_id, "alice".to_string())
            .await
            .unwrap();
        let (second_sender, _second_outbound) = mpsc::channel(8);
        let rejected = handle
            .admit(ClientIdFactory::generate(), second_sender)
            .await;

        // then (期待する結果):
        assert_eq!(nickname.as_str(), "alice");
        assert_eq!(
            rejected,
            Err(ProcessorError::Admission(AdmissionError::ServerFull {
                max_clients: 1
            }))
        );

        drop(handle);
        task.await.unwrap();
    }
}
