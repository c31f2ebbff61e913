//! UseCase layer.
//!
//! One module per operation. Every use case works on a `&mut ChatState`
//! borrowed from the [`processor::CommandProcessor`], which is the only owner
//! of that state.

mod claim_nickname;
mod connect_participant;
mod delivery;
mod disconnect_participant;
pub mod error;
mod join_room;
mod leave_room;
mod list_rooms;
pub mod processor;
mod rename;
mod send_message;
mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use claim_nickname::ClaimNicknameUseCase;
pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{AdmissionError, NicknameError, ProcessorError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use list_rooms::ListRoomsUseCase;
pub use processor::{CommandProcessor, ProcessorHandle, Request};
pub use rename::RenameUseCase;
pub use send_message::SendMessageUseCase;
pub use state::ChatState;
