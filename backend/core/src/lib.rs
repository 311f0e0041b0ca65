pub mod error;
pub mod message;
pub mod types;

pub use error::ScError;
pub use message::{CommandEvent, FormattingMode, GenericEvent, TellPacket, COMMAND_EVENT};
pub use types::{DiscordRole, DiscordUser, IngameUser, SupporterTier};
