pub mod api;
pub mod console;
pub mod wallet;

pub use api::{AgentApi, ApiConfig};
pub use console::{ActionKind, ApiBackend, Console, ConsoleError, ConsoleState, SonicWallet};
pub use wallet::{ChainClient, ChainConfig};
