pub mod config;
pub mod dispatcher;
pub mod error;
pub mod inputs;
pub mod kernel;
pub mod outputs;
pub mod services;
pub mod session;

pub use dispatcher::ActionDispatcher;
pub use error::{Result, VoiceError};
pub use kernel::reactor::SessionReactor;
pub use session::{ControlMessage, SessionController};
