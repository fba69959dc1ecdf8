pub mod router;
pub mod speech;

pub use router::LogRouter;
pub use speech::{CommandSpeaker, ConsoleSpeaker};
