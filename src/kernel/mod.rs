pub mod cancel;
pub mod command;
pub mod entities;
pub mod event;
pub mod intent;
pub mod normalize;
pub mod outcome;
pub mod phase;
pub mod reactor;
pub mod routes;
pub mod scheduler;
pub mod speech;
pub mod state;
