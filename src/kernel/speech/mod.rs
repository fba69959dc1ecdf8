pub mod feedback;

pub use feedback::{format_amount, to_spoken_text};
