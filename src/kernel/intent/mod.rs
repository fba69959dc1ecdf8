pub mod classifier;
pub mod types;

pub use classifier::{classify, IntentClassifier, IntentRule};
pub use types::IntentKind;
