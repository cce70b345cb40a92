pub mod matching;
pub mod cascade;
pub mod rules;

pub use matching::*;
pub use cascade::*;
pub use rules::*;
