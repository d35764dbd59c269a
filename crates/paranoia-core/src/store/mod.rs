pub mod memory;
pub mod port;

pub use port::QuestionStore;
