pub mod failure;
pub mod flow;
pub mod page_events;
pub mod page_state;
pub mod round;
pub mod rules;
pub mod transcript;

// Re-export main components
pub use failure::*;
pub use flow::*;
pub use page_events::*;
pub use page_state::*;
pub use round::*;
pub use rules::*;
pub use transcript::*;
