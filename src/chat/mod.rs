// Gateway module for the conversation controller - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod controller;
mod message;
mod render;
mod step;

// Public re-exports - the ONLY way to access chat functionality
pub use controller::{
    ChatController, ConversationState, ProfileData, TurnAction, INVALID_RANK_MESSAGE,
    PREDICTION_FAILED_MESSAGE,
};
pub use message::{ChatMessage, MessageRole};
pub use render::{format_results, NO_RESULTS_MESSAGE};
pub use step::{canonical_option, Step};
