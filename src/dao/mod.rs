/// In-memory play storage and the committed play entity.
pub mod play_store;
