mod saved_state;

pub use saved_state::SavedState;
