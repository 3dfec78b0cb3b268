pub mod audio;
pub mod card;
pub mod commentary;
pub mod config;
pub mod console;
pub mod game;
pub mod model;
pub mod state;
pub mod theme;
pub mod traits;
pub mod util;
