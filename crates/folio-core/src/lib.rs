pub mod avatar;
pub mod constants;
pub mod layout;
pub mod motion;
pub mod playback;
pub mod profile;
pub mod reveal;
pub mod scene;
pub mod state;
pub mod timers;
pub mod views;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use avatar::*;
pub use constants::*;
pub use layout::*;
pub use motion::*;
pub use playback::*;
pub use profile::*;
pub use reveal::*;
pub use scene::*;
pub use state::*;
pub use timers::*;
pub use views::*;
