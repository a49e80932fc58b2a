use glam::Vec3;

// Shared scene/playback tuning constants used by both web and native frontends.

// Cluster layout
pub const PARTICLE_COUNT: usize = 1000;
pub const CLUSTER_JITTER: f32 = 1.0; // per-axis half-width around a cluster center
pub const CONNECTION_COUNT: usize = 20;
pub const CONNECTION_HALF_EXTENTS: Vec3 = Vec3::new(4.0, 2.0, 2.0);

// Neural field layout
pub const FIELD_POINT_COUNT: usize = 2000;
pub const FIELD_HALF_EXTENT: f32 = 10.0;

// Default cluster palette and centers (ML, Computer Vision, NLP, Analytics)
pub const DEFAULT_CLUSTER_IDS: [&str; 4] = ["ml", "computer-vision", "nlp", "analytics"];

pub const DEFAULT_CLUSTER_CENTERS: [[f32; 3]; 4] = [
    [-2.0, 1.0, 0.0],
    [2.0, 1.0, 0.0],
    [0.0, -1.0, 2.0],
    [0.0, 1.0, -2.0],
];

pub const DEFAULT_CLUSTER_COLORS: [[f32; 3]; 4] = [
    [0.2, 0.6, 1.0], // blue
    [0.8, 0.2, 0.9], // purple
    [0.2, 0.9, 0.4], // green
    [0.9, 0.6, 0.2], // orange
];

// Accent colors from the site palette
pub const INDIGO: [f32; 3] = [0.310, 0.275, 0.898]; // #4F46E5
pub const VIOLET: [f32; 3] = [0.486, 0.227, 0.929]; // #7C3AED
pub const PINK: [f32; 3] = [0.925, 0.282, 0.600]; // #EC4899
pub const SKY: [f32; 3] = [0.541, 0.706, 1.0]; // #8AB4FF

// Sprite sizing (world units)
pub const PARTICLE_SPRITE_SIZE: f32 = 0.05;
pub const FIELD_SPRITE_SIZE: f32 = 0.02;
pub const CONNECTION_SPRITE_SIZE: f32 = 0.02;
pub const CONNECTION_SAMPLES: usize = 16; // dots per connection segment
pub const CONNECTION_OPACITY: f32 = 0.2;

// Typed-text timing (milliseconds)
pub const CHAR_DELAY_MS: u64 = 50;
pub const LINE_HOLD_MS: u64 = 1000;
pub const RESET_PAUSE_MS: u64 = 2000;

// Terminal view window
pub const TERMINAL_PREVIOUS_LINES: usize = 5;
pub const TERMINAL_UPCOMING_LINES: usize = 2;

// Reveal effects
pub const METRIC_REVEAL_STEP_MS: u64 = 100;
pub const FIGURE_ENTRANCE_MS: u64 = 4000;
pub const SPEECH_BUBBLE_DELAY_MS: u64 = 3000;

// Contact form
pub const CONTACT_SUBMIT_DELAY_MS: u64 = 1000;

// About page
pub const TOP_ACHIEVEMENTS: usize = 5; // highlighted on the about page
pub const ACHIEVEMENT_ICON_COUNT: usize = 6; // icons cycled per achievement

// Pointer parallax for the floating avatar
pub const AVATAR_PARALLAX: f32 = 0.01;

// Camera
pub const CAMERA_Z_CLUSTERS: f32 = 8.0;
pub const CAMERA_Z_FIELD: f32 = 5.0;
pub const CAMERA_FOV_CLUSTERS_DEG: f32 = 60.0;
pub const CAMERA_FOV_FIELD_DEG: f32 = 75.0;
