pub mod envelope;
pub mod heatmap_tooltip;
pub mod minigame;
pub mod modal;
pub mod particles;
pub mod poster;
pub mod radar;
