pub mod aliases;
pub mod defaults;
pub mod ids;
pub mod images;
pub mod normalize;
