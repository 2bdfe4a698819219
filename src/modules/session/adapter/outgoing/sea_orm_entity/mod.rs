pub mod blocks;
pub mod sessions;
