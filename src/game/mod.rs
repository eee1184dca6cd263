// Game logic: the fighters, their HUD and the duel session

pub mod characters;
pub mod duel;
pub mod render;
