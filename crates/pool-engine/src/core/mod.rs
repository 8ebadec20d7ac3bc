pub mod ball;
pub mod collision;
pub mod pocket;
pub mod rack;
pub mod session;
pub mod simulation;
pub mod table;
pub mod time;
