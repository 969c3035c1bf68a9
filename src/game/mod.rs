pub mod collision;
pub mod constants;
pub mod control;
pub mod grid;
pub mod performance;
pub mod render;
pub mod round;
pub mod round_result;
pub mod snake;
pub mod trail;
