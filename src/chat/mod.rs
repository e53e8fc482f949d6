pub mod ids;
pub mod state;
