pub mod record;
pub mod state;
