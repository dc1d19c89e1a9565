pub mod background;
pub mod entities;
pub mod input;
pub mod session;
