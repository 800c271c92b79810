pub mod dispatch;
pub mod system;
