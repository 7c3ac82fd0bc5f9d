pub mod browse;
pub mod dispatch;
pub mod item;
pub mod search;
