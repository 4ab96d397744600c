pub mod burnout;
pub mod journal;
