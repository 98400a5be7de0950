pub mod backlog;
pub mod debt;
pub mod team;
