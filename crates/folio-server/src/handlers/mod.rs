pub mod content;
pub mod login;
pub mod messages;
