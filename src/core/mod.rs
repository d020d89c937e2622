pub mod completion;
pub mod config;
pub mod conversation;
pub mod credentials;
pub mod message;
pub mod openai;
pub mod prompt;
pub mod transcript;
