//! datachat is a terminal chatbot for asking questions about a local dataset.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`dataset`] reads CSV, spreadsheet, JSON and plain-text files into a
//!   uniform in-memory form and summarizes tables.
//! - [`core`] owns the conversation engine, transcript, prompt rendering,
//!   configuration, and the completion client.
//! - [`commands`] classifies lines typed at the chat prompt.
//! - [`api`] defines the chat-completion payloads sent over the wire.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which builds a [`core::conversation::ConversationEngine`]
//! and hands it to [`cli::chat::run_chat_loop`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod dataset;
pub mod utils;
