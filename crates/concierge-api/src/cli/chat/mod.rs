//! Interactive terminal chat with the concierge.
//!
//! This module implements the full chat experience: login prompts, welcome
//! banner, an input loop with a thinking spinner, slash commands, and a
//! renderer driven by session events. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod login;
pub mod loop_runner;
pub mod renderer;
