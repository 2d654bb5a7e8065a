//! # NEF FAQ Telegram Bot
//!
//! A Telegram bot that lets students browse FAQ categories and questions
//! stored in PostgreSQL, and forwards free-form feedback to an operator.

pub mod bot;
pub mod callback_data;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod errors;
pub mod localization;
pub mod seed;
