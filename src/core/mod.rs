// src/core/mod.rs

pub mod entities;
pub mod html;
pub mod net;
pub mod sanitize;

pub use html::{tokenize, Attrs, Event, Tokenizer};
