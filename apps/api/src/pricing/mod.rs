// Artwork pricing: structured form data in, pricing recommendations out.

pub mod calculator;
pub mod handlers;
pub mod models;
pub mod prompts;
