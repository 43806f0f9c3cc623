// Career extraction: CV text in, career-history JSON out.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod prompts;
