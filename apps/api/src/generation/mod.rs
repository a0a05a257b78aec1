// Generation pipeline: model output → canonical record → PDFs → public URLs.
// All model calls go through llm_client; all uploads go through storage.

pub mod extract;
pub mod generator;
pub mod handlers;
pub mod normalizer;
pub mod parser;
pub mod retry;
