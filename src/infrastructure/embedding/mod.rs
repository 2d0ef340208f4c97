//! Embedder implementations

mod factory;
mod hashing;
mod ollama;
mod openai;

pub use factory::{EmbedderConfig, EmbedderFactory, EmbedderType};
pub use hashing::{HashingEmbedder, DEFAULT_HASHING_DIMENSIONS};
pub use ollama::{OllamaEmbedder, DEFAULT_OLLAMA_BASE_URL};
pub use openai::OpenAiEmbedder;
