//! Generator implementations

mod echo;
mod factory;
mod ollama;
mod openai;

pub use echo::EchoGenerator;
pub use factory::{GeneratorConfig, GeneratorFactory, GeneratorType};
pub use ollama::OllamaGenerator;
pub use openai::OpenAiGenerator;
