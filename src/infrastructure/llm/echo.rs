//! Offline echo generator

use async_trait::async_trait;

use crate::domain::llm::Generator;
use crate::domain::DomainError;

/// Offline generator that answers `"Mock response for: {prompt}"`
#[derive(Debug, Clone, Default)]
pub struct EchoGenerator;

impl EchoGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Generator for EchoGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(format!("Mock response for: {}", prompt))
    }

    fn provider_name(&self) -> &'static str {
        "echo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo() {
        let text = EchoGenerator::new().generate("What is 2+2?").await.unwrap();

        assert_eq!(text, "Mock response for: What is 2+2?");
    }
}
