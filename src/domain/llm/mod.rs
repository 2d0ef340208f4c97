//! LLM domain - answer generation capability

mod provider;

pub use provider::Generator;

#[cfg(test)]
pub use provider::mock::MockGenerator;
