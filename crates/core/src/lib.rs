pub mod llm;
pub mod options;
pub mod output;
pub mod prompt;
