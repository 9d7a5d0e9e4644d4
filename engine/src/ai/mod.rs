pub mod llm;
pub mod nlp;
