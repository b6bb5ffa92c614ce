//! Infrastructure implementations of the domain seams

pub mod instance;
pub mod llm;
pub mod logging;
pub mod pipeline;
pub mod runtime;
