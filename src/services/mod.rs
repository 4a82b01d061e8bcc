pub mod binding;
pub mod providers;

pub use binding::{PromptTemplate, TextCompletionBinding};
