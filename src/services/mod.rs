pub mod evaluation;
pub mod pipeline;
pub mod serving;
pub mod training;
