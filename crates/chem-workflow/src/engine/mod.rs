mod research_engine;

pub use research_engine::ResearchEngine;
