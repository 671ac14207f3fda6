/// Use cases module containing application business logic orchestration
mod analyze_resources;

pub use analyze_resources::AnalyzeResourcesUseCase;
