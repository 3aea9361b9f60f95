// sbm services
// Services provide the collaborators around the store: page titles, prompts, the URL viewer and queries.

pub mod content_fetcher;
pub mod prompt;
pub mod query_engine;
pub mod viewer;
