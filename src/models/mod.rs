pub mod candidate;
pub mod document;
pub mod loaders;

pub use candidate::{
    DispatchedMatch, ExtractTextResponse, GenerateJdRequest, GenerateJdResponse, MatchRecord,
    MatchRequest, MatchResponse, WebhookPayload,
};
pub use document::{Document, UploadStatus};
pub use loaders::{load_all_resume_files, load_resume_file};
