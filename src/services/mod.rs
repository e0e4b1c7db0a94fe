pub mod batch_uploader;
pub mod jd_service;
pub mod match_requester;
pub mod notifier;

pub use batch_uploader::{BatchUploader, UploadStats};
pub use jd_service::JdService;
pub use match_requester::MatchRequester;
pub use notifier::NotificationDispatcher;
