//! Storage module - content-addressed paths and the repository backend

pub mod github;
pub mod path;
pub mod types;

pub use github::{ContentBackend, GithubContentsClient, GITHUB_ACCEPT};
pub use path::{encode_segments, file_extension, StoredObjectLocation};
pub use types::{
    BackendError, BackendResponse, BackendWriteRequest, ContentsPayload, Credentials, RepoTarget,
    DEFAULT_BRANCH,
};
