pub mod export;
pub mod http;
pub mod render;
pub mod storage;

pub use export::SnapshotExporter;
pub use http::HttpDashSource;
pub use render::{replay, ConsoleRenderer, SnapshotRenderer};
pub use storage::LocalStorage;
