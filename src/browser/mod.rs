//! Browser Adapters
//!
//! Implementations of the `crm-core` seams on top of web APIs:
//! - transport: HTTP through `fetch` (gloo-net), cookies always included
//! - storage: `window.localStorage` as a preference store
//! - events: toasts, the global `unauthorized` event and error reporting
//! - files: reading picked files and saving downloads

mod events;
mod files;
mod storage;
mod transport;

pub use events::{BrowserEvents, UNAUTHORIZED_EVENT};
pub use files::{read_file, read_file_list, save_download};
pub use storage::LocalStore;
pub use transport::FetchTransport;
