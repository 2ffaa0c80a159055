//! 浏览器 API 适配
//!
//! 核心层的抽象（传输、存储）在这里接上 gloo / web_sys 实现。

mod dialog;
mod http;
pub mod router;
mod storage;
mod timer;

pub use dialog::confirm;
pub use http::GlooTransport;
pub use storage::BrowserStorage;
pub use timer::Delay;
