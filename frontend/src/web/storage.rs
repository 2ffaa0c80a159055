//! LocalStorage 封装模块
//!
//! 以原始字符串读写，令牌不会被额外加上 JSON 引号。

use gloo_storage::{LocalStorage, Storage};
use matricula_shared::SessionStorage;

/// 浏览器 LocalStorage 上的会话存储
#[derive(Clone, Copy, Default)]
pub struct BrowserStorage;

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::raw().remove_item(key).is_ok()
    }
}
