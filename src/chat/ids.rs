//! Client-generated ids for optimistic display entries.

/// Unique entry id: prefix + wall-clock millis + random suffix.
#[cfg(target_arch = "wasm32")]
pub fn entry_id(prefix: &str) -> String {
    let now = js_sys::Date::now() as u64;
    let suffix = (js_sys::Math::random() * 1e9) as u32;
    format!("{prefix}-{now}-{suffix:x}")
}

/// Off-wasm fallback so the state machine stays deterministic under native
/// unit tests: a process-wide counter instead of clock + randomness.
#[cfg(not(target_arch = "wasm32"))]
pub fn entry_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(0);
    format!("{prefix}-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = entry_id("user");
        let b = entry_id("user");
        assert_ne!(a, b);
        assert!(a.starts_with("user-"));
    }
}
