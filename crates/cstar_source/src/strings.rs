//! Process-wide string interner.
//!
//! Byte-equal inputs map to a single stable `&'static str` view. All
//! identifier and string-literal text that outlives the source buffer
//! flows through here.

use std::sync::{Mutex, OnceLock};

use rustc_hash::FxHashSet;

/// A stable interned string view.
pub type IStr = &'static str;

pub struct Strings;

impl Strings {
    /// Intern `text`, returning a view that lives for the process.
    /// Interning the same bytes twice returns pointer-equal views.
    pub fn intern(text: &str) -> IStr {
        static CACHE: OnceLock<Mutex<FxHashSet<&'static str>>> = OnceLock::new();
        let mut cache = CACHE
            .get_or_init(|| Mutex::new(FxHashSet::default()))
            .lock()
            .expect("string interner poisoned");
        if let Some(&interned) = cache.get(text) {
            return interned;
        }
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        cache.insert(leaked);
        leaked
    }
}
