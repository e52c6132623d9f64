// SPDX-License-Identifier: PMPL-1.0-or-later
// Fuzz target for path normalization and key-prefix helpers

#![no_main]

use kvfs_storage::path::{directory_prefix, immediate_child, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let key = normalize(s);
        assert!(!key.contains('\\'));
        assert_eq!(normalize(&key), key);

        let prefix = directory_prefix(s);
        assert_eq!(directory_prefix(&prefix), prefix);

        // A child name never contains a separator.
        if let Some(child) = immediate_child(&key, &prefix) {
            assert!(!child.is_empty());
            assert!(!child.contains('/'));
        }
    }
});
