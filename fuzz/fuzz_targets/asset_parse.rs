//! Fuzz asset parsing.
//!
//! Goals:
//! - Parsing arbitrary text never panics.
//! - Any parsed asset prints back to text that parses to the same value.

#![no_main]

use {libfuzzer_sys::fuzz_target, resource_pricing::Asset};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(asset) = text.parse::<Asset>() else {
        return;
    };
    let printed = asset.to_string();
    let reparsed: Asset = match printed.parse() {
        Ok(asset) => asset,
        Err(err) => panic!("{printed:?} (from {text:?}) failed to reparse: {err}"),
    };
    assert_eq!(reparsed, asset);
});
