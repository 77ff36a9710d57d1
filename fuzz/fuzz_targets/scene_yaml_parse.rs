//! Fuzz target for scene YAML parsing.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scenemark::model::io_yaml::from_yaml_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = from_yaml_slice(data);
});
