//! Fuzz target for scene JSON parsing.
//!
//! Arbitrary bytes go through the JSON reader; anything that parses is then
//! validated and converted, checking for panics along the way.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scenemark::model::io_json::from_json_slice;
use scenemark::model::SceneDocument;
use scenemark::validation::{validate_scene, ValidateOptions};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(document) = from_json_slice(data) else {
        return;
    };
    let opts = ValidateOptions::default();
    match document {
        SceneDocument::Pixel(scene) => {
            let _ = validate_scene(&scene, &opts);
            let _ = scene.to_normalized();
        }
        SceneDocument::Normalized(scene) => {
            let _ = validate_scene(&scene, &opts);
            let _ = scene.clamped(true).to_pixel();
        }
    }
});
