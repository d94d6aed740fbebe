#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(document) = std::str::from_utf8(data) {
        // Fuzz matrix definition parsing - this should never panic
        if let Ok(definition) = mendel::MatrixDefinition::from_toml_str(document) {
            let _ = mendel::PropertySpace::from_definition(&definition);
        }
    }
});
