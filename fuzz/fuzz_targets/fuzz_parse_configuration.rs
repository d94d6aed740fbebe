#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use mendel::PropertySpace;

static SPACE: OnceLock<PropertySpace> = OnceLock::new();

fn space() -> &'static PropertySpace {
    SPACE.get_or_init(|| {
        PropertySpace::from_toml_str(
            r#"
[[property]]
name = "OSGroup"
default = "Windows_NT"

[[property.value]]
value = "Windows_NT"
aliases = ["Windows"]

[[property.value]]
value = "Linux"

[[property]]
name = "Architecture"
default = "x86"

[[property.value]]
value = "x86"

[[property.value]]
value = "x64"
aliases = ["amd64"]
"#,
        )
        .expect("static definition is well-formed")
    })
}

fuzz_target!(|data: &[u8]| {
    if let Ok(identifier) = std::str::from_utf8(data) {
        // Fuzz identifier parsing - this should never panic
        if let Ok(point) = space().parse(identifier) {
            let _ = point.configuration_strings().count();
        }
    }
});
