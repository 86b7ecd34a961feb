#![no_main]

use libfuzzer_sys::fuzz_target;

// Decoding arbitrary bytes must never panic, and the output contract is a
// dichotomy: a JSON object a standard parser accepts, or a non-empty
// diagnostic that does not start with `{`.
fuzz_target!(|data: &[u8]| {
    let out = qjson::decode_to_string(data);
    assert!(!out.is_empty());
    if out.starts_with('{') {
        serde_json::from_str::<serde_json::Value>(&out).expect("decoder emitted invalid JSON");
    }
});
