//! String-map command vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use bytes::Bytes;

use probewire_core::wire::{read_command, CommandRegistry, PayloadValue};

use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn string_map_vectors() {
    let registry = CommandRegistry::builtin();
    let files = [
        "string_map_two_entries.json",
        "string_map_empty.json",
        "string_map_negative_count.json",
        "string_map_truncated.json",
        "string_map_bad_utf8.json",
        "string_map_duplicate_key.json",
        "unknown_type.json",
    ];

    for f in files {
        let v = load(f);
        let mut raw = Bytes::from(v.frame.decode());
        let res = read_command(&mut raw, &registry);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let mut cmd = res.expect("expected ok command");
        let ex = v.expect.expect("missing expect block");
        let meta = cmd.meta();

        assert_eq!(meta.type_id, ex.type_id, "vector={}", v.description);
        assert_eq!(meta.rx, ex.rx, "vector={}", v.description);
        assert_eq!(meta.tx, ex.tx, "vector={}", v.description);

        let PayloadValue::StringMap(map) = cmd.take_payload().expect("decoded payload present");
        assert_eq!(map, ex.entries, "vector={}", v.description);
    }
}
