#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Detection is total and deterministic.
        let first = pd_parser::detect_type(input);
        let second = pd_parser::detect_type(input);
        assert_eq!(first, second);
    }
});
