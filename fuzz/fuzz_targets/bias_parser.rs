#![no_main]

use libfuzzer_sys::fuzz_target;
use split_tests::bias::BiasVector;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Any declaration either parses to exactly `containers` finite values or errors
        let containers = 1 + data.len() % 8;
        if let Ok(biases) = BiasVector::parse(input, containers) {
            assert_eq!(biases.len(), containers);
            assert!(biases.as_slice().iter().all(|b| b.is_finite()));
        }
    }
});
