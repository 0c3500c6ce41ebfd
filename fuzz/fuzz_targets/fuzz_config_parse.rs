//! Fuzzes driver configuration parsing.
//!
//! Arbitrary bytes go through the JSON and YAML loaders. Parsing may fail,
//! but a document that parses and validates must build a driver.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_config_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use racebot_driver::{Driver, DriverConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for parsed in [DriverConfig::from_json_str(text), DriverConfig::from_yaml_str(text)] {
        if let Ok(config) = parsed
            && config.validate().is_ok()
        {
            assert!(Driver::new(config).is_ok());
        }
    }
});
