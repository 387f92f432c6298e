#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the annotation table parser and the filter behind it.
///
/// Any table that parses must also survive the evidence filter, which
/// either filters it or reports a schema error.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(table) = cafa_holdout::parsers::parse_table_str(s) {
            let _ = cafa_holdout::holdout::EvidenceFilter::curated().apply(&table);
        }
    }
});
