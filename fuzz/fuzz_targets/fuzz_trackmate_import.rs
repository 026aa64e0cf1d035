#![no_main]

use libfuzzer_sys::fuzz_target;
use trackmate::convert::import_spots_from_reader;
use trackmate::export_spots;
use trackmate::ExportOptions;

fuzz_target!(|data: &[u8]| {
    // Malformed input must come back as an error, never a panic
    for with_tracks in [false, true] {
        if let Ok(table) = import_spots_from_reader(data, with_tracks) {
            let _ = export_spots(&table, &ExportOptions::from_table(&table));
        }
    }
});
