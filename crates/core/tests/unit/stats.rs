//! Statistics Tests.
//!
//! Counter bookkeeping, derived ratios, and the text report format.

use memsim_core::common::AccessType;
use memsim_core::stats::{CacheStats, DramStats, MemSysStats};
use pretty_assertions::assert_eq;

fn render(write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
    let mut out = Vec::new();
    write(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn empty_counters_report_zero_ratios() {
    let cache = CacheStats::default();
    assert_eq!(cache.read_miss_ratio(), 0.0);
    assert_eq!(cache.write_miss_ratio(), 0.0);
    assert_eq!(DramStats::default().avg_read_delay(), 0.0);
    assert_eq!(MemSysStats::default().avg_delay(AccessType::Store), 0.0);
}

#[test]
fn cache_record_splits_direction_and_outcome() {
    let mut stats = CacheStats::default();
    stats.record(false, true);
    stats.record(false, false);
    stats.record(false, false);
    stats.record(true, false);
    assert_eq!(
        stats,
        CacheStats {
            read_access: 3,
            write_access: 1,
            read_miss: 2,
            write_miss: 1,
            dirty_evicts: 0,
        }
    );
    assert!((stats.read_miss_ratio() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(stats.write_miss_ratio(), 1.0);
}

#[test]
fn memsys_averages_per_kind() {
    let mut stats = MemSysStats::default();
    stats.record(AccessType::Load, 111);
    stats.record(AccessType::Load, 1);
    stats.record(AccessType::Fetch, 11);
    assert_eq!(stats.accesses(AccessType::Load), 2);
    assert_eq!(stats.accesses(AccessType::Store), 0);
    assert_eq!(stats.avg_delay(AccessType::Load), 56.0);
    assert_eq!(stats.avg_delay(AccessType::Fetch), 11.0);
}

#[test]
fn cache_report_lines() {
    let mut stats = CacheStats::default();
    stats.record(false, false);
    stats.record(false, true);
    stats.dirty_evicts = 4;

    let text = render(|out| stats.write_report("L2CACHE", out));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "L2CACHE_READ_ACCESS    \t\t :          2");
    assert_eq!(lines[3], "L2CACHE_READ_MISS      \t\t :          1");
    assert_eq!(lines[5], "L2CACHE_READ_MISS_PERC  \t\t :     50.000");
    assert_eq!(lines[7], "L2CACHE_DIRTY_EVICTS   \t\t :          4");
}

#[test]
fn dram_and_memsys_report_lines() {
    let mut dram = DramStats::default();
    dram.record(false, 100);
    dram.record(false, 55);
    let text = render(|out| dram.write_report(out));
    assert!(text.contains("DRAM_READ_ACCESS\t\t :          2"));
    assert!(text.contains("DRAM_READ_DELAY_AVG\t\t :     77.500"));

    let mut memsys = MemSysStats::default();
    memsys.record(AccessType::Store, 3);
    let text = render(|out| memsys.write_report(out));
    assert!(text.contains("MEMSYS_STORE_ACCESS   \t\t :          1"));
    assert!(text.contains("MEMSYS_STORE_AVGDELAY \t\t :      3.000"));
}

#[test]
fn stats_serialize_with_field_names() {
    let mut stats = DramStats::default();
    stats.record(true, 10);
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["write_access"], 1);
    assert_eq!(json["write_delay"], 10);
}
