//! Configuration Tests.
//!
//! JSON parsing with defaults and numeric policy selectors, the mode
//! presets, and every validation failure.

use memsim_core::common::ConfigError;
use memsim_core::config::{
    CacheConfig, Config, MemoryController, PagePolicy, ReplacementPolicy, SimMode, Topology,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Defaults and JSON
// ══════════════════════════════════════════════════════════

#[test]
fn default_is_a_valid_single_core_hierarchy() {
    let config = Config::default();
    assert_eq!(config.general.topology, Topology::SingleCore);
    assert_eq!(config.general.cores, 1);
    assert_eq!(config.cache.line_bytes, 64);
    assert_eq!(config.cache.l1_d, CacheConfig::new(32 * 1024, 8, 1));
    assert_eq!(config.cache.l2, CacheConfig::new(1024 * 1024, 16, 10));
    assert_eq!(config.memory.controller, MemoryController::Simple);
    assert_eq!(config.memory.fixed_latency, 100);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn empty_json_takes_every_default() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.cache.l2, Config::default().cache.l2);
    assert_eq!(config.memory.page_policy, PagePolicy::Closed);
}

#[rstest]
#[case("\"0\"", ReplacementPolicy::Fifo)]
#[case("\"1\"", ReplacementPolicy::StaticPartition)]
#[case("\"4\"", ReplacementPolicy::DynamicPartition)]
#[case("\"5\"", ReplacementPolicy::CoreAgnostic)]
#[case("\"swp\"", ReplacementPolicy::StaticPartition)]
#[case("\"CoreAgnostic\"", ReplacementPolicy::CoreAgnostic)]
fn policy_selectors_parse(#[case] selector: &str, #[case] expected: ReplacementPolicy) {
    let json = format!(
        r#"{{ "cache": {{ "l2": {{
            "size_bytes": 65536, "ways": 8, "latency": 10, "policy": {selector}
        }} }} }}"#
    );
    let config = Config::from_json(&json).unwrap();
    assert_eq!(config.cache.l2.policy, expected);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let json = r#"{ "cache": { "l2": { "policy": "lru" } } }"#;
    assert!(Config::from_json(json).is_err());
}

#[test]
fn memory_section_parses() {
    let json = r#"{
        "memory": { "controller": "DRAM", "page_policy": "Open", "fixed_latency": 7 }
    }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.memory.controller, MemoryController::Dram);
    assert_eq!(config.memory.page_policy, PagePolicy::Open);
    assert_eq!(config.memory.fixed_latency, 7);
}

// ══════════════════════════════════════════════════════════
// 2. Presets
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(SimMode::A, Topology::SingleCache, 1, MemoryController::Simple, ReplacementPolicy::Fifo)]
#[case(SimMode::B, Topology::SingleCore, 1, MemoryController::Simple, ReplacementPolicy::Fifo)]
#[case(SimMode::C, Topology::SingleCore, 1, MemoryController::Dram, ReplacementPolicy::Fifo)]
#[case(SimMode::D, Topology::MultiCore, 2, MemoryController::Dram, ReplacementPolicy::Fifo)]
#[case(
    SimMode::E,
    Topology::MultiCore,
    2,
    MemoryController::Dram,
    ReplacementPolicy::StaticPartition
)]
fn presets_match_the_classic_modes(
    #[case] mode: SimMode,
    #[case] topology: Topology,
    #[case] cores: usize,
    #[case] controller: MemoryController,
    #[case] l2_policy: ReplacementPolicy,
) {
    let config = Config::preset(mode);
    assert_eq!(config.general.topology, topology);
    assert_eq!(config.general.cores, cores);
    assert_eq!(config.memory.controller, controller);
    assert_eq!(config.cache.l2.policy, l2_policy);
    assert_eq!(config.validate(), Ok(()));
}

// ══════════════════════════════════════════════════════════
// 3. Validation
// ══════════════════════════════════════════════════════════

#[test]
fn zero_line_size_is_rejected() {
    let mut config = Config::default();
    config.cache.line_bytes = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroLineSize));
}

#[rstest]
#[case(Topology::SingleCache, 2, 1)]
#[case(Topology::SingleCore, 2, 1)]
#[case(Topology::MultiCore, 1, 2)]
#[case(Topology::MultiCore, 4, 2)]
fn core_count_must_match_topology(
    #[case] topology: Topology,
    #[case] cores: usize,
    #[case] expected: usize,
) {
    let mut config = Config::default();
    config.general.topology = topology;
    config.general.cores = cores;
    assert_eq!(
        config.validate(),
        Err(ConfigError::UnsupportedCores {
            topology: topology.name(),
            expected,
            cores,
        })
    );
}

#[test]
fn capacity_must_be_whole_sets() {
    let mut config = Config::default();
    config.cache.l2.size_bytes = 1000;
    assert_eq!(
        config.validate(),
        Err(ConfigError::UnevenGeometry {
            level: "L2",
            size_bytes: 1000,
            line_bytes: 64,
            ways: 16,
        })
    );
}

#[test]
fn zero_ways_is_rejected() {
    let mut config = Config::default();
    config.cache.l1_i.ways = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyCache { level: "L1-I", ways: 0, .. })
    ));
}

#[rstest]
#[case(0)]
#[case(16)]
#[case(17)]
fn partition_quota_must_leave_both_cores_a_way(#[case] quota: usize) {
    let mut config = Config::preset(SimMode::E);
    config.cache.swp_core0_ways = quota;
    assert_eq!(
        config.validate(),
        Err(ConfigError::QuotaOutOfRange {
            level: "L2",
            quota,
            ways: 16,
        })
    );
}

#[test]
fn quota_is_ignored_by_unpartitioned_levels() {
    let mut config = Config::preset(SimMode::D);
    config.cache.swp_core0_ways = 0;
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn row_buffer_needs_whole_lines() {
    let mut config = Config::preset(SimMode::C);
    config.cache.line_bytes = 2048;
    assert_eq!(
        config.validate(),
        Err(ConfigError::LineSizeVsRowBuffer {
            line_bytes: 2048,
            row_bytes: 1024,
        })
    );

    config.memory.controller = MemoryController::Simple;
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn single_cache_only_checks_the_data_cache() {
    let mut config = Config::preset(SimMode::A);
    config.cache.l2.size_bytes = 1;
    config.cache.l1_i.ways = 0;
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn errors_name_the_offending_level() {
    let mut config = Config::default();
    config.cache.l1_d.size_bytes = 100;
    let message = config.validate().unwrap_err().to_string();
    assert!(message.starts_with("L1-D:"), "{message}");
}
