//! Filter and summary properties over mapped records.

use alarm_analyzer::core::map_records;
use alarm_analyzer::{
    AlarmClass, EnabledStatus, FilterCriteria, InterlockFilter, RawRecord, Record, apply_filters, compute_stats,
};
use serde_json::{Value, json};

fn rows(values: Vec<Value>) -> Vec<RawRecord> {
    values
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        })
        .collect()
}

fn two_records() -> Vec<Record> {
    map_records(&rows(vec![
        json!({"I/O name": "HHInAlarm", "Signal": 1, "Text 0": "M1"}),
        json!({"I/O name": "LInAlarm", "Signal": 0, "Text 0": ""}),
    ]))
}

fn plant() -> Vec<Record> {
    map_records(&rows(vec![
        json!({"Hierarc": "AREA1/TANKS", "Chart": "TK101", "Block": "LT101_ALM", "I/O name": "HHInAlarm",
               "Value": 95.0, "Signal": 1, "Text 0": "P101 stop", "Unit": "%"}),
        json!({"Hierarc": "AREA1/TANKS", "Chart": "TK101", "Block": "LT101_ALM", "I/O name": "LLInAlarm",
               "Value": 5.0, "Signal": 1, "Text 0": "", "Unit": "%"}),
        json!({"Hierarc": "AREA2/PUMPS", "Chart": "P201", "Block": "PT201_ALM", "I/O name": "HInAlarm",
               "Value": "12.5", "Signal": 0, "Text 0": "", "Rung Name": "R_P201", "Unit": "bar"}),
        json!({"Hierarc": "AREA2/PUMPS", "Chart": "P201", "Block": "PT201_DEV", "I/O name": "DevInAlarm",
               "Value": 1, "Signal": "1", "Text 0": "V203 close", "Unit": "bar"}),
        json!({"Hierarc": "AREA3", "Chart": "FURN", "Block": "TE301_ALM", "I/O name": "LInAlarm",
               "Signal": 2, "Identification": "Furnace outlet"}),
        json!({"Chart": "FURN", "Block": "TE302", "I/O name": null, "Signal": null}),
    ]))
}

fn criteria_grid() -> Vec<FilterCriteria> {
    let searches = ["", "area2", "P101", "zzz"];
    let classes: Vec<Vec<AlarmClass>> = vec![
        vec![],
        vec![AlarmClass::HighHigh],
        vec![AlarmClass::Low, AlarmClass::Other],
        AlarmClass::ALL.to_vec(),
    ];
    let mut grid = Vec::new();
    for search in searches {
        for types in &classes {
            for enabled in [EnabledStatus::All, EnabledStatus::Enabled, EnabledStatus::Disabled] {
                for interlock in [InterlockFilter::All, InterlockFilter::Yes, InterlockFilter::No] {
                    grid.push(
                        FilterCriteria::new()
                            .with_search(search)
                            .with_alarm_types(types.iter().copied())
                            .with_enabled_status(enabled)
                            .with_interlock(interlock),
                    );
                }
            }
        }
    }
    grid
}

fn is_subsequence(sub: &[Record], full: &[Record]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|r| it.any(|f| f == r))
}

#[test]
fn test_filter_output_is_subsequence() {
    let records = plant();
    for criteria in criteria_grid() {
        let filtered = apply_filters(&records, &criteria);
        assert!(is_subsequence(&filtered, &records), "not a subsequence for {criteria:?}");
        let mut ids: Vec<usize> = filtered.iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), filtered.len());
    }
}

#[test]
fn test_filter_is_idempotent() {
    let records = plant();
    for criteria in criteria_grid() {
        assert_eq!(apply_filters(&records, &criteria), apply_filters(&records, &criteria));
    }
}

#[test]
fn test_default_criteria_keeps_everything_in_order() {
    let records = plant();
    let filtered = apply_filters(&records, &FilterCriteria::default());
    assert_eq!(filtered, records);
    assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_stats_invariants_hold_for_every_filter() {
    let records = plant();
    for criteria in criteria_grid() {
        let filtered = apply_filters(&records, &criteria);
        let stats = compute_stats(&filtered);
        assert_eq!(stats.total, filtered.len());
        assert_eq!(stats.enabled_count + stats.disabled_count, stats.total);
        assert_eq!(stats.hh + stats.h + stats.l + stats.ll + stats.other, stats.total);
        assert!(stats.with_interlock_count <= stats.total);
    }
}

#[test]
fn test_other_bucket_is_everything_unnamed() {
    let records = plant();
    let filtered = apply_filters(&records, &FilterCriteria::new().with_alarm_types([AlarmClass::Other]));
    let blocks: Vec<&str> = filtered.iter().map(|r| r.block.as_str()).collect();
    assert_eq!(blocks, vec!["PT201_DEV", "TE302"]);
}

#[test]
fn test_signal_normalization_drives_enabled_filter() {
    let records = plant();
    let enabled = apply_filters(&records, &FilterCriteria::new().with_enabled_status(EnabledStatus::Enabled));
    // "1" counts as enabled; 2 and null do not
    assert_eq!(enabled.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 4]);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let records = plant();
    let by_unit = apply_filters(&records, &FilterCriteria::new().with_search("BAR"));
    assert_eq!(by_unit.len(), 2);

    let by_rung = apply_filters(&records, &FilterCriteria::new().with_search("r_p201"));
    assert_eq!(by_rung.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);

    let by_identification = apply_filters(&records, &FilterCriteria::new().with_search("furnace"));
    assert_eq!(by_identification.iter().map(|r| r.id).collect::<Vec<_>>(), vec![5]);
}

#[test]
fn test_interlock_yes_and_no_split_the_set() {
    let records = two_records();
    let yes = apply_filters(&records, &FilterCriteria::new().with_interlock(InterlockFilter::Yes));
    let no = apply_filters(&records, &FilterCriteria::new().with_interlock(InterlockFilter::No));
    assert_eq!(yes.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(no.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_scenario_hh_only() {
    let records = two_records();
    let filtered = apply_filters(&records, &FilterCriteria::new().with_alarm_types([AlarmClass::HighHigh]));
    assert_eq!(filtered, vec![records[0].clone()]);

    let stats = compute_stats(&filtered);
    assert_eq!(
        (stats.total, stats.enabled_count, stats.disabled_count),
        (1, 1, 0)
    );
    assert_eq!((stats.hh, stats.h, stats.l, stats.ll, stats.other), (1, 0, 0, 0, 0));
}

#[test]
fn test_scenario_without_interlock() {
    let records = two_records();
    let filtered = apply_filters(&records, &FilterCriteria::new().with_interlock(InterlockFilter::No));
    assert_eq!(filtered, vec![records[1].clone()]);
}

#[test]
fn test_scenario_all_criteria_open() {
    let records = two_records();
    let criteria = FilterCriteria::new()
        .with_search("")
        .with_enabled_status(EnabledStatus::All)
        .with_interlock(InterlockFilter::All);
    assert!(criteria.is_unrestricted());
    assert_eq!(apply_filters(&records, &criteria), records);
}

#[test]
fn test_impossible_combination_is_empty() {
    let records = two_records();
    let criteria = FilterCriteria::new()
        .with_alarm_types([AlarmClass::HighHigh])
        .with_enabled_status(EnabledStatus::Disabled);
    let filtered = apply_filters(&records, &criteria);
    assert!(filtered.is_empty());
    assert_eq!(compute_stats(&filtered).total, 0);
}
