use engagement_core::reconcile::{diagnose, reconcile};
use engagement_core::types::CanonicalIdentity;

fn ids(raw: &[&str]) -> Vec<CanonicalIdentity> {
    raw.iter().map(|r| CanonicalIdentity::try_from_raw(r).unwrap()).collect()
}

#[test]
fn reconcile_arithmetic_and_roster_order() {
    let result = reconcile(&ids(&["a", "b", "c"]), &ids(&["c", "a"]));

    assert_eq!(result.total, 3);
    assert_eq!(result.engaged_count, 2);
    assert_eq!(result.percentage, 66.67);
    assert_eq!(result.engaged, ids(&["a", "c"]), "engaged list follows roster order");
    assert_eq!(result.not_engaged, ids(&["b"]));
}

#[test]
fn empty_roster_yields_zero_percentage() {
    let result = reconcile(&[], &ids(&["x", "y"]));
    assert_eq!(result.total, 0);
    assert_eq!(result.engaged_count, 0);
    assert_eq!(result.percentage, 0.0);
    assert!(result.engaged.is_empty());
    assert!(result.not_engaged.is_empty());
}

#[test]
fn empty_engagement_leaves_everyone_unmatched() {
    let roster = ids(&["a", "b"]);
    let result = reconcile(&roster, &[]);
    assert_eq!(result.percentage, 0.0);
    assert_eq!(result.not_engaged, roster);
}

#[test]
fn full_engagement_is_one_hundred_percent() {
    let roster = ids(&["a", "b"]);
    let result = reconcile(&roster, &ids(&["b", "a", "zz"]));
    assert_eq!(result.percentage, 100.0);
    assert_eq!(result.engaged, roster);
}

#[test]
fn partitions_cover_roster_exactly() {
    let roster = ids(&["m1", "m2", "m3", "m4", "m5", "m6", "m7"]);
    let engaged = ids(&["m7", "m2", "outsider", "m5"]);
    let result = reconcile(&roster, &engaged);

    assert_eq!(result.engaged.len() + result.not_engaged.len(), result.total);
    assert_eq!(result.engaged, ids(&["m2", "m5", "m7"]));
    assert_eq!(result.percentage, 42.86);
}

#[test]
fn matching_happens_on_canonical_keys() {
    let roster = ids(&["@Ayse.Yilmaz", "Mehmet_Kaya"]);
    let engaged = ids(&[" AYSE-YILMAZ ", "mehmet kaya"]);
    let result = reconcile(&roster, &engaged);
    assert_eq!(result.engaged_count, 2);
}

#[test]
fn diagnose_reports_extra_engagements() {
    let result = diagnose(&ids(&["a", "b"]), &ids(&["a", "c"]));

    assert_eq!(result.matches(), ids(&["a"]).as_slice());
    assert_eq!(result.mismatches(), ids(&["b"]).as_slice());
    assert_eq!(result.extra_engagements.users, ids(&["c"]));
    assert_eq!(result.extra_engagements.count, 1);
    assert_eq!(result.analysis.total, 2);
    assert_eq!(result.analysis.engaged_count, 1);
    assert_eq!(result.analysis.percentage, 50.0);
}

#[test]
fn diagnose_lists_extras_once_in_engagement_order() {
    let result = diagnose(&ids(&["a"]), &ids(&["z", "a", "y", "z"]));
    assert_eq!(result.extra_engagements.users, ids(&["z", "y"]));
}

#[test]
fn diagnose_returns_unbounded_lists() {
    let roster: Vec<CanonicalIdentity> = (0..500)
        .map(|i| CanonicalIdentity::try_from_raw(&format!("member{i}")).unwrap())
        .collect();
    let engaged: Vec<CanonicalIdentity> = (250..1000)
        .map(|i| CanonicalIdentity::try_from_raw(&format!("member{i}")).unwrap())
        .collect();

    let result = diagnose(&roster, &engaged);

    assert_eq!(result.roster.users.len(), 500);
    assert_eq!(result.engagement.users.len(), 750);
    assert_eq!(result.matches().len(), 250);
    assert_eq!(result.mismatches().len(), 250);
    assert_eq!(result.extra_engagements.count, 500);
    assert_eq!(result.extra_engagements.users.len(), 500);
}

#[test]
fn diagnose_agrees_with_reconcile() {
    let roster = ids(&["a", "b", "c", "d"]);
    let engaged = ids(&["d", "b", "q"]);

    let analysis = reconcile(&roster, &engaged);
    let debug = diagnose(&roster, &engaged);

    assert_eq!(analysis, debug.analysis);
}

#[test]
fn debug_result_serializes_analysis_fields_inline() {
    let debug = diagnose(&ids(&["a", "b"]), &ids(&["a", "c"]));
    let value = serde_json::to_value(&debug).unwrap();

    assert_eq!(value["total"], 2);
    assert_eq!(value["engaged_count"], 1);
    assert_eq!(value["not_engaged"], serde_json::json!(["b"]));
    assert_eq!(value["extra_engagements"]["users"], serde_json::json!(["c"]));
    assert_eq!(value["engagement"]["count"], 2);
}

#[test]
fn exact_ties_round_to_even() {
    let roster: Vec<CanonicalIdentity> = (0..32)
        .map(|i| CanonicalIdentity::try_from_raw(&format!("member{i}")).unwrap())
        .collect();

    let one = reconcile(&roster, &roster[..1]);
    assert_eq!(one.percentage, 3.12);

    let five = reconcile(&roster, &roster[..5]);
    assert_eq!(five.percentage, 15.62);
}
