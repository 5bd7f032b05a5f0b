use super::*;
use pulseproof_common::alert::{AlertStatus, Category, Priority, VulnerabilityAlert};
use pulseproof_common::model::Paginated;
use std::num::NonZeroU64;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

fn alert(id: &str, priority: Priority, category: Category) -> VulnerabilityAlert {
    VulnerabilityAlert {
        id: id.to_string(),
        serial: 0,
        summary: format!("{category} on monitored contract"),
        poc_uri: format!("ipfs://bafy{id}/metadata.json"),
        priority,
        contract: "0xDeAdBeEfdeadbeefdeadbeefdeadbeefdeadbeef".to_string(),
        detected: datetime!(2024-09-12 10:30:00 UTC),
        status: AlertStatus::New,
        category,
    }
}

fn working_set() -> Vec<VulnerabilityAlert> {
    vec![
        alert("a", Priority::Critical, Category::Reentrancy),
        alert("b", Priority::Medium, Category::ApprovalExploit),
        alert("c", Priority::Critical, Category::FundsDrain),
        alert("d", Priority::High, Category::Reentrancy),
        alert("e", Priority::Informational, Category::Unknown),
    ]
}

fn nz(n: u64) -> NonZeroU64 {
    NonZeroU64::new(n).expect("must be non-zero")
}

#[test_log::test]
fn empty_criteria_is_identity() {
    let alerts = working_set();
    let filtered = filter_alerts(&alerts, &FilterCriteria::default());
    assert_eq!(filtered, alerts);
}

#[test_log::test]
fn filter_is_idempotent() {
    let alerts = working_set();
    let criteria = FilterCriteria {
        priority: vec![Priority::Critical, Priority::High],
        ..Default::default()
    };
    let once = filter_alerts(&alerts, &criteria);
    let twice = filter_alerts(&once, &criteria);
    assert_eq!(once, twice);
}

#[test_log::test]
fn priority_filter_ors_within_the_list() {
    let alerts = working_set();
    let criteria = FilterCriteria {
        priority: vec![Priority::Critical, Priority::High],
        ..Default::default()
    };
    let filtered = filter_alerts(&alerts, &criteria);
    let ids = filtered.iter().map(|a| a.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["a", "c", "d"]);
}

#[test_log::test]
fn criteria_and_across_fields() {
    let alerts = working_set();
    let criteria = FilterCriteria {
        priority: vec![Priority::Critical],
        category: vec![Category::FundsDrain],
        ..Default::default()
    };
    let filtered = filter_alerts(&alerts, &criteria);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "c");
    for alert in &filtered {
        assert!(criteria.matches(alert));
    }
}

#[test_log::test]
fn contract_match_is_case_insensitive_substring() {
    let alerts = working_set();
    let criteria = FilterCriteria {
        contract: Some("DEADBEEF".to_string()),
        ..Default::default()
    };
    assert_eq!(filter_alerts(&alerts, &criteria).len(), alerts.len());

    let criteria = FilterCriteria {
        contract: Some("cafe".to_string()),
        ..Default::default()
    };
    assert!(filter_alerts(&alerts, &criteria).is_empty());
}

#[test_log::test]
fn date_range_is_inclusive() {
    let alerts = working_set();
    let detected = alerts[0].detected;

    // bounds exactly on the timestamp keep the alert
    let criteria = FilterCriteria {
        since: Some(detected),
        until: Some(detected),
        ..Default::default()
    };
    assert_eq!(filter_alerts(&alerts, &criteria).len(), alerts.len());

    let criteria = FilterCriteria {
        since: Some(detected + Duration::seconds(1)),
        ..Default::default()
    };
    assert!(filter_alerts(&alerts, &criteria).is_empty());

    let criteria = FilterCriteria {
        until: Some(detected - Duration::seconds(1)),
        ..Default::default()
    };
    assert!(filter_alerts(&alerts, &criteria).is_empty());
}

#[test_log::test]
fn pages_are_disjoint_and_cover_the_list() {
    let alerts = (0..25)
        .map(|n| {
            let mut a = alert(&format!("alert-{n}"), Priority::Medium, Category::Unknown);
            a.serial = n;
            a
        })
        .collect::<Vec<_>>();

    let mut seen = Vec::new();
    for page in 1.. {
        let results = paginate(
            &alerts,
            Paginated {
                page: nz(page),
                page_size: nz(10),
            },
        );
        assert_eq!(results.number_of_items, 25);
        assert_eq!(results.number_of_pages, 3);
        if results.results.is_empty() {
            break;
        }
        seen.extend(results.results);
    }

    assert_eq!(seen, alerts);
}

#[test_log::test]
fn last_page_holds_the_remainder() {
    let alerts = (0..25)
        .map(|n| alert(&format!("alert-{n}"), Priority::Medium, Category::Unknown))
        .collect::<Vec<_>>();

    let results = paginate(
        &alerts,
        Paginated {
            page: nz(3),
            page_size: nz(10),
        },
    );
    assert_eq!(results.results.len(), 5);
    assert_eq!(results.results[0].id, "alert-20");
    assert_eq!(results.results[4].id, "alert-24");
    assert_eq!(results.number_of_pages, 3);
    assert_eq!(results.next_page, None);
}

#[test_log::test]
fn page_past_the_end_is_empty_not_an_error() {
    let alerts = working_set();
    let results = paginate(
        &alerts,
        Paginated {
            page: nz(100),
            page_size: nz(10),
        },
    );
    assert!(results.results.is_empty());
    assert_eq!(results.number_of_items, 5);
}

#[test_log::test]
fn extreme_page_number_is_still_just_past_the_end() {
    let alerts = working_set();
    let results = paginate(
        &alerts,
        Paginated {
            page: nz(u64::MAX),
            page_size: nz(25),
        },
    );
    assert!(results.results.is_empty());
    assert_eq!(results.number_of_items, 5);
}

#[test_log::test]
fn paginate_empty_list() {
    let results = paginate(&[], Paginated::default());
    assert!(results.results.is_empty());
    assert_eq!(results.number_of_items, 0);
    assert_eq!(results.number_of_pages, 0);
    assert_eq!(results.next_page, None);
}

#[test_log::test]
fn critical_selection_keeps_order_and_priority() {
    let alerts = working_set();
    let critical = select_critical(&alerts, &DismissedAlerts::default());

    let ids = critical.iter().map(|a| a.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["a", "c"]);
    for alert in &critical {
        assert_eq!(alert.priority, Priority::Critical);
    }
}

#[test_log::test]
fn dismissal_hides_an_alert_for_the_session() {
    let alerts = vec![alert("a", Priority::Critical, Category::Reentrancy)];

    let mut dismissed = DismissedAlerts::default();
    dismissed.dismiss("a");

    assert!(select_critical(&alerts, &dismissed).is_empty());
    // the alert itself is untouched, only its session visibility changed
    assert_eq!(alerts[0].status, AlertStatus::New);
}

#[test_log::test]
fn dismissed_set_from_iterator() {
    let dismissed = ["a", "b"].into_iter().collect::<DismissedAlerts>();
    assert_eq!(dismissed.len(), 2);
    assert!(dismissed.is_dismissed("a"));
    assert!(!dismissed.is_dismissed("c"));
}

#[test_log::test]
fn acknowledgement_does_not_affect_critical_visibility() {
    let mut alerts = working_set();
    alerts[0].acknowledge();

    let critical = select_critical(&alerts, &DismissedAlerts::default());
    assert_eq!(critical.len(), 2);
    assert_eq!(critical[0].status, AlertStatus::Acknowledged);
}

#[test_log::test]
fn breakdown_counts_by_normalized_label() {
    let alerts = vec![
        alert("a", Priority::Critical, Category::Reentrancy),
        alert("b", Priority::Critical, Category::Reentrancy),
        alert("c", Priority::Critical, Category::FlashloanManipulation),
    ];

    let breakdown = category_breakdown(&alerts);
    assert_eq!(breakdown.get("reentrancy"), Some(&2));
    assert_eq!(breakdown.get("flashloan manipulation"), Some(&1));
    assert_eq!(breakdown.len(), 2);
}

#[test_log::test]
fn breakdown_of_empty_list() {
    assert!(category_breakdown(&[]).is_empty());
}

#[test_log::test]
fn filter_then_paginate_recomputes_totals() {
    let alerts = working_set();
    let criteria = FilterCriteria {
        category: vec![Category::Reentrancy],
        ..Default::default()
    };

    // a filter change recomputes the totals from the filtered set, and the
    // caller restarts from page 1
    let filtered = filter_alerts(&alerts, &criteria);
    let results = paginate(&filtered, Paginated::with_page_size(nz(10)));

    assert_eq!(results.page.get(), 1);
    assert_eq!(results.number_of_items, 2);
    assert_eq!(results.number_of_pages, 1);
}

#[test_log::test]
fn referential_transparency() {
    let alerts = working_set();
    let criteria = FilterCriteria {
        priority: vec![Priority::Critical],
        ..Default::default()
    };
    let dismissed = ["c"].into_iter().collect::<DismissedAlerts>();

    assert_eq!(
        filter_alerts(&alerts, &criteria),
        filter_alerts(&alerts, &criteria)
    );
    assert_eq!(
        paginate(&alerts, Paginated::default()),
        paginate(&alerts, Paginated::default())
    );
    assert_eq!(
        select_critical(&alerts, &dismissed),
        select_critical(&alerts, &dismissed)
    );
    assert_eq!(category_breakdown(&alerts), category_breakdown(&alerts));
}

#[test_log::test]
fn now_based_range_keeps_fresh_alerts() {
    let mut alerts = working_set();
    let now = OffsetDateTime::now_utc();
    alerts[0].detected = now;

    let criteria = FilterCriteria {
        since: Some(now - Duration::hours(1)),
        ..Default::default()
    };
    let filtered = filter_alerts(&alerts, &criteria);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "a");
}
