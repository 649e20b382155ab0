use odoo_tuner_cli::{pick_service, render_text, write_report, Report};
use odoo_tuner_core::{recommend, FactSheet, RecommendationSet, ServiceLimit, ShellLimit};

fn facts() -> FactSheet {
    FactSheet {
        total_memory_bytes: Some(16 * 1024 * 1024 * 1024),
        available_memory_bytes: Some(4 * 1024 * 1024 * 1024),
        swap_total_bytes: Some(0),
        cpu_count: Some(8),
        shell_fd_limit: Some(ShellLimit::Limited(100_000)),
        service_fd_limit: ServiceLimit::Limited(524_288),
        ..FactSheet::new("odoo.service")
    }
}

#[test]
fn report_file_preserves_keys_and_integers() {
    let facts = facts();
    let recommendations = recommend(&facts).unwrap();
    let report = Report::new(facts, recommendations);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odoo-tuning.json");
    write_report(&path, &report).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["service"], "odoo.service");

    let recs = written["recommendations"].as_object().unwrap();
    assert_eq!(recs.len(), RecommendationSet::KEYS.len());
    for key in RecommendationSet::KEYS {
        assert!(recs[key].is_u64(), "{} should be a plain integer", key);
    }
    assert_eq!(recs["LimitNOFILE"], 100_000);
    assert_eq!(recs["workers"], 7);
    assert_eq!(recs["limit_memory_hard"], 25_769_803_776u64);

    assert_eq!(written["facts"]["cpu_count"], 8);
    assert_eq!(written["facts"]["service_fd_limit"]["limited"], 524_288);
}

#[test]
fn report_round_trip_keeps_recommendations() {
    let facts = facts();
    let recommendations = recommend(&facts).unwrap();
    let report = Report::new(facts, recommendations);

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let parsed: RecommendationSet =
        serde_json::from_value(value["recommendations"].clone()).unwrap();
    assert_eq!(parsed, recommendations);
}

#[test]
fn missing_metric_leaves_nothing_to_render() {
    let facts = FactSheet {
        cpu_count: None,
        ..facts()
    };
    assert!(recommend(&facts).is_err());
}

#[test]
fn discovered_unit_flows_into_text() {
    let service = pick_service(
        vec!["odoo.service".to_string(), "odoo-test.service".to_string()],
        true,
        &b"2\n"[..],
        Vec::new(),
    )
    .unwrap();
    let facts = FactSheet {
        service: service.clone(),
        ..facts()
    };
    let text = render_text(&service, &recommend(&facts).unwrap());
    assert!(text.contains("systemctl edit odoo-test.service"));
    assert!(text.contains("workers           = 7"));
}
