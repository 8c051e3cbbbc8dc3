//! End-to-end runs over the M administration fixtures.

use std::fs;
use std::path::PathBuf;

use freight_flow::config::AccountingConfig;
use freight_flow::flow::{HeavyFlow, OdError};
use freight_flow::network::NetworkError;
use freight_flow::rebalance::{PlanError, PlanSummary};
use freight_flow::run::{RunError, check_empty_plan, load_network, run_flows};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/m_network")
        .join(name)
}

#[test]
fn flows_over_m_network() {
    let report = run_flows(
        &fixture("station_location.txt"),
        &fixture("od.csv"),
        &AccountingConfig::default(),
    )
    .unwrap();

    assert_eq!(report.stations.len(), 24);
    assert_eq!(report.segments.len(), 12);

    let b = report.station("B").unwrap();
    assert_eq!(
        b.flow,
        HeavyFlow {
            up_through: 17,
            down_through: 0,
            up_arrive: 11,
            down_arrive: 0,
            up_depart: 4,
            down_depart: 19,
        }
    );
    assert_eq!(b.total, 51);

    let c = report.station("C").unwrap();
    assert_eq!(
        c.flow,
        HeavyFlow {
            up_through: 16,
            down_through: 11,
            up_arrive: 0,
            down_arrive: 12,
            up_depart: 8,
            down_depart: 7,
        }
    );
    assert_eq!(c.total, 54);

    let f = report.station("F").unwrap();
    assert_eq!(f.flow.down_through, 6);
    assert_eq!(f.flow.down_arrive, 2);
    assert_eq!(f.flow.down_depart, 12);
    assert_eq!(f.total, 20);

    let bc = report.segment("B-C").unwrap();
    assert_eq!(bc.flow.whole_inner, 20);
    assert_eq!(bc.flow.whole_to_f, 6);
    assert_eq!(bc.flow.whole_to_a, 17);
    assert_eq!(bc.flow.half_inner, 0);
    assert_eq!(bc.total, 43);
    assert_eq!(report.station("B-C").unwrap().total, 43);

    let ef = report.segment("E-F").unwrap();
    assert_eq!(ef.flow.whole_to_f, 6);
    assert_eq!(ef.flow.whole_inner, 2);
    assert_eq!(ef.total, 8);

    let ab = report.segment("A-B").unwrap();
    assert_eq!(ab.flow.whole_to_a, 17);
    assert_eq!(ab.total, 17);

    // Every wagon in the matrix departs from a reported node exactly once.
    let departed: u64 = report
        .stations
        .iter()
        .map(|s| s.flow.up_depart + s.flow.down_depart)
        .sum();
    assert_eq!(departed, 69);

    for s in &report.stations {
        let h = &s.flow;
        assert_eq!(
            s.total,
            h.up_through + h.down_through + h.up_arrive + h.down_arrive + h.up_depart + h.down_depart
        );
    }
}

#[test]
fn json_report_round_trips_through_serde() {
    let report = run_flows(
        &fixture("station_location.txt"),
        &fixture("od.csv"),
        &AccountingConfig::default(),
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    let stations = json["stations"].as_array().unwrap();
    let b = stations.iter().find(|s| s["name"] == "B").unwrap();
    assert_eq!(b["kind"], "station");
    assert_eq!(b["down_depart"], 19);
    assert_eq!(b["total"], 51);
}

#[test]
fn empty_plan_balances() {
    let summary = check_empty_plan(
        &fixture("station_location.txt"),
        &fixture("loss.csv"),
        &fixture("plan.csv"),
        &AccountingConfig::default(),
    )
    .unwrap();

    assert_eq!(
        summary,
        PlanSummary {
            empty_distance: 385,
            wagons_moved: 14,
            intervals_used: 6,
        }
    );
}

#[test]
fn empty_plan_imbalance_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let plan = dir.path().join("plan.csv");
    fs::write(&plan, "interval,distance,up,down\nD-E,35,0,3\nE,40,0,3\n").unwrap();

    let err = check_empty_plan(
        &fixture("station_location.txt"),
        &fixture("loss.csv"),
        &plan,
        &AccountingConfig::default(),
    )
    .unwrap_err();

    match err {
        RunError::Plan(PlanError::Imbalance { station, residual }) => {
            assert_eq!(station.as_str(), "B");
            assert_eq!(residual, -2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn third_child_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let topology = dir.path().join("station_location.txt");
    fs::write(
        &topology,
        "station upstream\nB None\nA B\nC B\nD B\nN A\nO C\n",
    )
    .unwrap();

    let err = load_network(&topology, &AccountingConfig::default()).unwrap_err();
    match err {
        RunError::Network(NetworkError::TooManyChildren { parent, child }) => {
            assert_eq!(parent.as_str(), "B");
            assert_eq!(child.as_str(), "D");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn od_cell_for_unknown_station() {
    let dir = tempfile::tempdir().unwrap();
    let od = dir.path().join("od.csv");
    fs::write(&od, "origin,B,Z\nB,,4\n").unwrap();

    let err = run_flows(
        &fixture("station_location.txt"),
        &od,
        &AccountingConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "unknown station: Z");
}

#[test]
fn custom_boundaries_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let topology = dir.path().join("station_location.txt");
    fs::write(&topology, "name parent\nHUB ROOT\nWEST HUB\nEAST HUB\n").unwrap();
    let od = dir.path().join("od.csv");
    fs::write(&od, "origin,WEST,EAST\nWEST,,5\n").unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(
        &config_path,
        r#"{ "boundary_a": "WEST", "boundary_f": "EAST", "root_marker": "ROOT" }"#,
    )
    .unwrap();

    let config = AccountingConfig::from_json_file(&config_path).unwrap();
    let report = run_flows(&topology, &od, &config).unwrap();

    // Only the hub is reported; it carries the hand-off traffic through.
    assert_eq!(report.stations.len(), 1);
    let hub = report.station("HUB").unwrap();
    assert_eq!(hub.flow.down_through, 5);
    assert_eq!(hub.total, 5);
}

#[test]
fn overflowing_od_matrix_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let od = dir.path().join("od.csv");
    fs::write(&od, "origin,B,C\nB,,18446744073709551615\nC,1,\n").unwrap();

    let err = run_flows(
        &fixture("station_location.txt"),
        &od,
        &AccountingConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, RunError::Od(OdError::VolumeOverflow)));
}

#[test]
fn repeated_od_origin_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let od = dir.path().join("od.csv");
    fs::write(&od, "origin,B,C\nB,,4\nB,,4\n").unwrap();

    let err = run_flows(
        &fixture("station_location.txt"),
        &od,
        &AccountingConfig::default(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "line 3: station B appears more than once");
}
