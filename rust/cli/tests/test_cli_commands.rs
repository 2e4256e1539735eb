mod helpers;

use helpers::{clear_config_env, run_cli};
use holdem_engine::history::HandRecord;
use serial_test::serial;

#[test]
#[serial]
fn deal_is_deterministic_for_a_seed() {
    clear_config_env();
    let a = run_cli(&["deal", "--players", "5", "--seed", "2024"]);
    let b = run_cli(&["deal", "--players", "5", "--seed", "2024"]);
    assert_eq!(a.exit_code, 0, "{}", a.stderr);
    assert_eq!(a.stdout, b.stdout);
    assert_eq!(
        a.stdout.lines().filter(|l| l.starts_with("Hole P")).count(),
        5
    );
}

#[test]
#[serial]
fn deal_rejects_out_of_range_player_counts() {
    clear_config_env();
    for n in ["1", "10"] {
        let res = run_cli(&["deal", "--players", n]);
        assert_eq!(res.exit_code, 2, "players={}", n);
        assert!(res.stdout.is_empty());
    }
}

#[test]
fn eval_prints_hand_category() {
    let res = run_cli(&["eval", "--hole", "Ah Kh", "--board", "Qh Jh Th 2c 3d"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Hand: Royal Flush"), "{}", res.stdout);
}

#[test]
fn eval_reports_bad_cards_on_stderr() {
    let res = run_cli(&["eval", "--hole", "Zz Kh"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid input"), "{}", res.stderr);
}

#[test]
fn equity_aces_beat_kings_most_of_the_time() {
    let res = run_cli(&[
        "equity",
        "--hand",
        "As Ad",
        "--hand",
        "Ks Kd",
        "--iterations",
        "2000",
        "--seed",
        "7",
    ]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    let first = res
        .stdout
        .lines()
        .find(|l| l.contains("equity"))
        .expect("equity line");
    let pct: f64 = first
        .rsplit("equity ")
        .next()
        .and_then(|s| s.trim_end_matches('%').parse().ok())
        .expect("percentage");
    assert!(pct > 70.0 && pct < 92.0, "{}", first);
}

#[test]
fn equity_needs_two_hands() {
    let res = run_cli(&["equity", "--hand", "As Ad"]);
    assert_eq!(res.exit_code, 2);
}

#[test]
#[serial]
fn sim_prints_summary_per_player() {
    clear_config_env();
    let res = run_cli(&["sim", "--hands", "50", "--players", "4", "--seed", "99"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.starts_with("Simulated "), "{}", res.stdout);
    for n in 1..=4 {
        assert!(res.stdout.contains(&format!("P{}: chips", n)));
    }
}

#[test]
#[serial]
fn sim_writes_hand_records_as_jsonl() {
    clear_config_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/hands.jsonl");
    let res = run_cli(&[
        "sim",
        "--hands",
        "20",
        "--seed",
        "5",
        "--output",
        path.to_str().unwrap(),
    ]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert!(!records.is_empty());
    for (i, rec) in records.iter().enumerate() {
        assert_eq!(rec.hand_number, i as u64 + 1);
        assert!(rec.result.is_some());
    }
}

#[test]
#[serial]
fn sim_rejects_zero_hands() {
    clear_config_env();
    let res = run_cli(&["sim", "--hands", "0"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("hands must be >= 1"));
}
