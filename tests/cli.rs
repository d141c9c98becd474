use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cyclebudget").unwrap();
    cmd.env("CYCLEBUDGET_DATA_DIR", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn run(dir: &TempDir, args: &[&str]) -> String {
    let output = cmd(dir).args(args).assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

fn summary_json(dir: &TempDir) -> Value {
    serde_json::from_str(&run(dir, &["summary", "--json"])).unwrap()
}

fn category<'a>(summary: &'a Value, slug: &str) -> &'a Value {
    summary["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["slug"] == slug)
        .unwrap()
}

fn printed_id(output: &str) -> String {
    output
        .lines()
        .find_map(|l| l.trim().strip_prefix("ID:"))
        .map(|id| id.trim().to_string())
        .unwrap()
}

#[test]
fn init_creates_default_categories() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Initialization complete!"));

    let list = run(&dir, &["category", "list"]);
    assert!(list.contains("Savings"));
    assert!(list.contains("Usable Credit"));
    assert!(list.contains("liquidity"));
}

#[test]
fn summary_works_on_empty_data_dir() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Available liquidity"));
}

#[test]
fn savings_contributions_reduce_total_and_liquidity() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["period", "set-salary", "1.000.000"]);
    run(&dir, &["expense", "add", "savings", "Fund", "200.000", "--fixed"]);
    run(&dir, &["aporte", "add", "savings", "Bonus", "50.000"]);

    let summary = summary_json(&dir);
    let savings = category(&summary, "savings");
    assert_eq!(savings["total_real"], 150_000);
    assert_eq!(savings["total_contributions"], 50_000);
    assert_eq!(summary["liquidity"], 850_000);
}

#[test]
fn credit_available_and_percent_used() {
    let dir = TempDir::new().unwrap();
    run(&dir, &["period", "set-credit-goal", "300000"]);
    run(&dir, &["expense", "add", "credit", "Groceries", "100000"]);
    run(&dir, &["expense", "add", "credit", "Gas", "50000"]);

    let summary = summary_json(&dir);
    let credit = category(&summary, "credit");
    assert_eq!(credit["available"], 150_000);
    assert_eq!(credit["percent_used"], 50);

    let cycle = run(&dir, &["period", "show", "credit"]);
    assert!(cycle.contains("$150.000"));
}

#[test]
fn invalid_records_are_rejected() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["expense", "add", "savings", "Nothing", "0"])
        .assert()
        .failure()
        .stderr(contains("greater than 0"));

    cmd(&dir)
        .args(["aporte", "add", "credit", "Refund", "5000"])
        .assert()
        .failure()
        .stderr(contains("does not take contributions"));

    cmd(&dir)
        .args(["period", "set-salary", "0"])
        .assert()
        .failure();

    for _ in 0..2 {
        cmd(&dir)
            .args(["expense", "add", "savings", "Yacht", "5.000.000.000.000.000.000"])
            .assert()
            .failure()
            .stderr(contains("at most"));
    }
    cmd(&dir).arg("summary").assert().success();
}

#[test]
fn edit_and_delete_expense() {
    let dir = TempDir::new().unwrap();
    let added = run(&dir, &["expense", "add", "rent", "Plumber", "30000"]);
    let id = printed_id(&added);

    cmd(&dir)
        .args(["expense", "edit", &id, "--amount", "35000"])
        .assert()
        .success()
        .stdout(contains("$35.000"));

    let list = run(&dir, &["expense", "list", "--category", "rent"]);
    assert!(list.contains("Plumber"));

    cmd(&dir)
        .args(["expense", "delete", &id])
        .assert()
        .success()
        .stdout(contains("Deleted expense: Plumber"));

    cmd(&dir)
        .args(["expense", "delete", &id])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn close_period_twice_fails() {
    let dir = TempDir::new().unwrap();
    let active = run(&dir, &["period", "show", "monthly"]);
    let id = printed_id(&active);

    cmd(&dir)
        .args(["period", "close", &id])
        .assert()
        .success()
        .stdout(contains("Closed monthly"));

    cmd(&dir)
        .args(["period", "close", &id])
        .assert()
        .failure();

    let closed = run(&dir, &["period", "list", "--status", "closed"]);
    assert!(closed.contains(&id));
}

#[test]
fn setup_wizard_from_stdin() {
    let dir = TempDir::new().unwrap();
    let answers = [
        "",        // ready to begin
        "1000000", // salary
        "",        // previous debt
        "1",       // savings: add fixed expense
        "Fund",
        "200000",
        "", // permanent
        "", // continue
        "", // rent: continue
        "300000", // usable credit
        "", // continue
        "", // save
    ]
    .join("\n")
        + "\n";

    cmd(&dir)
        .arg("setup")
        .write_stdin(answers)
        .assert()
        .success()
        .stdout(contains("Setup complete! 4 changes saved."));

    let summary = summary_json(&dir);
    assert_eq!(summary["period"]["salary"], 1_000_000);
    assert_eq!(category(&summary, "savings")["total_real"], 200_000);
    assert_eq!(category(&summary, "credit")["goal"], 300_000);

    cmd(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Setup completed:        true"));
}

#[test]
fn setup_fails_cleanly_when_input_ends() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("setup")
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(contains("Input closed"));
}
