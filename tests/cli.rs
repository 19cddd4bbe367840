use assert_cmd::Command;
use predicates::prelude::*;

fn mortgage() -> Command {
    Command::cargo_bin("mortgage").unwrap()
}

#[test]
fn one_shot_prints_schedule_and_total() {
    mortgage()
        .args(["--amount", "1200", "--years", "1", "--rate", "0", "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Month 1: Principal Paid = $100.00, Interest Paid = $0.00, \
             Remaining Principal = $1,100.00\n",
        ))
        .stdout(predicate::str::contains("Total Cost of Loan = $1,200.00\n"))
        .stdout(predicate::str::contains("Principal vs Interest").not());
}

#[test]
fn one_shot_thirty_year_loan_with_chart() {
    mortgage()
        .args(["--amount", "200000", "--years", "30", "--rate", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Month 1: Principal Paid = $199.10, Interest Paid = $1,000.00, \
             Remaining Principal = $199,800.90\n",
        ))
        .stdout(predicate::str::contains("Month 360:"))
        .stdout(predicate::str::contains("Month 361:").not())
        .stdout(predicate::str::contains("Total Cost of Loan = $431,676.38"))
        .stdout(predicate::str::contains("Principal vs Interest Payments Over Time\n"));
}

#[test]
fn one_shot_tiny_rate_pays_off() {
    mortgage()
        .args(["--amount", "200000", "--years", "30", "--rate", "1e-13", "--no-chart"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Month 1: Principal Paid = $555.56, Interest Paid = $0.00, \
             Remaining Principal = $199,444.44\n",
        ))
        .stdout(predicate::str::contains(
            "Month 360: Principal Paid = $555.56, Interest Paid = $0.00, \
             Remaining Principal = $0.00\n",
        ))
        .stdout(predicate::str::contains("Total Cost of Loan = $200,000.00\n"))
        .stdout(predicate::str::contains("inf").not());
}

#[test]
fn one_shot_with_first_payment_date() {
    mortgage()
        .args([
            "--amount",
            "1200",
            "--years",
            "1",
            "--rate",
            "0",
            "--first-payment",
            "2024-01-31",
            "--no-chart",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining Principal = $1,000.00 (2024-02-29)\n"));
}

#[test]
fn one_shot_rejects_invalid_input() {
    for args in [
        ["--amount", "abc", "--years", "30", "--rate", "6"],
        ["--amount", "0", "--years", "30", "--rate", "6"],
        ["--amount", "200000", "--years", "-1", "--rate", "6"],
        ["--amount", "200000", "--years", "30", "--rate", "-5"],
    ] {
        mortgage()
            .args(args)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Month").not())
            .stderr(predicate::str::contains(
                "Invalid input. Please enter valid numeric values.",
            ));
    }
}

#[test]
fn interactive_calculate_clear_quit() {
    mortgage()
        .arg("--no-chart")
        .write_stdin("c\n1200\n1\n0\nl\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Loan Amount:"))
        .stdout(predicate::str::contains("Loan Length (years):"))
        .stdout(predicate::str::contains("Annual Interest Rate (%):"))
        .stdout(predicate::str::contains("Total Cost of Loan = $1,200.00"))
        .stdout(predicate::str::contains("Form cleared."));
}

#[test]
fn interactive_invalid_input_keeps_running() {
    mortgage()
        .arg("--no-chart")
        .write_stdin("c\nlots\n30\n6\nc\n1200\n1\n0\n")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Invalid input. Please enter valid numeric values.",
        ))
        .stdout(predicate::str::contains("Total Cost of Loan = $1,200.00"));
}

#[test]
fn interactive_draws_chart() {
    mortgage()
        .args(["--chart-width", "10"])
        .write_stdin("calculate\n1200\n1\n0\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Principal vs Interest Payments Over Time\n"))
        .stdout(predicate::str::contains("Month # Principal Paid, = Interest Paid (Amount)\n"))
        .stdout(predicate::str::contains("   12 ########## $100.00\n"));
}
