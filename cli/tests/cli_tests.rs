//! CLI integration tests using assert_cmd.
//!
//! Seeded commands pin `--seed` so their output is reproducible.

use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn bigmath() -> Command {
    let mut cmd = Command::cargo_bin("bigmath").unwrap();
    cmd.env_remove("BIGMATH_SEED").env_remove("BIGMATH_CONFIG");
    cmd
}

fn stdout_is(expected: &str) -> impl Predicate<str> {
    predicate::str::diff(format!("{}\n", expected))
}

// --- Help ---

#[test]
fn help_shows_all_subcommands() {
    bigmath().arg("--help").assert().success().stdout(
        predicate::str::contains("calc")
            .and(predicate::str::contains("modpow"))
            .and(predicate::str::contains("modinv"))
            .and(predicate::str::contains("convert"))
            .and(predicate::str::contains("is-prime"))
            .and(predicate::str::contains("next-prime"))
            .and(predicate::str::contains("random"))
            .and(predicate::str::contains("prime")),
    );
}

#[test]
fn help_prime_shows_args() {
    bigmath()
        .args(["prime", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--bits").and(predicate::str::contains("--certainty")));
}

// --- Arithmetic ---

#[test]
fn calc_add_with_negative_operand() {
    bigmath()
        .args(["calc", "12345678", "add", "-1234"])
        .assert()
        .success()
        .stdout(stdout_is("12344444"));
}

#[test]
fn calc_mul_beyond_machine_width() {
    bigmath()
        .args(["calc", "18446744073709551616", "mul", "18446744073709551616"])
        .assert()
        .success()
        .stdout(stdout_is("340282366920938463463374607431768211456"));
}

#[test]
fn calc_div_truncates_and_rem_follows_dividend() {
    bigmath()
        .args(["calc", "-7", "div", "2"])
        .assert()
        .success()
        .stdout(stdout_is("-3"));
    bigmath()
        .args(["calc", "-7", "rem", "2"])
        .assert()
        .success()
        .stdout(stdout_is("-1"));
}

#[test]
fn calc_mod_is_nonnegative() {
    bigmath()
        .args(["calc", "-7", "mod", "3"])
        .assert()
        .success()
        .stdout(stdout_is("2"));
}

#[test]
fn calc_mod_rejects_nonpositive_modulus() {
    bigmath()
        .args(["calc", "7", "mod", "-3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Modulus must be positive"));
}

#[test]
fn calc_div_by_zero_fails() {
    bigmath()
        .args(["calc", "1", "div", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Division by zero"));
}

#[test]
fn calc_pow_and_gcd() {
    bigmath()
        .args(["calc", "2", "pow", "100"])
        .assert()
        .success()
        .stdout(stdout_is("1267650600228229401496703205376"));
    bigmath()
        .args(["calc", "240", "gcd", "-46"])
        .assert()
        .success()
        .stdout(stdout_is("2"));
}

#[test]
fn calc_bitwise_uses_twos_complement() {
    bigmath()
        .args(["calc", "-1", "and", "255"])
        .assert()
        .success()
        .stdout(stdout_is("255"));
    bigmath()
        .args(["calc", "12", "xor", "10"])
        .assert()
        .success()
        .stdout(stdout_is("6"));
    bigmath()
        .args(["calc", "12", "andnot", "10"])
        .assert()
        .success()
        .stdout(stdout_is("4"));
}

#[test]
fn calc_shifts() {
    bigmath()
        .args(["calc", "1", "shl", "70"])
        .assert()
        .success()
        .stdout(stdout_is("1180591620717411303424"));
    bigmath()
        .args(["calc", "-5", "shr", "1"])
        .assert()
        .success()
        .stdout(stdout_is("-2"));
}

#[test]
fn calc_rejects_negative_shift() {
    bigmath()
        .args(["calc", "1", "shl", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shift amount"));
}

#[test]
fn calc_rejects_malformed_operand() {
    bigmath()
        .args(["calc", "12x", "add", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid integer"));
}

#[test]
fn calc_unknown_operator_is_usage_error() {
    bigmath()
        .args(["calc", "1", "plus", "1"])
        .assert()
        .failure()
        .code(2);
}

// --- Modular ---

#[test]
fn modpow_small() {
    bigmath()
        .args(["modpow", "4", "13", "497"])
        .assert()
        .success()
        .stdout(stdout_is("445"));
}

#[test]
fn modpow_negative_exponent_uses_inverse() {
    // 3^-1 mod 7 = 5, so 3^-2 mod 7 = 25 mod 7 = 4
    bigmath()
        .args(["modpow", "3", "-2", "7"])
        .assert()
        .success()
        .stdout(stdout_is("4"));
}

#[test]
fn modinv_and_not_invertible() {
    bigmath()
        .args(["modinv", "3", "11"])
        .assert()
        .success()
        .stdout(stdout_is("4"));
    bigmath()
        .args(["modinv", "6", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not invertible"));
}

#[test]
fn modular_commands_reject_negative_modulus() {
    bigmath()
        .args(["modpow", "3", "5", "-7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Modulus must be positive"));
    bigmath()
        .args(["modinv", "3", "-7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Modulus must be positive"));
}

// --- Radix ---

#[test]
fn convert_to_hex_and_binary() {
    bigmath()
        .args(["convert", "255", "--to", "16"])
        .assert()
        .success()
        .stdout(stdout_is("ff"));
    bigmath()
        .args(["convert", "-10", "--to", "2"])
        .assert()
        .success()
        .stdout(stdout_is("-1010"));
}

#[test]
fn convert_auto_detects_prefix() {
    bigmath()
        .args(["convert", "0xff", "--to", "10"])
        .assert()
        .success()
        .stdout(stdout_is("255"));
}

#[test]
fn convert_rejects_bad_radix() {
    bigmath()
        .args(["convert", "10", "--to", "37"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 2..=36"));
}

#[test]
fn output_and_input_radix_flags() {
    bigmath()
        .args(["--radix", "16", "calc", "255", "add", "1"])
        .assert()
        .success()
        .stdout(stdout_is("100"));
    bigmath()
        .args(["--input-radix", "2", "calc", "101", "add", "1"])
        .assert()
        .success()
        .stdout(stdout_is("6"));
}

// --- Primality ---

#[test]
fn is_prime_verdicts() {
    bigmath()
        .args(["is-prime", "1000000007"])
        .assert()
        .success()
        .stdout(stdout_is("probably prime"));
    bigmath()
        .args(["is-prime", "561"])
        .assert()
        .success()
        .stdout(stdout_is("composite"));
}

#[test]
fn next_prime_above_power_of_ten() {
    bigmath()
        .args(["next-prime", "1000000000000000000"])
        .assert()
        .success()
        .stdout(stdout_is("1000000000000000003"));
}

// --- Seeded generation ---

#[test]
fn seeded_prime_is_reproducible() {
    bigmath()
        .args(["--seed", "1", "prime", "--bits", "64", "--certainty", "100"])
        .assert()
        .success()
        .stdout(stdout_is("5282181203059317587"));
}

#[test]
fn seed_from_environment() {
    bigmath()
        .env("BIGMATH_SEED", "5")
        .args(["random", "--bits", "32"])
        .assert()
        .success()
        .stdout(stdout_is("2886056024"));
}

#[test]
fn seed_from_config_file() {
    let path = std::env::temp_dir().join(format!("bigmath-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"seed": 5, "default_radix": 16}"#).unwrap();

    bigmath()
        .arg("--config")
        .arg(&path)
        .args(["random", "--bits", "32"])
        .assert()
        .success()
        .stdout(stdout_is("ac05b858"));

    std::fs::remove_file(&path).ok();
}

#[test]
fn invalid_config_fails() {
    let path = std::env::temp_dir().join(format!("bigmath-bad-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"default_radix": 40}"#).unwrap();

    bigmath()
        .arg("--config")
        .arg(&path)
        .args(["calc", "1", "add", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));

    std::fs::remove_file(&path).ok();
}
