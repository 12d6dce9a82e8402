use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get the bi binary command
fn bi_cmd() -> Command {
    Command::cargo_bin("bi").unwrap()
}

mod rendering {
    use super::*;

    #[test]
    fn renders_positional_fixtures() {
        bi_cmd()
            .args(["--fixtures", r#"["dana"]"#, "Hello %{0|u}"])
            .assert()
            .success()
            .stdout("Hello %{0|u} -> Hello DANA\n");
    }

    #[test]
    fn renders_named_fixtures() {
        bi_cmd()
            .args(["-f", r#"{"q": "a b"}"#, "/search?q=%{q|r}"])
            .assert()
            .success()
            .stdout("/search?q=%{q|r} -> /search?q=a%20b\n");
    }

    #[test]
    fn renders_each_template_on_its_own_line() {
        bi_cmd()
            .args(["-f", r#"["x"]"#, "%{0}", r"\%{0}", "%{%{0}}"])
            .assert()
            .success()
            .stdout("%{0} -> x\n\\%{0} -> %{0}\n%{%{0}} -> %{x}\n");
    }

    #[test]
    fn template_without_placeholders_is_unchanged() {
        bi_cmd()
            .arg("plain text")
            .assert()
            .success()
            .stdout("plain text -> plain text\n");
    }

    #[test]
    fn json_output() {
        bi_cmd()
            .args(["--json", "-f", r#"["a"]"#, "%{0|U}"])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""template": "%{0|U}""#))
            .stdout(predicate::str::contains(r#""result": "A""#));
    }
}

mod options {
    use super::*;

    #[test]
    fn strict_by_default() {
        bi_cmd()
            .arg("[%{0}]")
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::starts_with("FixtureNotFoundError:"));
    }

    #[test]
    fn non_strict_substitutes_empty_string() {
        bi_cmd()
            .args(["--options", r#"{"strict": false}"#, "[%{0}]"])
            .assert()
            .success()
            .stdout("[%{0}] -> []\n");
    }

    #[test]
    fn unknown_option_is_a_configuration_error() {
        bi_cmd()
            .args(["-o", r#"{"loud": true}"#, "x"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("ConfigurationError:"))
            .stderr(predicate::str::contains("loud"));
    }

    #[test]
    fn options_must_be_an_object() {
        bi_cmd()
            .args(["-o", "[true]", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must be a JSON object"));
    }

    #[test]
    fn invalid_json_is_reported() {
        bi_cmd()
            .args(["-f", "{not json", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--fixtures is not valid JSON"));
    }
}

mod filters {
    use super::*;

    #[test]
    fn auto_filters_and_suppression() {
        bi_cmd()
            .args(["--auto-filters", "u", "-f", r#"["foo"]"#, "%{0}", "%{0|-}"])
            .assert()
            .success()
            .stdout("%{0} -> FOO\n%{0|-} -> foo\n");
    }

    #[test]
    fn unknown_specifier_fails_even_when_lenient() {
        bi_cmd()
            .args(["-o", r#"{"strict": false}"#, "%{0|Z}"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("UnrecognisedFilterSpecifierError:"));
    }

    #[test]
    fn unknown_auto_filter_is_rejected() {
        bi_cmd()
            .args(["-a", "u1", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("ConfigurationError:"));
    }

    #[test]
    fn failure_prints_no_partial_output() {
        bi_cmd()
            .args(["-f", r#"["a"]"#, "%{0}", "%{1}"])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn list_filters() {
        bi_cmd()
            .arg("--list-filters")
            .assert()
            .success()
            .stdout(predicate::str::contains("S  Hash with SHA-256, hex"))
            .stdout(predicate::str::contains("u  Upper-case"));
    }
}

mod shell_completions {
    use super::*;

    #[test]
    fn bash_completions() {
        bi_cmd()
            .env("COMPLETE", "bash")
            .assert()
            .success()
            .stdout(predicate::str::contains("_bi()"));
    }

    #[test]
    fn invalid_shell_error() {
        bi_cmd()
            .env("COMPLETE", "invalid")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown shell"));
    }
}

mod help_and_version {
    use super::*;

    #[test]
    fn templates_are_required() {
        bi_cmd().assert().failure();
    }

    #[test]
    fn help_flag() {
        bi_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Render %{name|filters} placeholder templates"));
    }

    #[test]
    fn version_flag() {
        bi_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("bi"));
    }
}
