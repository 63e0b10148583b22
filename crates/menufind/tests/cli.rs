use anyhow::Result;
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

const LIBERTY: &str = r#"{
  "id": "a",
  "name": "Liberty Kitchen",
  "menu": [
    { "name": "Pesto Pasta", "category": "Pasta", "price": 13, "ingredients": ["Basil", "Pine Nuts"] },
    { "name": "Taco", "ingredients": [] }
  ]
}"#;

const RIDLEYS: &str = r#"{
  "id": "b",
  "name": "Ridley's BBQ",
  "menu": [
    { "name": "Brisket", "category": "Plates", "price": 18.5, "ingredients": ["Beef", "BBQ Sauce"] },
    { "name": "Pepper Wings", "category": "Sides", "price": "market price", "ingredients": ["pepper"] }
  ]
}"#;

fn catalog() -> Result<TempDir> {
    let dir = TempDir::new()?;
    dir.child("index.json")
        .write_str(r#"["liberty.json", "ridleys.json"]"#)?;
    dir.child("liberty.json").write_str(LIBERTY)?;
    dir.child("ridleys.json").write_str(RIDLEYS)?;
    Ok(dir)
}

fn menufind(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("menufind")?;
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(dir.path());
    Ok(cmd)
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn suggest_matches_by_name_substring() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["suggest", "li"]));
    insta::assert_snapshot!(out, @"Liberty Kitchen (a)");
    Ok(())
}

#[test]
fn suggest_is_case_insensitive_and_trimmed() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["suggest", "  RIDLEY "]));
    assert_eq!(out.trim(), "Ridley's BBQ (b)");
    Ok(())
}

#[test]
fn suggest_distinguishes_no_results_from_no_query() -> Result<()> {
    let dir = catalog()?;

    let none = stdout_of(menufind(&dir)?.args(["suggest", "zzz"]));
    assert_eq!(none.trim(), "No results");

    let idle = stdout_of(menufind(&dir)?.arg("suggest"));
    assert!(idle.contains("--focus"), "{idle}");
    Ok(())
}

#[test]
fn suggest_focus_lists_catalog_in_order() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["suggest", "--focus"]));
    insta::assert_snapshot!(out, @r"
    Liberty Kitchen (a)
    Ridley's BBQ (b)
    ");
    Ok(())
}

#[test]
fn suggest_json() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["suggest", "--focus", "--json"]));
    let parsed: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(
        parsed,
        serde_json::json!([
            { "id": "a", "name": "Liberty Kitchen" },
            { "id": "b", "name": "Ridley's BBQ" },
        ])
    );
    Ok(())
}

#[test]
fn menu_ingredient_filter_is_case_insensitive() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["menu", "b", "--ingredient", "bbq sauce", "--json"]));
    let parsed: serde_json::Value = serde_json::from_str(&out)?;

    assert_eq!(parsed["restaurant"]["id"], "b");
    let names: Vec<&str> = parsed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Brisket"]);
    Ok(())
}

#[test]
fn menu_resolves_restaurant_by_best_match() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["menu", "ridley", "--name", "sides"]));
    assert!(out.starts_with("Ridley's BBQ"), "{out}");
    assert!(out.contains("Pepper Wings"));
    assert!(out.contains("market price"));
    assert!(!out.contains("Brisket"));
    Ok(())
}

#[test]
fn menu_table_expands_ingredients() -> Result<()> {
    let dir = catalog()?;

    let collapsed = stdout_of(menufind(&dir)?.args(["menu", "a"]));
    assert!(collapsed.contains("2 ingredients"), "{collapsed}");
    assert!(!collapsed.contains("Pine Nuts"));

    let expanded = stdout_of(menufind(&dir)?.args(["menu", "a", "--expand"]));
    assert!(expanded.contains("Pine Nuts"), "{expanded}");
    assert!(expanded.contains("none listed"));
    assert!(expanded.contains("13.00"));
    Ok(())
}

#[test]
fn empty_ingredients_never_match_an_ingredient_query() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.args(["menu", "a", "-i", "x"]));
    insta::assert_snapshot!(out, @r"
    Liberty Kitchen
    No matching items
    ");
    Ok(())
}

#[test]
fn menu_for_unknown_restaurant_fails() -> Result<()> {
    let dir = catalog()?;
    let output = menufind(&dir)?.args(["menu", "nowhere"]).assert().failure();
    let stderr = String::from_utf8(output.get_output().stderr.clone())?;
    assert!(stderr.contains("No restaurant matches 'nowhere'"), "{stderr}");
    Ok(())
}

#[test]
fn malformed_restaurant_file_fails_the_whole_load() -> Result<()> {
    let dir = catalog()?;
    dir.child("ridleys.json").write_str("{ not json")?;

    let output = menufind(&dir)?.arg("check").assert().code(1);
    let stderr = String::from_utf8(output.get_output().stderr.clone())?;
    assert!(stderr.starts_with("Error:"), "{stderr}");
    assert!(stderr.contains("ridleys.json is malformed"), "{stderr}");
    Ok(())
}

#[test]
fn missing_manifest_is_reported() -> Result<()> {
    let dir = TempDir::new()?;
    let output = menufind(&dir)?.args(["suggest", "li"]).assert().code(1);
    let stderr = String::from_utf8(output.get_output().stderr.clone())?;
    assert!(stderr.contains("index.json could not be read"), "{stderr}");
    Ok(())
}

#[test]
fn check_reports_counts() -> Result<()> {
    let dir = catalog()?;
    let out = stdout_of(menufind(&dir)?.arg("check"));
    assert!(out.contains("2 restaurants, 4 menu items"), "{out}");
    Ok(())
}

#[test]
fn interactive_mode_requires_a_terminal() -> Result<()> {
    let dir = catalog()?;
    let output = menufind(&dir)?.write_stdin("").assert().failure();
    let stderr = String::from_utf8(output.get_output().stderr.clone())?;
    assert!(stderr.contains("needs a terminal"), "{stderr}");
    Ok(())
}
