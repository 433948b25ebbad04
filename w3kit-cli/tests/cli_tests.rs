use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn w3kit_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("w3kit"))
}

fn write_mod_tree(dir: &TempDir) {
    fs::create_dir_all(dir.path().join("content/scripts")).unwrap();
    fs::write(
        dir.path().join("content/scripts/main.ws"),
        r#"
        function Greet()
        {
            theGame.Notify(GetLocStringByKeyExt("mymod_greeting"));
            LogChannel('mymod', GetLocStringByKey("mymod_farewell"));
            var raw : string; raw = "mymod_raw_key";
        }
        "#,
    )
    .unwrap();
    fs::write(
        dir.path().join("mymod.xml"),
        r#"<Group id="MyMod" displayName="mymod_settings">
             <Var id="Volume" displayName="mymod_volume" displayType="SLIDER;0;100;1"/>
           </Group>"#,
    )
    .unwrap();
}

#[test]
fn test_scan_creates_working_table() {
    let dir = TempDir::new().unwrap();
    write_mod_tree(&dir);

    let output = w3kit_cmd()
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let table = fs::read_to_string(dir.path().join("strings.en.csv")).unwrap();
    assert!(table.starts_with(";idspace=?"));
    assert!(table.contains(";section=menu"));
    assert!(table.contains("mymod_settings|MISSING_LOCALISATION"));
    assert!(table.contains(";section=scripts"));
    assert!(table.contains("mymod_greeting|MISSING_LOCALISATION"));
    assert!(table.contains("mymod_farewell|MISSING_LOCALISATION"));
    // No -s filter, so the bare literal is not collected.
    assert!(!table.contains("mymod_raw_key"));
}

#[test]
fn test_scan_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write_mod_tree(&dir);

    assert!(w3kit_cmd().arg(dir.path()).output().unwrap().status.success());
    let once = fs::read_to_string(dir.path().join("strings.en.csv")).unwrap();

    assert!(w3kit_cmd().arg(dir.path()).output().unwrap().status.success());
    let twice = fs::read_to_string(dir.path().join("strings.en.csv")).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_scan_with_search_prefix() {
    let dir = TempDir::new().unwrap();
    write_mod_tree(&dir);

    let output = w3kit_cmd()
        .args([dir.path().to_str().unwrap(), "-s", "mymod_"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let table = fs::read_to_string(dir.path().join("strings.en.csv")).unwrap();
    assert!(table.contains("mymod_raw_key|MISSING_LOCALISATION"));
}

#[test]
fn test_scan_into_explicit_target() {
    let dir = TempDir::new().unwrap();
    write_mod_tree(&dir);
    let target = dir.path().join("out/custom.en.csv");

    let output = w3kit_cmd()
        .args([
            dir.path().to_str().unwrap(),
            "-o",
            target.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(target.exists());
}

#[test]
fn test_dry_run_prints_composed_document() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("en.csv");
    fs::write(&table, ";idspace=42\ngreet|Hello\n").unwrap();

    let output = w3kit_cmd()
        .args([table.to_str().unwrap(), "--dry-run"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("dry-run output is JSON");
    assert_eq!(json["space"], 42);
    assert_eq!(json["records"][0]["id"], 2_110_042_000u32);
    assert_eq!(json["records"][0]["key"], "greet");
}

#[test]
fn test_malformed_table_fails_with_line_number() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("en.csv");
    fs::write(&table, ";idspace=42\ngreet|Hello\nbroken|too|many\n").unwrap();

    let output = w3kit_cmd()
        .args([table.to_str().unwrap(), "--dry-run"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
    assert!(stderr.contains("expected 2 or 4 columns"), "stderr: {stderr}");
}

#[test]
fn test_unsupported_input_fails() {
    let dir = TempDir::new().unwrap();
    let stray = dir.path().join("notes.txt");
    fs::write(&stray, "nothing to see").unwrap();

    let output = w3kit_cmd().arg(stray.to_str().unwrap()).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported input"));
}

#[test]
fn test_missing_encoder_is_fatal() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("en.csv");
    fs::write(&table, ";idspace=42\ngreet|Hello\n").unwrap();

    let output = w3kit_cmd()
        .args([
            table.to_str().unwrap(),
            "--encoder",
            "/definitely/not/here/w3strings",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("encoder"));
}

#[test]
fn test_invalid_language_fails() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("en.csv");
    fs::write(&table, ";idspace=42\ngreet|Hello\n").unwrap();

    let output = w3kit_cmd()
        .args([
            table.to_str().unwrap(),
            "-l",
            "klingon",
            "--encoder",
            "/definitely/not/here/w3strings",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid target language"));
}
