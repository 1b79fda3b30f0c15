use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "westward-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_script(label: &str, script: &str, extra: &[&str]) -> (Output, PathBuf) {
    let root = temp_path(label);
    std::fs::create_dir_all(&root).expect("temp dir");
    let script_path = root.join("input.txt");
    std::fs::write(&script_path, script).expect("write script");
    let data_dir = root.join("data");
    let output = Command::new(env!("CARGO_BIN_EXE_trail-console"))
        .args(["--seed", "1848", "--no-color", "--script"])
        .arg(&script_path)
        .arg("--data-dir")
        .arg(&data_dir)
        .args(extra)
        .output()
        .expect("run cli");
    (output, data_dir)
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn top_ten_then_exit() {
    let (output, _) = run_script("top-ten", "# see the top ten\n3\n\n6\n", &[]);
    assert!(output.status.success());
    let text = stdout_of(&output);
    assert!(text.contains("Westward: the Oregon Trail"));
    assert!(text.contains("The Oregon Top Ten"));
    assert!(text.contains("Stephen Meek"));
    assert!(text.contains("Happy trails!"));
}

#[test]
fn outfitting_and_saving_writes_a_save_file() {
    let script = "\
# new game as a banker
1
1
Ezra



y
2
# buy oxen and food, then check out
1
6
2
800
9
# save and return to the menu
9
11
6
";
    let (output, data_dir) = run_script("save", script, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = stdout_of(&output);
    assert!(text.contains("general store"));
    assert!(text.contains("Your journey has been saved."));
    let save = Path::new(&data_dir).join("journey.save.json");
    let json = std::fs::read_to_string(save).expect("save file written");
    assert!(json.contains("\"Ezra\""));
}

#[test]
fn end_of_input_exits_cleanly() {
    let (output, _) = run_script("eof", "2\n", &[]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("covered wagon"));
}

#[test]
fn missing_policy_file_is_an_error() {
    let missing = temp_path("no-policy").join("policy.json");
    let missing = missing.to_string_lossy().into_owned();
    let (output, _) = run_script("bad-policy", "6\n", &["--policy", &missing]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("loading policy"));
}
