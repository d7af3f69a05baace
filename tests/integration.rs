use std::path::Path;
use std::process::Command;

fn livetext_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_livetext"));
    cmd.current_dir(dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn resolve_lists_candidates_in_trial_order() {
    let out = livetext_cmd(&fixture("site")).args(["resolve", "/about"]).output().unwrap();
    assert!(out.status.success(), "resolve failed: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        [
            "./app/about/page.tsx",
            "./app/about/page.jsx",
            "./src/app/about/page.tsx",
            "./pages/about.tsx",
            "./pages/about.jsx",
            "./pages/about/index.tsx",
            "./src/pages/about.tsx",
        ]
    );
}

#[test]
fn resolve_accepts_full_page_url() {
    let dir = tempfile::tempdir().unwrap();
    let out = livetext_cmd(dir.path())
        .args(["resolve", "http://localhost:3000/?tab=1#top", "--root", "/srv/site"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().next(), Some("/srv/site/app/page.tsx"));
    assert_eq!(stdout.lines().count(), 6);
}

#[test]
fn resolve_without_root_fails_with_fix() {
    let dir = tempfile::tempdir().unwrap();
    let out = livetext_cmd(dir.path()).args(["resolve", "/about"]).output().unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Invalid Request"), "stderr: {stderr}");
    assert!(stderr.contains("--root"));
}

#[test]
fn save_patches_first_candidate_containing_text() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("app/about")).unwrap();
    std::fs::create_dir_all(dir.path().join("pages")).unwrap();
    let app_page = dir.path().join("app/about/page.tsx");
    let pages_page = dir.path().join("pages/about.tsx");
    std::fs::write(&app_page, "export default () => <p>Contact</p>;\n").unwrap();
    std::fs::write(&pages_page, "export default () => (\n  <h1>About Us</h1>\n);\n").unwrap();

    let out = livetext_cmd(dir.path())
        .args(["save", "/about", "--old", "About Us", "--new", "About Them", "--root", "."])
        .output()
        .unwrap();

    assert!(out.status.success(), "save failed: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8(out.stdout).unwrap().trim(), "Saved to: about.tsx (line 2)");
    assert_eq!(
        std::fs::read_to_string(&pages_page).unwrap(),
        "export default () => (\n  <h1>About Them</h1>\n);\n"
    );
    assert_eq!(std::fs::read_to_string(&app_page).unwrap(), "export default () => <p>Contact</p>;\n");
}

#[test]
fn save_explicit_file_is_tried_first() {
    let dir = tempfile::tempdir().unwrap();
    let component = dir.path().join("Hero.tsx");
    std::fs::write(&component, "<h2>Welcome</h2>\n").unwrap();

    let out = livetext_cmd(dir.path())
        .args(["save", "/", "--old", "Welcome", "--new", "Hi", "--file", "Hero.tsx"])
        .output()
        .unwrap();

    assert!(out.status.success(), "save failed: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(std::fs::read_to_string(&component).unwrap(), "<h2>Hi</h2>\n");
}

#[test]
fn save_missing_text_lists_tried_files_and_fails() {
    let site = fixture("site");
    let before = std::fs::read_to_string(site.join("app/about/page.tsx")).unwrap();

    let out = livetext_cmd(&site)
        .args(["save", "/about", "--old", "Not on the page", "--new", "x"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Text Not Found Anywhere"), "stderr: {stderr}");
    assert!(stderr.contains("- `page.tsx`"));
    assert!(stderr.contains("- `about.tsx`"));
    assert_eq!(std::fs::read_to_string(site.join("app/about/page.tsx")).unwrap(), before);
}

#[test]
fn save_json_reports_failure_on_stdout() {
    let out = livetext_cmd(&fixture("site"))
        .args(["save", "/about", "--old", "Not on the page", "--new", "x", "--json"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result["success"], false);
    assert_eq!(result["errorKind"], "TextNotFoundAnywhere");
    assert!(result["error"].as_str().unwrap().starts_with("text not found in any file. Tried: page.tsx"));
}

#[test]
fn save_json_reports_bad_server_url_on_stdout() {
    let out = livetext_cmd(&fixture("site"))
        .args(["save", "/about", "--old", "About Us", "--new", "x", "--server", "not a url", "--json"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result["success"], false);
    assert_eq!(result["errorKind"], "InvalidRequest");
    assert!(result["error"].as_str().unwrap().contains("bad service URL"));
}

#[test]
fn save_refuses_when_edit_mode_is_off() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".livetext.toml"), "edit_mode = false\nproject_root = \".\"\n").unwrap();

    let out = livetext_cmd(dir.path())
        .args(["save", "/", "--old", "a", "--new", "b"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("edit mode is off"));
}

#[test]
fn patch_json_reports_line() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.tsx");
    std::fs::write(&file, "line one\n<h1>Hello World</h1>\n").unwrap();

    let out = livetext_cmd(dir.path())
        .args(["patch", "page.tsx", "--old", "Hello", "--new", "Goodbye", "--json"])
        .output()
        .unwrap();

    assert!(out.status.success());
    let result: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(result, serde_json::json!({ "success": true, "fileName": "page.tsx", "lineNumber": 2 }));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "line one\n<h1>Goodbye World</h1>\n");
}

#[test]
fn patch_with_empty_old_text_fails_and_leaves_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("page.tsx");
    std::fs::write(&file, "<h1>Hello</h1>\n").unwrap();

    let out = livetext_cmd(dir.path())
        .args(["patch", "page.tsx", "--old", "", "--new", "INJECTED"])
        .output()
        .unwrap();

    assert!(!out.status.success(), "stdout: {}", String::from_utf8_lossy(&out.stdout));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid Request"));
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "<h1>Hello</h1>\n");
}

#[test]
fn malformed_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".livetext.toml"), "project_root = [").unwrap();

    let out = livetext_cmd(dir.path()).args(["resolve", "/"]).output().unwrap();

    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid Config"));
}

#[test]
fn ping_without_service_suggests_serve() {
    let dir = tempfile::tempdir().unwrap();
    let out = livetext_cmd(dir.path())
        .args(["ping", "--server", "http://127.0.0.1:9"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Service Unavailable"), "stderr: {stderr}");
    assert!(stderr.contains("livetext serve"));
}
