use sandbox_fs::tools::{dispatch, dispatch_to_response, ToolRequest};

mod common;

fn parse(json: &str) -> ToolRequest {
    serde_json::from_str(json).expect("request json")
}

#[test]
fn wire_shape_round_trips_edit_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("code.rs");
    std::fs::write(&file, "  foo();\n  bar();\n").expect("write");

    let request = parse(&format!(
        r#"{{"name":"edit_file","arguments":{{"path":{path:?},"edits":[{{"oldText":"foo();\nbar();","newText":"foo();\nbaz();"}}],"dryRun":true}}}}"#,
        path = file.to_string_lossy()
    ));

    let ctx = common::single_root(dir.path());
    let diff = dispatch(&ctx, request).expect("dispatch");
    assert!(diff.starts_with("```diff\n"));
    assert!(diff.contains("+  baz();"));

    // Dry run: the file is untouched.
    assert_eq!(
        std::fs::read_to_string(&file).expect("read"),
        "  foo();\n  bar();\n"
    );
}

#[test]
fn list_directory_renders_dir_and_file_tags() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir(dir.path().join("sub")).expect("mkdir");
    std::fs::write(dir.path().join("file.txt"), "").expect("write");

    let request = parse(&format!(
        r#"{{"name":"list_directory","arguments":{{"path":{:?}}}}}"#,
        dir.path().to_string_lossy()
    ));

    let ctx = common::single_root(dir.path());
    let listing = dispatch(&ctx, request).expect("dispatch");
    assert_eq!(listing, "[FILE] file.txt\n[DIR] sub");
}

#[test]
fn read_multiple_files_joins_sections_and_inlines_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let good = dir.path().join("good.txt");
    std::fs::write(&good, "content").expect("write");
    let missing = dir.path().join("missing.txt");

    let request = parse(&format!(
        r#"{{"name":"read_multiple_files","arguments":{{"paths":[{:?},{:?}]}}}}"#,
        good.to_string_lossy(),
        missing.to_string_lossy()
    ));

    let ctx = common::single_root(dir.path());
    let output = dispatch(&ctx, request).expect("dispatch");

    let sections: Vec<&str> = output.split("\n---\n").collect();
    assert_eq!(sections.len(), 2);
    assert!(sections[0].ends_with(":\ncontent\n"));
    assert!(sections[1].contains("Error - "));
}

#[test]
fn search_files_reports_no_matches_sentinel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let request = parse(&format!(
        r#"{{"name":"search_files","arguments":{{"path":{:?},"pattern":"nothing-here","excludePatterns":[]}}}}"#,
        dir.path().to_string_lossy()
    ));

    let ctx = common::single_root(dir.path());
    assert_eq!(dispatch(&ctx, request).expect("dispatch"), "No matches found");
}

#[test]
fn list_allowed_directories_renders_roots() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = common::single_root(dir.path());

    let request = parse(r#"{"name":"list_allowed_directories"}"#);
    let output = dispatch(&ctx, request).expect("dispatch");
    assert!(output.starts_with("Allowed directories:\n"));
    assert!(output.contains(&*dir.path().to_string_lossy()));
}

#[test]
fn errors_become_textual_payloads() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = common::single_root(dir.path());

    let request = parse(r#"{"name":"read_file","arguments":{"path":"/not/allowed/file"}}"#);
    let response = dispatch_to_response(&ctx, request);
    assert!(response.is_error);
    assert!(response.content.starts_with("Error: "));
    assert!(response.content.contains("outside allowed directories"));
}

#[test]
fn write_and_create_directory_render_success_messages() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ctx = common::single_root(dir.path());

    let file = dir.path().join("out.txt");
    let write = parse(&format!(
        r#"{{"name":"write_file","arguments":{{"path":{:?},"content":"data"}}}}"#,
        file.to_string_lossy()
    ));
    let message = dispatch(&ctx, write).expect("dispatch");
    assert!(message.starts_with("Successfully wrote to "));
    assert_eq!(std::fs::read_to_string(&file).expect("read"), "data");

    let sub = dir.path().join("sub");
    let mkdir = parse(&format!(
        r#"{{"name":"create_directory","arguments":{{"path":{:?}}}}}"#,
        sub.to_string_lossy()
    ));
    let message = dispatch(&ctx, mkdir).expect("dispatch");
    assert!(message.starts_with("Successfully created directory "));
    assert!(sub.is_dir());
}
