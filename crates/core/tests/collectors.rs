use miniscope_core::{markup, project, style};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn class_names_without_imports_are_exactly_the_declared_ones() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "index.wxss",
        ".btn { color: red; }\n.btn { margin: 0; }\n.Icon-Large:active { opacity: 1; }\n",
    );

    let names = style::collect_class_names(&dir.path().join("index.wxss"), Some(dir.path()));
    let names: Vec<_> = names.into_iter().collect();
    assert_eq!(names, vec!["btn".to_string(), "Icon-Large".to_string()]);
}

#[test]
fn imports_merge_transitively() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "pages/index.wxss",
        "@import \"../shared/a.wxss\";\n.local { color: red; }\n",
    );
    write(dir.path(), "shared/a.wxss", "@import \"b.wxss\";\n.a { color: red; }\n");
    write(dir.path(), "shared/b.wxss", ".b { color: red; }\n");

    let names = style::collect_class_names(&dir.path().join("pages/index.wxss"), Some(dir.path()));
    assert!(names.contains("local"));
    assert!(names.contains("a"));
    assert!(names.contains("b"));
    assert_eq!(names.len(), 3);
}

#[test]
fn root_relative_imports_resolve_against_the_workspace() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "pages/deep/index.wxss",
        "@import \"/shared/theme.wxss\";\n",
    );
    write(dir.path(), "shared/theme.wxss", ".themed { color: red; }\n");

    let names =
        style::collect_class_names(&dir.path().join("pages/deep/index.wxss"), Some(dir.path()));
    assert!(names.contains("themed"));
}

#[test]
fn diamond_imports_do_not_duplicate() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "index.wxss",
        "@import \"left.wxss\";\n@import \"right.wxss\";\n",
    );
    write(dir.path(), "left.wxss", "@import \"base.wxss\";\n.left { color: red; }\n");
    write(dir.path(), "right.wxss", "@import \"base.wxss\";\n.right { color: red; }\n");
    write(dir.path(), "base.wxss", ".base { color: red; }\n");

    let names = style::collect_class_names(&dir.path().join("index.wxss"), Some(dir.path()));
    assert_eq!(names.len(), 3);
}

#[test]
fn cyclic_imports_terminate() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.wxss", "@import \"b.wxss\";\n.a { color: red; }\n");
    write(dir.path(), "b.wxss", "@import \"a.wxss\";\n.b { color: red; }\n");

    let names = style::collect_class_names(&dir.path().join("a.wxss"), Some(dir.path()));
    assert!(names.contains("a"));
    assert!(names.contains("b"));
}

#[test]
fn missing_import_targets_are_skipped() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "index.wxss",
        "@import \"gone.wxss\";\n.still-here { color: red; }\n",
    );

    let names = style::collect_class_names(&dir.path().join("index.wxss"), Some(dir.path()));
    let names: Vec<_> = names.into_iter().collect();
    assert_eq!(names, vec!["still-here".to_string()]);
}

#[test]
fn root_variables_follow_imports_and_scope() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "app.wxss",
        "@import \"vars.wxss\";\npage { --app-bg: #fff; }\n.card { --card-pad: 2rpx; }\n",
    );
    write(dir.path(), "vars.wxss", "page { --brand: teal; }\n");

    let vars = style::collect_root_variables(&dir.path().join("app.wxss"), Some(dir.path()));
    assert!(vars.contains("--app-bg"));
    assert!(vars.contains("--brand"));
    assert!(!vars.contains("--card-pad"));
}

#[test]
fn markup_tokens_across_attribute_shapes() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "index.wxml",
        "<view class=\"wrap  main\">\n  <text class=\"label {{tone}} label-sm\">hi</text>\n  <view class=\"wrap\"/>\n</view>\n",
    );

    let tokens = markup::collect_class_tokens(&dir.path().join("index.wxml"));
    let tokens: Vec<_> = tokens.into_iter().collect();
    assert_eq!(
        tokens,
        vec![
            "wrap".to_string(),
            "main".to_string(),
            "label".to_string(),
            "label-sm".to_string(),
        ]
    );
}

#[test]
fn global_collection_honors_the_configured_subroot() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "project.config.json",
        r#"{"miniprogramRoot": "miniprogram/", "appid": "wx0000"}"#,
    );
    write(
        dir.path(),
        "miniprogram/app.wxss",
        ".global-btn { color: red; }\npage { --page-bg: #eee; }\n",
    );

    let classes = project::collect_global_class_names(Some(dir.path()));
    assert!(classes.contains("global-btn"));

    let vars = project::collect_global_variables(Some(dir.path()));
    assert!(vars.contains("--page-bg"));
}

#[test]
fn unparsable_import_does_not_break_the_chain() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "index.wxss",
        "@import \"broken.wxss\";\n@import \"fine.wxss\";\n.top { color: red; }\n",
    );
    // Unreadable as UTF-8, so the read fails and the file is skipped.
    fs::write(dir.path().join("broken.wxss"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
    write(dir.path(), "fine.wxss", ".fine { color: red; }\n");

    let names = style::collect_class_names(&dir.path().join("index.wxss"), Some(dir.path()));
    assert!(names.contains("top"));
    assert!(names.contains("fine"));
}
