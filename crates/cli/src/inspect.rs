use miniscope_core::{markup, outline, style, util};
use std::error::Error;
use std::fs;
use std::path::Path;

fn effective_root<'a>(file: &'a Path, root: Option<&'a Path>) -> Option<&'a Path> {
    root.or_else(|| file.parent())
}

pub fn classes(file: &Path, root: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let names = if util::is_markup_path(file) {
        markup::collect_class_tokens(file)
    } else if util::is_style_path(file) {
        style::collect_class_names(file, effective_root(file, root))
    } else {
        return Err(format!("not a markup or stylesheet file: {}", file.display()).into());
    };

    for name in names {
        println!("{name}");
    }
    Ok(())
}

pub fn vars(file: &Path, root: Option<&Path>) -> Result<(), Box<dyn Error>> {
    if !util::is_style_path(file) {
        return Err(format!("not a stylesheet file: {}", file.display()).into());
    }

    for name in style::collect_root_variables(file, effective_root(file, root)) {
        println!("{name}");
    }
    Ok(())
}

pub fn outline(file: &Path) -> Result<(), Box<dyn Error>> {
    if !util::is_markup_path(file) {
        return Err(format!("not a markup file: {}", file.display()).into());
    }

    let content = fs::read_to_string(file)?;
    let document = markup::parse(&content)?;
    for symbol in outline::document_symbols(&document) {
        println!(
            "{}:{}-{}:{}\t{}",
            symbol.span.start.line + 1,
            symbol.span.start.column + 1,
            symbol.span.end.line + 1,
            symbol.span.end.column + 1,
            symbol.name
        );
    }
    Ok(())
}
