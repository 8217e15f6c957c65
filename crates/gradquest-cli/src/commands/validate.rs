//! The `gradquest validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradquest_core::parser;

pub fn execute(questions: PathBuf) -> Result<()> {
    let files = if questions.is_dir() {
        parser::load_question_directory(&questions)?
    } else {
        let records = parser::parse_question_file(&questions)?;
        vec![(questions.clone(), records)]
    };

    let mut total_warnings = 0;

    for (path, records) in &files {
        println!("{}: {} questions", path.display(), records.len());

        let warnings = parser::validate_records(records);
        for w in &warnings {
            let prefix = w
                .question
                .as_ref()
                .map(|q| format!("  [{q}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
